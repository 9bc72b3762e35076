use bot_commons::*;

fn main() {
    start_everything("WARN,user_info_bot=info", user_info_bot::entry());
}
