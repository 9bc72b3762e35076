//! This crate houses functions common for the bots in this workspace,
//! because some things are just boilerplate.

use std::future::Future;

pub mod useful_methods;

/// Initialize logging and run the `closure` to completion in an async runtime.
///
/// Logging is enabled with `default_filter` unless overridden by environment
/// variable `RUST_LOG`. This uses the crate [pretty_env_logger][] internally,
/// see its documentation for more details.
///
/// The runtime is single-threaded: handlers are driven cooperatively, one
/// suspension point at a time.
///
/// # Panics
/// Panics if the runtime could not be created.
///
/// [pretty_env_logger]: https://docs.rs/pretty_env_logger
pub fn start_everything(default_filter: &str, closure: impl Future<Output = ()>) {
    let log_filter = std::env::var_os("RUST_LOG")
        .and_then(|x| x.into_string().ok())
        .unwrap_or_else(|| default_filter.to_string());

    // journald adds its own timestamps.
    let running_as_systemd_service = std::env::var_os("JOURNAL_STREAM").is_some();

    let mut builder = match running_as_systemd_service {
        true => pretty_env_logger::formatted_builder(),
        false => pretty_env_logger::formatted_timed_builder(),
    };

    builder.parse_filters(&log_filter);

    if builder.try_init().is_err() {
        log::error!("Tried to init logger twice!");
    }

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Could not build the async runtime!")
        .block_on(closure);
}

/// Read the bot token from the environment variable `var`.
///
/// Returns `None` if it's unset, not valid unicode, or blank.
#[must_use]
pub fn read_bot_token(var: &str) -> Option<String> {
    let token = std::env::var(var).ok()?;
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
