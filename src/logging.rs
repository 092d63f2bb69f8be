//! Process-wide structured logger.
//!
//! Records go to stderr so they never mix with `report`/`--json` output on
//! stdout. Filtering follows `RUST_LOG`; `DASH_LOG_FORMAT=json` switches the
//! drain to JSON lines.

use once_cell::sync::Lazy;
pub use slog::*;

fn wrap<D>(drain: D) -> Fuse<slog_async::Async>
where
    D: Drain<Err = Never, Ok = ()> + Send + 'static,
{
    slog_async::Async::new(slog_envlogger::new(drain))
        .thread_name("slog-async".into())
        .build()
        .fuse()
}

pub static DEFAULT: Lazy<Logger> = Lazy::new(|| {
    let mk_term = || {
        slog_term::FullFormat::new(slog_term::TermDecorator::new().stderr().build())
            .build()
            .fuse()
    };

    let mk_json = || slog_json::Json::default(std::io::stderr()).fuse();

    let format = std::env::var("DASH_LOG_FORMAT").unwrap_or_default();
    let drain = match format.as_str() {
        "json" => wrap(mk_json()),
        _ => wrap(mk_term()),
    };

    Logger::root(
        drain,
        o!(
            "version" => env!("CARGO_PKG_VERSION"),
        ),
    )
});
