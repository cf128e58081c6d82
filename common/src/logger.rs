use std::fs::create_dir_all;
use std::io::IsTerminal;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter, prelude::*};

/// Installs the global `tracing` subscriber.
///
/// Events always go to a daily rolling file under `log_dir`; `log_to_console`
/// adds a stderr layer, coloured only when stderr is a terminal. Stdout is
/// left to the program's own output. `RUST_LOG` overrides `log_level` when set.
///
/// Keep the returned guard alive until shutdown, otherwise buffered file
/// output is lost.
pub fn init_logging(
    log_level: &str,
    log_dir: &str,
    log_file: &str,
    log_to_console: bool,
) -> WorkerGuard {
    let console = log_to_console.then_some(std::io::stderr);
    let ansi = std::io::stderr().is_terminal();
    let (subscriber, guard) = build_subscriber(log_level, log_dir, log_file, console, ansi);

    if subscriber.try_init().is_err() {
        // Only the first subscriber installed in a process takes effect.
        tracing::debug!("global tracing subscriber already set");
    }

    guard
}

/// Builds the file + optional console subscriber without installing it.
pub fn build_subscriber<W>(
    log_level: &str,
    log_dir: &str,
    log_file: &str,
    console: Option<W>,
    ansi: bool,
) -> (impl Subscriber + Send + Sync + 'static, WorkerGuard)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    if !Path::new(log_dir).exists() {
        create_dir_all(log_dir).ok();
    }

    let file_appender = rolling::daily(log_dir, log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let console_layer = console.map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer);

    (subscriber, guard)
}
