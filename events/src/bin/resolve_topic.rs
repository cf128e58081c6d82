//! Reads CloudEvents (JSON, one per line) from stdin and prints the topic each
//! one would be published on. Unroutable events are logged and skipped; logs
//! never go to stdout.

use std::io;
use std::process::ExitCode;

use common::{Config, logger::init_logging};
use events::{SourceTopicResolver, batch::resolve_lines};

fn main() -> ExitCode {
    let config = match Config::init(".env") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = init_logging(
        &config.log_level,
        &config.log_dir,
        &config.log_file,
        config.log_to_console,
    );

    let resolver = match SourceTopicResolver::new(config.source_id.clone()) {
        Ok(resolver) => resolver,
        Err(e) => {
            tracing::error!(error = %e, "invalid source id");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        project = %config.project_name,
        source_id = %resolver.source_id(),
        "resolving topics from stdin"
    );

    match resolve_lines(&resolver, io::stdin().lock(), io::stdout().lock()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(unresolved) => {
            tracing::info!(unresolved, "finished with unroutable events");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to resolve stdin");
            ExitCode::FAILURE
        }
    }
}
