//! Resolving a stream of newline-delimited CloudEvents.

use std::io::{self, BufRead, Write};

use crate::event::CloudEvent;
use crate::resolver::SourceTopicResolver;

/// Writes one topic per routable event in `input` to `output`.
///
/// Blank lines are skipped. Malformed JSON and unroutable events are logged,
/// counted and skipped; the returned count is how many lines produced no
/// topic. Only I/O failures stop processing.
pub fn resolve_lines<R, W>(
    resolver: &SourceTopicResolver,
    input: R,
    mut output: W,
) -> io::Result<usize>
where
    R: BufRead,
    W: Write,
{
    let mut unresolved = 0usize;

    for (n, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let event: CloudEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(line = n + 1, error = %e, "skipping malformed event");
                unresolved += 1;
                continue;
            }
        };

        match resolver.resolve_topic(&event) {
            Ok(topic) => writeln!(output, "{topic}")?,
            Err(e) => {
                tracing::warn!(line = n + 1, event_id = %event.id, error = %e, "event has no topic");
                unresolved += 1;
            }
        }
    }

    output.flush()?;
    Ok(unresolved)
}
