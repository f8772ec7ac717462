//! Live rendering of an output stream.

use examforge_application::ports::llm_gateway::StreamHandle;
use examforge_domain::{StreamEvent, error_text};
use std::io::Write;

/// Consume a stream, echoing chunks to stdout as they arrive, and
/// return the full concatenated text.
///
/// Works identically for a true network stream and the degenerate
/// one-chunk wrap: a `Completed` event with no preceding deltas is
/// printed whole.
pub async fn render_stream(mut handle: StreamHandle) -> String {
    let mut full_text = String::new();
    let mut streamed = false;

    while let Some(event) = handle.next_event().await {
        match event {
            StreamEvent::Delta(chunk) => {
                print!("{}", chunk);
                let _ = std::io::stdout().flush();
                full_text.push_str(&chunk);
                streamed = true;
            }
            StreamEvent::Completed(text) => {
                if !streamed {
                    print!("{}", text);
                    let _ = std::io::stdout().flush();
                    full_text = text;
                }
                break;
            }
            StreamEvent::Error(message) => {
                let rendered = error_text(message);
                println!("{}", rendered);
                if !streamed {
                    full_text = rendered;
                }
                break;
            }
        }
    }

    println!();
    full_text
}
