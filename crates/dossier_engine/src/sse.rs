/// Incremental parser for `text/event-stream` responses.
///
/// Buffers partial input across network chunks; events are complete
/// once their blank-line terminator has arrived.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw response bytes and returns the `data:` payload of
    /// every event completed by this chunk, in order. Multiple `data:`
    /// lines within one event are joined with newlines; events without
    /// data (comments, keepalives) are skipped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.push_str(&String::from_utf8_lossy(chunk));
        // Normalize after appending so a CRLF split across two chunks
        // still collapses once its second half arrives.
        if self.buffer.contains('\r') {
            self.buffer = self.buffer.replace("\r\n", "\n");
        }

        let mut payloads = Vec::new();
        while let Some(boundary) = self.buffer.find("\n\n") {
            let block = self.buffer[..boundary].to_string();
            self.buffer.drain(..boundary + 2);

            let mut data_lines: Vec<String> = Vec::new();
            for line in block.lines() {
                if let Some(value) = line.strip_prefix("data:") {
                    data_lines.push(value.strip_prefix(' ').unwrap_or(value).to_string());
                }
            }
            if !data_lines.is_empty() {
                payloads.push(data_lines.join("\n"));
            }
        }
        payloads
    }
}
