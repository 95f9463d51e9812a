/// Splits a server-sent-events byte stream into `data:` payloads.
///
/// Network chunks may end mid-line or mid-character, so incomplete bytes
/// are carried over to the next `push`.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            payloads.extend(data_payload(&line));
        }
        payloads
    }

    /// Flushes a trailing line the upstream closed without a newline.
    pub fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.buffer);
        data_payload(&rest).into_iter().collect()
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    line.trim_end_matches(['\r', '\n'])
        .strip_prefix("data:")
        .map(|data| data.trim_start().to_string())
}
