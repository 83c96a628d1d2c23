//! Incremental decoding of provider server-sent event streams.

use nodex_core::ProviderKind;
use serde_json::Value;

use crate::provider::extract_delta;

const DATA_PREFIX: &str = "data: ";
const DONE_MARKER: &str = "[DONE]";

/// Turns raw network chunks into text fragments.
///
/// Bytes are buffered until a full line is available, so events split
/// across chunks (including inside a multi-byte character) decode intact.
/// Lines that are not `data: ` events or that carry invalid JSON are
/// skipped. After `data: [DONE]` all further input is ignored.
#[derive(Debug)]
pub struct StreamDecoder {
    provider: ProviderKind,
    buffer: Vec<u8>,
    done: bool,
}

impl StreamDecoder {
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Whether the provider signalled the end of the stream
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one network chunk, returning the fragments it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(chunk);

        let mut fragments = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            self.decode_line(&line[..newline], &mut fragments);
            if self.done {
                self.buffer.clear();
                break;
            }
        }
        fragments
    }

    /// Flush a trailing line that had no newline
    pub fn finish(&mut self) -> Vec<String> {
        let mut fragments = Vec::new();
        if !self.done && !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.decode_line(&line, &mut fragments);
        }
        self.done = true;
        fragments
    }

    fn decode_line(&mut self, raw: &[u8], out: &mut Vec<String>) {
        let decoded = String::from_utf8_lossy(raw);
        let line = decoded.strip_suffix('\r').unwrap_or(&decoded);
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            return;
        };
        if data.trim() == DONE_MARKER {
            self.done = true;
            return;
        }
        match serde_json::from_str::<Value>(data) {
            Ok(event) => out.extend(extract_delta(self.provider, &event)),
            Err(e) => log::trace!("Skipping undecodable stream event: {}", e),
        }
    }
}
