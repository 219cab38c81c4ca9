use crate::domain::ports::FrontEnd;
use std::io::Write;

const BELL: &[u8] = b"\x07";
const DISPLAY_WIDTH: usize = 12;

/// Keypad display rendered as lines of text.
pub struct TerminalFrontEnd<W: Write> {
    out: W,
    sound: bool,
}

impl<W: Write> TerminalFrontEnd<W> {
    pub fn new(out: W, sound: bool) -> Self {
        Self { out, sound }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(e) = self.out.write_all(bytes).and_then(|_| self.out.flush()) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write> FrontEnd for TerminalFrontEnd<W> {
    fn show_value(&mut self, value: &str) {
        let line = format!("[{:>width$}]\n", value, width = DISPLAY_WIDTH);
        self.emit(line.as_bytes());
    }

    fn show_dialog(&mut self, title: &str, message: &str) {
        let block = format!("== {} ==\n{}\n", title, message);
        self.emit(block.as_bytes());
    }

    fn play_key_sound(&mut self) {
        if self.sound {
            self.emit(BELL);
        }
    }
}
