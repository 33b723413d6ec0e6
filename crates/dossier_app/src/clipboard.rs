use anyhow::{Context, Result};

/// Seam for the system clipboard so the effect runner stays testable.
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard
            .set_text(text.to_string())
            .context("clipboard write failed")
    }
}
