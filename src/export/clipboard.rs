use anyhow::{Context, Result};
use arboard::Clipboard;

use super::{Capability, Exporter};

/// Largest text handed to the system clipboard (10MB)
pub const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Seam between the exporter and the system clipboard
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Checks text without touching the system clipboard
fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!(
            "Text too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_SIZE
        );
    }

    Ok(())
}

fn copy_with_provider(lines: &[String], provider: &mut dyn ClipboardProvider) -> Result<()> {
    let text = lines.join("\n");
    validate_clipboard_text(&text)?;
    provider.set_text(&text)
}

/// Copies identifiers to the system clipboard, one per line
///
/// Availability is probed each time it is asked: X11/Wayland sessions come
/// and go, and headless hosts never have one.
#[derive(Debug, Default)]
pub struct ClipboardExporter;

impl Capability for ClipboardExporter {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    fn is_available(&self) -> bool {
        Clipboard::new().is_ok()
    }
}

impl Exporter for ClipboardExporter {
    /// # Errors
    ///
    /// Fails when there is nothing to copy, the text exceeds
    /// [`MAX_CLIPBOARD_SIZE`], or the clipboard cannot be opened or written.
    fn export(&mut self, lines: &[String]) -> Result<()> {
        // Validate before opening the clipboard so CI gets the real reason
        validate_clipboard_text(&lines.join("\n"))?;
        let mut clipboard = SystemClipboard::new()?;
        copy_with_provider(lines, &mut clipboard)
    }
}
