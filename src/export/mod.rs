//! Optional output capabilities.
//!
//! A capability may or may not work on the current machine (a headless host
//! has no clipboard). Availability is asked at call time, never cached at
//! start-up, and callers fall back to [`StdoutExporter`].

pub mod clipboard;

use std::io::{self, Write};

use anyhow::{Context, Result};

pub use clipboard::{ClipboardExporter, MAX_CLIPBOARD_SIZE};

/// Something the host may or may not provide
pub trait Capability {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool;
}

/// Destination for a list of identifiers
pub trait Exporter: Capability {
    fn export(&mut self, lines: &[String]) -> Result<()>;
}

/// Prints one identifier per line
#[derive(Debug, Default)]
pub struct StdoutExporter;

impl Capability for StdoutExporter {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn is_available(&self) -> bool {
        true
    }
}

impl Exporter for StdoutExporter {
    fn export(&mut self, lines: &[String]) -> Result<()> {
        write_lines(io::stdout().lock(), lines)
    }
}

/// Write `lines` newline-terminated
pub fn write_lines<W: Write>(mut writer: W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(writer, "{line}").context("Failed to write output")?;
    }
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Pick the first available exporter, falling back to stdout
pub fn select_exporter(preferred: Box<dyn Exporter>) -> Box<dyn Exporter> {
    if preferred.is_available() {
        preferred
    } else {
        tracing::warn!(capability = preferred.name(), "capability unavailable, writing to stdout");
        Box::new(StdoutExporter)
    }
}
