//! Clipboard support for copying calculator results.

use anyhow::Context;
use arboard::Clipboard;

/// Copy text to the system clipboard.
///
/// Fails when no clipboard is reachable (for example on a headless session).
pub fn copy_to_clipboard(text: &str) -> anyhow::Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;

    clipboard
        .set_text(text.to_string())
        .context("Failed to copy to clipboard")?;

    tracing::debug!(text, "copied result to clipboard");
    Ok(())
}
