//! Optional clipboard mirroring of the CSV output (`clipboard` feature).

use anyhow::{Context, Result};

pub fn copy_text(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text.to_string())
        .context("clipboard write failed")?;
    Ok(())
}
