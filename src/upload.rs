use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const WINDOWS_DEVICE_NAMES: &[&str] = &[
    "CON", "AUX", "COM1", "COM2", "COM3", "COM4", "LPT1", "LPT2", "LPT3", "PRN", "NUL",
];

/// Reduces a client-supplied filename to something safe to join onto the
/// upload directory. Path separators become `_`, so directory parts stay in
/// the name but can never leave the upload directory. Non-ASCII characters
/// are dropped without transliteration. Never returns an empty string.
pub fn secure_filename(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if matches!(c, '/' | '\\') { ' ' } else { c })
        .collect();

    let cleaned: String = ascii
        .split_ascii_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let mut cleaned = cleaned.trim_matches(['.', '_']).to_string();

    let stem = cleaned.split('.').next().unwrap_or_default();
    if WINDOWS_DEVICE_NAMES
        .iter()
        .any(|device| device.eq_ignore_ascii_case(stem))
    {
        cleaned.insert(0, '_');
    }

    if cleaned.is_empty() {
        format!("upload-{}", Uuid::new_v4())
    } else {
        cleaned
    }
}

/// Writes an upload under `dir`, replacing any earlier file with the same name.
pub async fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating upload directory {}", dir.display()))?;

    let path = dir.join(secure_filename(filename));
    tokio::fs::write(&path, data)
        .await
        .with_context(|| format!("writing upload {}", path.display()))?;

    tracing::debug!("saved {} bytes to {}", data.len(), path.display());
    Ok(path)
}
