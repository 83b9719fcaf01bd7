use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use topup_core::ClientSettings;

/// Reads settings from a JSON file, missing keys fall back to their defaults.
pub fn load_settings(path: Option<&Path>) -> Result<ClientSettings> {
    let Some(path) = path else {
        return Ok(ClientSettings::default());
    };

    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&text)
        .wrap_err_with(|| format!("Invalid settings in {}", path.display()))
}
