use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "METADATA_EXPLORER_CONFIG";

const CONFIG_DIR_NAME: &str = "metadata-explorer";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the configuration file path
///
/// `$METADATA_EXPLORER_CONFIG` wins when set; otherwise the file lives in the
/// platform configuration directory (`~/.config/metadata-explorer/config.toml`
/// on Linux).
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_get_config_path_from_env() {
        let original = env::var_os(CONFIG_ENV_VAR);

        // SAFETY: Only this test touches METADATA_EXPLORER_CONFIG and it
        // restores the original value afterwards
        unsafe {
            env::set_var(CONFIG_ENV_VAR, "/tmp/archive/config.toml");
        }

        let path = get_config_path().unwrap();
        assert_eq!(path, PathBuf::from("/tmp/archive/config.toml"));

        unsafe {
            match original {
                Some(value) => env::set_var(CONFIG_ENV_VAR, value),
                None => env::remove_var(CONFIG_ENV_VAR),
            }
        }
    }
}
