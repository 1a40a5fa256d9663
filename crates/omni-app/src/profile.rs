use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use omni_config::Config;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "omni.json";

/// Loads the config file at `path`, or `omni.json` in the working directory when it exists,
/// or the built-in defaults. Environment overrides are applied last.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => read_config(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            tracing::info!("No config file, using defaults");
            Config::default()
        }
    };

    Ok(config.with_env_overrides())
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Writes the default config to `path` unless the file already exists
pub fn init_config(path: &Path) -> anyhow::Result<bool> {
    if path.exists() {
        tracing::warn!("{} already exists, leaving it alone", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, serde_json::to_string_pretty(&Config::default())?)?;
    tracing::info!("Created default config at {}", path.display());
    Ok(true)
}
