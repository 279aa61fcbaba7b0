use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
}

pub fn load_config(path_override: Option<std::path::PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    ensure_dirs(&paths)?;
    let config = read_config(&paths.config_file)?;
    Ok(LoadedConfig { config, paths })
}

pub(super) fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        Err(err) => Err(ConfigError::Io(err)),
    }
}

pub(super) fn ensure_dirs(paths: &ConfigPaths) -> Result<(), ConfigError> {
    fs::create_dir_all(&paths.config_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    Ok(())
}
