use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read or write config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("no home directory to place config and logs in")]
    MissingHome,
    #[error("config path {0} has no parent directory")]
    InvalidPath(PathBuf),
}
