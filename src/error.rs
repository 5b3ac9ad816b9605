use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no saved connection named '{0}'")]
    UnknownProfile(String),

    #[error("--save needs a profile --name")]
    MissingProfileName,

    #[error("could not find home directory")]
    NoHomeDirectory,
}
