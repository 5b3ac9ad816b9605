use std::path::Path;

use anyhow::Result;
use clap::{Args, Parser};

use crate::config::{Config, ConnectionProfile};
use crate::error::ConfigError;

#[derive(Debug, Parser)]
#[command(name = "db-sdl")]
#[command(about = "Generate a GraphQL schema from a PostgreSQL database")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Connect over TLS
    #[arg(long)]
    pub tls: bool,

    /// Store the resolved connection as the profile given by --name
    #[arg(long)]
    pub save: bool,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, env = "DB_SDL_LOG", default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Default, Args)]
pub struct ConnectionArgs {
    /// Database host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Database port
    #[arg(short = 'o', long)]
    pub port: Option<u16>,

    /// Database user
    #[arg(short, long)]
    pub user: Option<String>,

    /// Database password
    #[arg(short, long)]
    pub password: Option<String>,

    /// Database name
    #[arg(short, long)]
    pub database: Option<String>,

    /// Schema to introspect
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Saved connection profile
    #[arg(short, long)]
    pub name: Option<String>,

    /// Full connection string, replaces host/port/user/password/database
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub url: Option<String>,
}

/// What the tool connects to: the libpq connection string and the schema
/// whose tables are introspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub profile: ConnectionProfile,
    pub connection_string: String,
}

impl ConnectionArgs {
    /// Saved profiles are only read when a profile is named or saved.
    pub fn uses_profiles(&self, saving: bool) -> bool {
        saving || self.name.is_some()
    }

    pub fn load_config(&self, saving: bool) -> Result<Config> {
        if !self.uses_profiles(saving) {
            return Ok(Config::new());
        }
        self.load_config_from(&Config::config_path()?, saving)
    }

    pub fn load_config_from(&self, path: &Path, saving: bool) -> Result<Config> {
        if !self.uses_profiles(saving) {
            return Ok(Config::new());
        }
        Config::load_from(path)
    }

    /// Flags override the named profile, which overrides the defaults.
    /// An unknown profile name is only accepted when it is about to be saved.
    pub fn resolve(&self, config: &Config, saving: bool) -> Result<Target, ConfigError> {
        let mut profile = match &self.name {
            Some(name) => match config.get_connection(name) {
                Some(saved) => saved.clone(),
                None if saving => ConnectionProfile {
                    name: name.clone(),
                    ..ConnectionProfile::new()
                },
                None => return Err(ConfigError::UnknownProfile(name.clone())),
            },
            None if saving => return Err(ConfigError::MissingProfileName),
            None => ConnectionProfile::new(),
        };

        if let Some(host) = &self.host {
            profile.host = host.clone();
        }
        if let Some(port) = self.port {
            profile.port = port;
        }
        if let Some(user) = &self.user {
            profile.user = user.clone();
        }
        if let Some(password) = &self.password {
            profile.password = password.clone();
        }
        if let Some(database) = &self.database {
            profile.database = database.clone();
        }
        if let Some(schema) = &self.schema {
            profile.schema = schema.clone();
        }

        let connection_string = match &self.url {
            Some(url) => url.clone(),
            None => profile.to_connection_string(),
        };

        Ok(Target {
            profile,
            connection_string,
        })
    }
}

/// The error chain as printed on stderr before exiting with status 1.
pub fn failure_message(err: &anyhow::Error) -> String {
    format!("Error: {err:?}")
}
