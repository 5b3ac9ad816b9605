use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

fn default_schema() -> String {
    "public".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionProfile {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionProfile {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            schema: default_schema(),
        }
    }

    pub fn to_connection_string(&self) -> String {
        let mut parts = vec![
            format!("host={}", quote_value(&self.host)),
            format!("port={}", self.port),
            format!("user={}", quote_value(&self.user)),
        ];
        if !self.password.is_empty() {
            parts.push(format!("password={}", quote_value(&self.password)));
        }
        parts.push(format!("dbname={}", quote_value(&self.database)));
        parts.join(" ")
    }
}

// libpq key/value strings need quoting once a value has spaces or quotes
fn quote_value(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\'', '\\']) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub connections: Vec<ConnectionProfile>,
    #[serde(default)]
    pub last_connection: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            connections: vec![],
            last_connection: None,
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)?;
        Ok(home.join(".config").join("db-sdl").join("config.json"))
    }

    pub fn get_connection(&self, name: &str) -> Option<&ConnectionProfile> {
        self.connections.iter().find(|c| c.name == name)
    }

    /// Replaces the profile with the same name, or appends it.
    pub fn upsert_connection(&mut self, profile: ConnectionProfile) {
        match self.connections.iter_mut().find(|c| c.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.connections.push(profile),
        }
    }

    pub fn set_last_connection(&mut self, name: &str) {
        self.last_connection = Some(name.to_string());
    }

    pub fn get_last_connection(&self) -> Option<&ConnectionProfile> {
        self.last_connection
            .as_deref()
            .and_then(|name| self.get_connection(name))
    }
}
