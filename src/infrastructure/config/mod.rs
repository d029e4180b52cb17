use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::security::keyring::KeyringManager;

pub const CONFIG_FILE: &str = "bandcoach.toml";
pub const ENV_PREFIX: &str = "BANDCOACH_";
pub const KEYRING_SERVICE: &str = "bandcoach";
pub const KEYRING_ENTRY: &str = "API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LLMConfig,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            llm: LLMConfig::default(),
            api_key: None,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then the TOML file, then `BANDCOACH_*` variables (`__` separates nested keys).
    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment(CONFIG_FILE))
    }
}

/// A named place an API key may come from.
pub trait CredentialProvider: Send + Sync {
    fn name(&self) -> String;
    fn lookup(&self) -> Option<String>;
}

pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: &str) -> Self {
        Self {
            var: var.to_string(),
        }
    }
}

impl CredentialProvider for EnvCredential {
    fn name(&self) -> String {
        self.var.clone()
    }

    fn lookup(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

/// A key already present in loaded settings.
pub struct SettingsCredential {
    label: String,
    value: Option<String>,
}

impl SettingsCredential {
    pub fn new(label: &str, value: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

impl CredentialProvider for SettingsCredential {
    fn name(&self) -> String {
        self.label.clone()
    }

    fn lookup(&self) -> Option<String> {
        self.value.clone()
    }
}

pub struct KeyringCredential {
    keyring: KeyringManager,
    entry: String,
}

impl KeyringCredential {
    pub fn new(service: &str, entry: &str) -> Self {
        Self {
            keyring: KeyringManager::new(service),
            entry: entry.to_string(),
        }
    }
}

impl CredentialProvider for KeyringCredential {
    fn name(&self) -> String {
        format!("keyring {}/{}", self.keyring.service(), self.entry)
    }

    fn lookup(&self) -> Option<String> {
        match self.keyring.get_secret(&self.entry) {
            Ok(secret) => Some(secret),
            Err(err) => {
                debug!(error = %err, "No API key in keyring");
                None
            }
        }
    }
}

/// Queries providers in order until one yields a non-blank key.
pub struct CredentialResolver {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialResolver {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// `API_KEY`, `VITE_API_KEY`, the settings value, then the OS keyring.
    pub fn standard(settings: &Settings) -> Self {
        Self::new(vec![
            Box::new(EnvCredential::new("API_KEY")),
            Box::new(EnvCredential::new("VITE_API_KEY")),
            Box::new(SettingsCredential::new(
                &format!("api_key in {} (or {}API_KEY)", CONFIG_FILE, ENV_PREFIX),
                settings.api_key.clone(),
            )),
            Box::new(KeyringCredential::new(KEYRING_SERVICE, KEYRING_ENTRY)),
        ])
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    pub fn resolve(&self) -> Result<String> {
        for provider in &self.providers {
            if let Some(value) = provider.lookup() {
                let value = value.trim();
                if !value.is_empty() {
                    debug!(provider = %provider.name(), "Resolved API key");
                    return Ok(value.to_string());
                }
            }
        }

        Err(AppError::Configuration(format!(
            "API key is missing. Set one of (checked in order): {}",
            self.provider_names().join(", ")
        )))
    }
}
