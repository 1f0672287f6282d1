//! Credential storage for the Bravia remote tools.
//!
//! The television needs exactly two connection details: its LAN
//! address and the pre-shared key it authenticates `IRCC` requests
//! with. This crate persists them — address (and optionally the PSK)
//! in a TOML config file merged with `BRAVIA_*` environment
//! variables via figment, PSK preferentially in the system keyring —
//! and exposes them to the core through the
//! [`CredentialStore`](bravia_core::CredentialStore) seam.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use bravia_core::CredentialStore;

const KEYRING_SERVICE: &str = "bravia";
const KEYRING_USER: &str = "psk";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(Box<figment::Error>),

    #[error("failed to write config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("keyring access failed: {message}")]
    Keyring { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config file ─────────────────────────────────────────────────────

/// On-disk shape of `config.toml`. Both slots optional; `None` and
/// empty string both mean "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// TV address (`host` or `host:port`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Plaintext PSK fallback for systems without a usable keyring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psk: Option<String>,
}

/// Default config file location: `{config_dir}/bravia/config.toml`.
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "bravia")
        .map_or_else(|| PathBuf::from(".bravia.toml"), |dirs| {
            dirs.config_dir().join("config.toml")
        })
}

/// Load configuration from an explicit file path merged with
/// `BRAVIA_*` environment variables (env wins).
pub fn load_config_from(path: &Path) -> Result<ConfigFile, ConfigError> {
    Ok(Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("BRAVIA_"))
        .extract()?)
}

/// Load configuration from the default location.
pub fn load_config() -> Result<ConfigFile, ConfigError> {
    load_config_from(&config_path())
}

/// Load configuration, falling back to defaults on any error.
pub fn load_config_or_default() -> ConfigFile {
    load_config().unwrap_or_else(|err| {
        warn!(error = %err, "config load failed, using defaults");
        ConfigFile::default()
    })
}

/// Write the config file, creating parent directories as needed.
pub fn save_config_to(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Write the config file to the default location.
pub fn save_config(config: &ConfigFile) -> Result<(), ConfigError> {
    save_config_to(&config_path(), config)
}

// ── PSK storage choice ──────────────────────────────────────────────

/// Where to keep the pre-shared key at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PskStorage {
    /// System keyring (preferred).
    Keyring,
    /// Plaintext field in the config file.
    PlainFile,
}

fn keyring_entry() -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, KEYRING_USER).map_err(|e| ConfigError::Keyring {
        message: e.to_string(),
    })
}

/// Read the PSK from the keyring; `None` when absent or unusable
/// (callers fall back to the config file).
fn keyring_psk() -> Option<String> {
    match keyring_entry().and_then(|entry| {
        entry.get_password().map_err(|e| ConfigError::Keyring {
            message: e.to_string(),
        })
    }) {
        Ok(psk) => Some(psk),
        Err(err) => {
            debug!(error = %err, "keyring PSK unavailable");
            None
        }
    }
}

// ── Durable credential store ────────────────────────────────────────

#[derive(Debug, Default)]
struct Snapshot {
    address: String,
    psk: String,
}

/// File/keyring-backed implementation of the core's credential seam.
///
/// Reads are served from an in-memory snapshot (the relay reads on
/// every request and must not block on I/O); setters persist first,
/// then refresh the snapshot.
pub struct StoredCredentials {
    path: PathBuf,
    snapshot: RwLock<Snapshot>,
}

impl StoredCredentials {
    /// Load from the default config location (plus env + keyring).
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path())
    }

    /// Load from an explicit config file path.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let config = load_config_from(&path)?;
        let address = config.address.unwrap_or_default();
        let psk = keyring_psk()
            .or(config.psk)
            .unwrap_or_default();
        Ok(Self {
            path,
            snapshot: RwLock::new(Snapshot { address, psk }),
        })
    }

    /// Persist a new TV address and refresh the snapshot.
    pub fn set_address(&self, address: &str) -> Result<(), ConfigError> {
        let mut config = load_config_from(&self.path).unwrap_or_default();
        config.address = Some(address.to_string());
        save_config_to(&self.path, &config)?;
        self.snapshot
            .write()
            .expect("credentials lock poisoned")
            .address = address.to_string();
        Ok(())
    }

    /// Persist a new PSK in the chosen backend and refresh the
    /// snapshot. Storing in the keyring clears any plaintext copy.
    pub fn set_psk(&self, psk: &SecretString, storage: PskStorage) -> Result<(), ConfigError> {
        match storage {
            PskStorage::Keyring => {
                keyring_entry()?
                    .set_password(psk.expose_secret())
                    .map_err(|e| ConfigError::Keyring {
                        message: e.to_string(),
                    })?;
                let mut config = load_config_from(&self.path).unwrap_or_default();
                if config.psk.take().is_some() {
                    save_config_to(&self.path, &config)?;
                }
            }
            PskStorage::PlainFile => {
                let mut config = load_config_from(&self.path).unwrap_or_default();
                config.psk = Some(psk.expose_secret().to_string());
                save_config_to(&self.path, &config)?;
            }
        }
        self.snapshot
            .write()
            .expect("credentials lock poisoned")
            .psk = psk.expose_secret().to_string();
        Ok(())
    }
}

impl CredentialStore for StoredCredentials {
    fn address(&self) -> String {
        self.snapshot
            .read()
            .expect("credentials lock poisoned")
            .address
            .clone()
    }

    fn token(&self) -> SecretString {
        SecretString::from(
            self.snapshot
                .read()
                .expect("credentials lock poisoned")
                .psk
                .clone(),
        )
    }
}
