// ── Credential seam ──
//
// The relay reads connection details through this trait so the
// durable store (bravia-config: TOML + keyring) and tests can supply
// interchangeable implementations. Empty string denotes "unset" on
// both slots.

use std::sync::Mutex;

use secrecy::SecretString;

/// Read access to the two connection slots: TV address and pre-shared
/// key. Writes are an implementation concern (the config crate exposes
/// its own setters); the relay only ever reads.
pub trait CredentialStore: Send + Sync {
    /// The TV's LAN address (`host` or `host:port`). Empty when unset.
    fn address(&self) -> String;

    /// The pre-shared key sent as `X-Auth-PSK`. Empty when unset.
    fn token(&self) -> SecretString;
}

/// In-memory credential store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    address: Mutex<String>,
    token: Mutex<String>,
}

impl MemoryCredentials {
    pub fn new(address: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            address: Mutex::new(address.into()),
            token: Mutex::new(token.into()),
        }
    }

    pub fn set_address(&self, address: impl Into<String>) {
        *self.address.lock().expect("address lock poisoned") = address.into();
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.lock().expect("token lock poisoned") = token.into();
    }
}

impl CredentialStore for MemoryCredentials {
    fn address(&self) -> String {
        self.address.lock().expect("address lock poisoned").clone()
    }

    fn token(&self) -> SecretString {
        SecretString::from(self.token.lock().expect("token lock poisoned").clone())
    }
}
