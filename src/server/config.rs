//! HTTP server configuration object and runtime settings.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use url::Url;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;

/// Errors raised while loading the session signing key.
#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    /// Reading the session key file failed and no fallback is permitted.
    #[error("failed to read session key at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short to derive a key from.
    #[error(
        "session key at {} too short: need >= {SESSION_KEY_MIN_LEN} bytes, got {length}",
        path.display()
    )]
    TooShort { path: PathBuf, length: usize },
}

/// Runtime settings loaded from environment, file, and CLI layers.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PHOTOFEED")]
pub struct Settings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// Mark session cookies `Secure`; disable only for local development.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Base URL of the auth collaborator.
    pub auth_url: Option<Url>,
    /// Base URL of the avatar storage collaborator.
    pub storage_url: Option<Url>,
    /// Base URL of the profile data API.
    pub profile_api_url: Option<Url>,
    /// Request timeout applied to every collaborator call, in seconds.
    pub upstream_timeout_secs: Option<u64>,
    /// File the session signing key is read from.
    pub session_key_file: Option<PathBuf>,
    /// Permit an ephemeral session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
}

impl Settings {
    /// Return the configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Return the collaborator request timeout, falling back to the default.
    #[must_use]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(
            self.upstream_timeout_secs
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Return the session key file path, falling back to the default.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Load the session signing key from the configured file.
    ///
    /// A missing or unreadable file falls back to an ephemeral key in debug
    /// builds or when explicitly permitted. A file that exists but holds
    /// fewer than [`SESSION_KEY_MIN_LEN`] bytes is always an error. Key
    /// bytes are zeroed after derivation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionKeyError`] when the file is too short, or unreadable
    /// with no fallback permitted.
    pub fn session_key(&self) -> Result<Key, SessionKeyError> {
        let path = self.session_key_file();
        match std::fs::read(&path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < SESSION_KEY_MIN_LEN {
                    bytes.zeroize();
                    return Err(SessionKeyError::TooShort { path, length });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(source) => {
                if cfg!(debug_assertions) || self.session_allow_ephemeral {
                    warn!(
                        path = %path.display(),
                        error = %source,
                        "using temporary session key (dev only)"
                    );
                    Ok(Key::generate())
                } else {
                    Err(SessionKeyError::Read { path, source })
                }
            }
        }
    }

    /// Return the collaborator base URLs when all three are configured.
    ///
    /// Partial configuration is treated as none at all; the server then runs
    /// against fixture adapters rather than half a real stack.
    #[must_use]
    pub fn collaborators(&self) -> Option<CollaboratorEndpoints> {
        match (&self.auth_url, &self.storage_url, &self.profile_api_url) {
            (Some(auth), Some(storage), Some(profile_api)) => Some(CollaboratorEndpoints {
                auth: auth.clone(),
                storage: storage.clone(),
                profile_api: profile_api.clone(),
                timeout: self.upstream_timeout(),
            }),
            _ => None,
        }
    }
}

/// Base URLs and timeout for the three outbound collaborators.
#[derive(Debug, Clone)]
pub struct CollaboratorEndpoints {
    pub auth: Url,
    pub storage: Url,
    pub profile_api: Url,
    pub timeout: Duration,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) collaborators: Option<CollaboratorEndpoints>,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            collaborators: None,
        }
    }

    /// Attach collaborator endpoints for the outbound HTTP adapters.
    ///
    /// When absent, the server wires fixture adapters instead.
    #[must_use]
    pub fn with_collaborators(mut self, endpoints: Option<CollaboratorEndpoints>) -> Self {
        self.collaborators = endpoints;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
