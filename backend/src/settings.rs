//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `MOUNT_MANAGER_*` environment variables or the matching
//! CLI flags. Every field is optional; accessors supply the defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_PATH: &str = "/var/run/secrets/session_key";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECTION_TIMEOUT_SECS: u64 = 30;
/// Cookie keys need 64 bytes of master material.
const SESSION_KEY_MIN_LEN: usize = 64;

/// Failures turning settings into runtime values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },
    /// `session_same_site` names no known policy.
    #[error("invalid same-site policy '{value}'; expected Strict, Lax or None")]
    SameSite {
        /// Configured value.
        value: String,
    },
    /// `SameSite=None` was requested without secure cookies.
    #[error("same-site policy None requires secure cookies")]
    InsecureSameSiteNone,
    /// The session key file could not be read.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The session key file holds too few bytes.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes found.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MOUNT_MANAGER")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Seconds to wait for a pooled connection before failing.
    pub db_connection_timeout_secs: Option<u64>,
    /// File holding the cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark session cookies `Secure`.
    #[ortho_config(default = true)]
    pub session_cookie_secure: bool,
    /// `Strict`, `Lax` or `None`.
    pub session_same_site: Option<String>,
}

impl ServerSettings {
    /// Socket address to listen on.
    ///
    /// # Errors
    /// [`SettingsError::BindAddr`] when the configured value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring a blank value.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size.
    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Pool checkout timeout.
    #[must_use]
    pub fn db_connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connection_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECTION_TIMEOUT_SECS),
        )
    }

    /// File holding the session signing key.
    #[must_use]
    pub fn session_key_path(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_PATH))
    }

    /// Same-site policy, defaulting to `Lax`.
    pub fn same_site(&self) -> Result<SameSite, SettingsError> {
        let Some(value) = self.session_same_site.as_deref() else {
            return Ok(SameSite::Lax);
        };
        match value.to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" if self.session_cookie_secure => Ok(SameSite::None),
            "none" => Err(SettingsError::InsecureSameSiteNone),
            _ => Err(SettingsError::SameSite {
                value: value.to_owned(),
            }),
        }
    }

    /// Load the cookie key from the key file.
    ///
    /// An unreadable file falls back to a generated key in debug builds or
    /// when ephemeral keys are allowed. A short key is always an error.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_path();
        match std::fs::read(path) {
            Ok(mut bytes) => {
                let length = bytes.len();
                if length < SESSION_KEY_MIN_LEN {
                    bytes.zeroize();
                    return Err(SettingsError::KeyTooShort {
                        path: path.to_owned(),
                        length,
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                let key = Key::derive_from(&bytes);
                bytes.zeroize();
                Ok(key)
            }
            Err(source) if cfg!(debug_assertions) || self.session_allow_ephemeral => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_owned(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Settings parsing against a locked process environment.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;
    use uuid::Uuid;

    const VARS: [&str; 8] = [
        "MOUNT_MANAGER_BIND_ADDR",
        "MOUNT_MANAGER_DATABASE_URL",
        "MOUNT_MANAGER_DB_MAX_CONNECTIONS",
        "MOUNT_MANAGER_DB_CONNECTION_TIMEOUT_SECS",
        "MOUNT_MANAGER_SESSION_KEY_FILE",
        "MOUNT_MANAGER_SESSION_ALLOW_EPHEMERAL",
        "MOUNT_MANAGER_SESSION_COOKIE_SECURE",
        "MOUNT_MANAGER_SESSION_SAME_SITE",
    ];

    fn load() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("mount-manager")])
            .expect("settings should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    struct KeyFile(PathBuf);

    impl KeyFile {
        fn new(len: usize) -> Self {
            let path = std::env::temp_dir().join(format!("mount-manager-key-{}", Uuid::new_v4()));
            std::fs::write(&path, vec![b'k'; len]).expect("write key file");
            Self(path)
        }
    }

    impl Drop for KeyFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());
        let settings = load();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
        assert_eq!(settings.db_connection_timeout(), Duration::from_secs(30));
        assert!(settings.session_cookie_secure);
        assert!(!settings.session_allow_ephemeral);
        assert_eq!(settings.same_site().expect("default"), SameSite::Lax);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.extend([
            ("MOUNT_MANAGER_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "MOUNT_MANAGER_DATABASE_URL",
                Some("postgres://localhost/mounts".to_owned()),
            ),
            ("MOUNT_MANAGER_DB_MAX_CONNECTIONS", Some("3".to_owned())),
            ("MOUNT_MANAGER_SESSION_SAME_SITE", Some("strict".to_owned())),
        ]);
        let _guard = lock_env(vars);
        let settings = load();

        assert_eq!(settings.bind_addr().expect("valid").port(), 9000);
        assert_eq!(settings.database_url(), Some("postgres://localhost/mounts"));
        assert_eq!(settings.db_max_connections(), 3);
        assert_eq!(settings.same_site().expect("valid"), SameSite::Strict);
    }

    #[rstest]
    fn blank_database_url_means_memory_store() {
        let mut vars = cleared();
        vars.push(("MOUNT_MANAGER_DATABASE_URL", Some("  ".to_owned())));
        let _guard = lock_env(vars);
        assert_eq!(load().database_url(), None);
    }

    #[rstest]
    fn same_site_none_requires_secure_cookies() {
        let mut vars = cleared();
        vars.extend([
            ("MOUNT_MANAGER_SESSION_SAME_SITE", Some("None".to_owned())),
            ("MOUNT_MANAGER_SESSION_COOKIE_SECURE", Some("false".to_owned())),
        ]);
        let _guard = lock_env(vars);
        assert!(matches!(
            load().same_site(),
            Err(SettingsError::InsecureSameSiteNone)
        ));
    }

    #[rstest]
    fn short_session_key_is_rejected() {
        let key_file = KeyFile::new(16);
        let mut vars = cleared();
        vars.push((
            "MOUNT_MANAGER_SESSION_KEY_FILE",
            Some(key_file.0.to_string_lossy().into_owned()),
        ));
        let _guard = lock_env(vars);
        assert!(matches!(
            load().session_key(),
            Err(SettingsError::KeyTooShort { length: 16, .. })
        ));
    }

    #[rstest]
    fn long_session_key_is_loaded() {
        let key_file = KeyFile::new(SESSION_KEY_MIN_LEN);
        let mut vars = cleared();
        vars.push((
            "MOUNT_MANAGER_SESSION_KEY_FILE",
            Some(key_file.0.to_string_lossy().into_owned()),
        ));
        let _guard = lock_env(vars);
        assert!(load().session_key().is_ok());
    }

    #[rstest]
    fn missing_key_file_is_ephemeral_when_allowed() {
        let mut vars = cleared();
        vars.extend([
            (
                "MOUNT_MANAGER_SESSION_KEY_FILE",
                Some("/nonexistent/mount-manager/key".to_owned()),
            ),
            ("MOUNT_MANAGER_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
        ]);
        let _guard = lock_env(vars);
        assert!(load().session_key().is_ok());
    }
}
