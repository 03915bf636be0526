//! Server configuration.
//!
//! Every setting has a default so the server can start with zero
//! configuration for local development. The CLI fills this in from flags and
//! `NOTEDECK_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default maximum request body size (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address for the HTTP server.
    /// Default: `127.0.0.1:5000`
    pub bind: SocketAddr,

    /// SQLite database file.
    /// Default: `notedeck.db`
    pub database: PathBuf,

    /// Directory uploaded media and note images are written to.
    /// Default: `static/uploads`
    pub upload_dir: PathBuf,

    /// Maximum request body size in bytes.
    pub max_upload_bytes: usize,

    /// Name of the admin account seeded on first start.
    pub admin_username: String,

    /// Password for the seeded admin account. Only used when the account
    /// does not exist yet.
    pub admin_password: String,

    /// Mark the session cookie `Secure` (requires HTTPS).
    pub secure_cookies: bool,

    /// Sessions expire after this many minutes without a request.
    pub session_idle_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: ([127, 0, 0, 1], 5000).into(),
            database: PathBuf::from("notedeck.db"),
            upload_dir: PathBuf::from("static/uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            admin_username: "admin".to_string(),
            admin_password: "adminpass".to_string(),
            secure_cookies: false,
            session_idle_minutes: 60 * 24 * 7,
        }
    }
}

impl Config {
    /// True when the seeded admin still uses the shipped default password
    pub fn uses_default_admin_password(&self) -> bool {
        self.admin_password == Config::default().admin_password
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind, ([127, 0, 0, 1], 5000).into());
        assert_eq!(config.upload_dir, PathBuf::from("static/uploads"));
        assert_eq!(config.admin_username, "admin");
        assert!(config.uses_default_admin_password());
        assert!(!config.secure_cookies);
    }

    #[test]
    fn test_custom_admin_password() {
        let config = Config {
            admin_password: "s3cret".to_string(),
            ..Config::default()
        };
        assert!(!config.uses_default_admin_password());
    }
}
