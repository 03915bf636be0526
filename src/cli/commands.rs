use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};

#[derive(Parser, Debug)]
#[command(name = "notedeck")]
#[command(version, about = "Notes, tasks and a public feed behind a small web server")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Create the database schema and seed the admin account
    Init {
        #[command(flatten)]
        database: DatabaseArgs,

        #[command(flatten)]
        admin: AdminArgs,
    },

    /// Manage user accounts
    User(UserCommand),
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// SQLite database file
    #[arg(long, global = true, env = "NOTEDECK_DATABASE", default_value = "notedeck.db")]
    pub database: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct AdminArgs {
    /// Name of the admin account seeded when missing
    #[arg(long, env = "NOTEDECK_ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Password for a newly seeded admin account
    #[arg(long, env = "NOTEDECK_ADMIN_PASSWORD", default_value = "adminpass", hide_env_values = true)]
    pub admin_password: String,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "NOTEDECK_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Directory for uploaded media and note images
    #[arg(long, env = "NOTEDECK_UPLOAD_DIR", default_value = "static/uploads")]
    pub upload_dir: PathBuf,

    /// Maximum request body size in bytes
    #[arg(long, env = "NOTEDECK_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[command(flatten)]
    pub admin: AdminArgs,

    /// Mark the session cookie Secure (serve over HTTPS)
    #[arg(long, env = "NOTEDECK_SECURE_COOKIES")]
    pub secure_cookies: bool,

    /// Minutes of inactivity before a session expires
    #[arg(long, env = "NOTEDECK_SESSION_IDLE_MINUTES", default_value_t = 60 * 24 * 7)]
    pub session_idle_minutes: i64,
}

impl ServeArgs {
    pub fn into_config(self) -> Config {
        Config {
            bind: self.bind,
            database: self.database.database,
            upload_dir: self.upload_dir,
            max_upload_bytes: self.max_upload_bytes,
            admin_username: self.admin.admin_username,
            admin_password: self.admin.admin_password,
            secure_cookies: self.secure_cookies,
            session_idle_minutes: self.session_idle_minutes,
        }
    }
}

#[derive(Args, Debug)]
pub struct UserCommand {
    #[command(subcommand)]
    pub action: UserAction,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    /// Create an account
    Add {
        /// Login name
        username: String,

        /// Give the account admin rights
        #[arg(long)]
        admin: bool,

        /// Password on the command line
        #[arg(long, conflicts_with = "stdin")]
        password: Option<String>,

        /// Read the password from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Grant admin rights to an existing account
    Promote {
        username: String,
    },

    /// List accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
