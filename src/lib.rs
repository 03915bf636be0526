pub mod auth;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod server;
pub mod storage;
pub mod uploads;

pub use config::Config;
pub use error::{NotedeckError, Result};
pub use storage::SqliteStore;
