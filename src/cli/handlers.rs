use std::io::{self, Read};
use std::path::Path;

use tracing_subscriber::EnvFilter;

use super::commands::{AdminArgs, ServeArgs};
use crate::auth;
use crate::config::Config;
use crate::error::{NotedeckError, Result};
use crate::server;
use crate::storage::SqliteStore;

fn init_tracing() {
    // Already initialized in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,notedeck=debug")),
        )
        .try_init();
}

pub fn handle_serve(args: ServeArgs) -> Result<()> {
    init_tracing();
    let config = args.into_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(config))
}

pub fn handle_init(database: &Path, admin: AdminArgs) -> Result<()> {
    let store = SqliteStore::open(database)?;
    let config = Config {
        database: database.to_path_buf(),
        admin_username: admin.admin_username,
        admin_password: admin.admin_password,
        ..Config::default()
    };

    let created = server::seed_admin(&store, &config)?;

    println!("Initialized database at {}", database.display());
    if created {
        println!("  admin account '{}' created", config.admin_username);
    } else {
        println!("  admin account '{}' already exists", config.admin_username);
    }
    Ok(())
}

fn read_password(password: Option<String>, stdin: bool) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    if stdin {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        return Ok(input.trim_end_matches(['\r', '\n']).to_string());
    }
    Err(NotedeckError::BadRequest(
        "Provide a password with --password or --stdin".to_string(),
    ))
}

pub fn handle_user_add(
    database: &Path,
    username: String,
    admin: bool,
    password: Option<String>,
    stdin: bool,
) -> Result<()> {
    let password = read_password(password, stdin)?;
    let mut user = auth::new_account(&username, &password)?;
    user.is_admin = admin;

    let store = SqliteStore::open(database)?;
    let id = store.add_user(&user)?;

    let role = if admin { "admin" } else { "user" };
    println!("Created {} {} ({})", role, user.username, id);
    Ok(())
}

pub fn handle_user_promote(database: &Path, username: String) -> Result<()> {
    let store = SqliteStore::open(database)?;
    let user = store
        .find_user_by_username(&username)?
        .ok_or_else(|| NotedeckError::NotFound(format!("User '{}'", username)))?;

    if user.is_admin {
        println!("{} is already an admin", user.username);
        return Ok(());
    }

    store.set_admin(user.id, true)?;
    println!("Promoted {} to admin", user.username);
    Ok(())
}

pub fn handle_user_list(database: &Path, json: bool) -> Result<()> {
    let store = SqliteStore::open(database)?;
    let users = store.list_users()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
    } else if users.is_empty() {
        println!("No users found.");
    } else {
        println!("Users:\n");
        for u in users {
            let flag = if u.is_admin { " [admin]" } else { "" };
            println!("  {:>4} {}{} ({})", u.id, u.username, flag, u.theme);
        }
    }
    Ok(())
}
