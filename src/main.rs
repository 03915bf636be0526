use clap::Parser;
use notedeck::cli::{
    handle_init, handle_serve, handle_user_add, handle_user_list, handle_user_promote, Cli,
    Commands, UserAction,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => handle_serve(args),
        Commands::Init { database, admin } => handle_init(&database.database, admin),
        Commands::User(user_cmd) => {
            let db = user_cmd.database.database;
            match user_cmd.action {
                UserAction::Add {
                    username,
                    admin,
                    password,
                    stdin,
                } => handle_user_add(&db, username, admin, password, stdin),
                UserAction::Promote { username } => handle_user_promote(&db, username),
                UserAction::List { json } => handle_user_list(&db, json),
            }
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
