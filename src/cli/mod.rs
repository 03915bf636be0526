mod commands;
mod handlers;

pub use commands::{AdminArgs, Cli, Commands, DatabaseArgs, ServeArgs, UserAction, UserCommand};
pub use handlers::{
    handle_init, handle_serve, handle_user_add, handle_user_list, handle_user_promote,
};
