mod note;
mod task;
mod upload;
mod user;
mod vote;

pub use note::{Note, NoteView, PublicFilter};
pub use task::{Task, UNCATEGORIZED};
pub use upload::{MediaKind, Upload};
pub use user::{Theme, User, DEFAULT_AVATAR_URL, DEFAULT_BIO};
pub use vote::{VoteDirection, VoteOutcome};
