// src/entity/user.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/100";
pub const DEFAULT_BIO: &str = "Creative coder & coffee-fueled note taker 🌿";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Purple,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::Purple => write!(f, "purple"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "purple" => Ok(Theme::Purple),
            _ => Err(format!("Invalid theme: {}", s)),
        }
    }
}

/// An account. The password hash is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub theme: Theme,
    pub avatar_url: String,
    pub bio: String,
}

impl User {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0,
            username,
            password_hash,
            is_admin: false,
            theme: Theme::default(),
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            bio: DEFAULT_BIO.to_string(),
        }
    }
}
