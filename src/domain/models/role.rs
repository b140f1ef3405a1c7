use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    /// Backend history records carry roles as plain strings. Anything
    /// unrecognized is rendered as an assistant message rather than dropped.
    pub fn parse(text: &str) -> Role {
        match text {
            "user" => return Role::User,
            "system" => return Role::System,
            _ => return Role::Assistant,
        }
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::User => return Config::get(ConfigKey::Username),
            Role::Assistant => return String::from("Luminous"),
            Role::System => return String::from("System"),
        }
    }
}
