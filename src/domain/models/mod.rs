mod action;
mod event;
mod gateway;
mod loading;
mod message;
mod model;
mod role;
mod session;
mod slash_commands;
mod textarea;

pub use action::*;
pub use event::*;
pub use gateway::*;
pub use loading::*;
pub use message::*;
pub use model::*;
pub use role::*;
pub use session::*;
pub use slash_commands::*;
pub use textarea::*;
