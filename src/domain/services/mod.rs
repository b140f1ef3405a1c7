pub mod actions;
mod app_state;
mod conversation;
mod directory;
pub mod events;
mod feed;
mod scroll;

pub use app_state::*;
pub use conversation::*;
pub use directory::*;
pub use feed::*;
pub use scroll::*;
