pub mod components;
pub mod view_model;

mod panel;

pub use panel::{GuestChatPage, GuestChatPanel};
