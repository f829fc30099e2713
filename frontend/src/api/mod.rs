mod auth;
pub mod client;
mod figures;
mod guest;
mod threads;
pub mod types;

pub use client::*;
pub use types::*;
