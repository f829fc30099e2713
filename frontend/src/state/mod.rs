pub mod auth;
pub mod guest;
pub mod token;
pub mod upgrade;
