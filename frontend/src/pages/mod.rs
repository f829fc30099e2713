pub mod admin;
pub mod dashboard;
pub mod guest;
pub mod home;
pub mod login;
pub mod register;
pub mod thread;
