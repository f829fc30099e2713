pub mod composer;
pub mod transcript;
