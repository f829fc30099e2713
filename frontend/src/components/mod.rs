pub mod empty_state;
pub mod error;
pub mod guard;
pub mod layout;
pub mod quota_modal;
