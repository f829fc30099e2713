use crate::api::{ApiError, LoginRequest};
use leptos::*;
use serde_json::json;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm: RwSignal<String>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            username: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            confirm: create_rw_signal(String::new()),
        }
    }
}

impl RegisterFormState {
    pub fn to_request(&self) -> Result<LoginRequest, ApiError> {
        let username = self.username.get_untracked().trim().to_string();
        let password = self.password.get_untracked();
        let problems = validate_registration(&username, &password, &self.confirm.get_untracked());
        if !problems.is_empty() {
            return Err(ApiError {
                details: Some(json!({ "fields": problems })),
                ..ApiError::validation("Please fix the highlighted fields")
            });
        }
        Ok(LoginRequest { username, password })
    }

    pub fn clear_secrets(&self) {
        self.password.set(String::new());
        self.confirm.set(String::new());
    }
}

/// Returns every problem at once so the form can list them together.
pub fn validate_registration(username: &str, password: &str, confirm: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if !is_valid_email(username) {
        problems.push("Username must be a valid email address".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        problems.push("Password must contain a letter and a digit".to_string());
    }
    if password != confirm {
        problems.push("Passwords do not match".to_string());
    }
    problems
}

pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}
