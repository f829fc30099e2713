use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::rc::Rc;

use crate::utils::storage::{BrowserStore, MemoryStore, StorageArea};

pub const SESSION_TOKEN_KEY: &str = "userToken";
pub const SESSION_TOKEN_ALT_KEY: &str = "user_token";
pub const LOCAL_TOKEN_KEY: &str = "access_token";
pub const LOCAL_TOKEN_ALT_KEY: &str = "user_token";
pub const TOKEN_COOKIE: &str = "pit_token";
pub const TOKEN_COOKIE_ALT: &str = "access_token";

/// Lookup order for `TokenStore::resolve`; the first non-empty value wins.
pub const TOKEN_SOURCES: [(StorageArea, &str); 6] = [
    (StorageArea::Session, SESSION_TOKEN_KEY),
    (StorageArea::Session, SESSION_TOKEN_ALT_KEY),
    (StorageArea::Local, LOCAL_TOKEN_KEY),
    (StorageArea::Local, LOCAL_TOKEN_ALT_KEY),
    (StorageArea::Cookie, TOKEN_COOKIE),
    (StorageArea::Cookie, TOKEN_COOKIE_ALT),
];

pub const ADMIN_EXPIRY_SKEW_SECS: i64 = 10;

#[derive(Clone)]
pub struct TokenStore {
    backend: Rc<dyn BrowserStore>,
}

impl TokenStore {
    pub fn new(backend: Rc<dyn BrowserStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::new()))
    }

    /// Browser storage on wasm, an in-memory store elsewhere.
    pub fn browser() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let max_age = crate::config::current().token_cookie_max_age_secs();
            Self::new(Rc::new(crate::utils::storage::WebStore::new(max_age)))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::in_memory()
        }
    }

    pub fn backend(&self) -> &Rc<dyn BrowserStore> {
        &self.backend
    }

    fn read(&self, area: StorageArea, key: &str) -> Option<String> {
        self.backend
            .get(area, key)
            .filter(|value| !value.trim().is_empty())
    }

    fn write(&self, area: StorageArea, key: &str, value: &str) {
        if let Err(err) = self.backend.set(area, key, value) {
            log::warn!("token write skipped: {}", err);
        }
    }

    pub fn resolve(&self) -> Option<String> {
        let (position, token) = TOKEN_SOURCES
            .iter()
            .enumerate()
            .find_map(|(idx, (area, key))| self.read(*area, key).map(|token| (idx, token)))?;
        if position > 0 {
            self.normalize(&token);
        }
        Some(token)
    }

    /// Copies `token` into the session key unless that key already holds a value.
    pub fn normalize(&self, token: &str) {
        let (area, key) = TOKEN_SOURCES[0];
        if self.read(area, key).is_none() {
            self.write(area, key, token);
        }
    }

    /// Writes the session key, the local key and the host cookie to the same value.
    pub fn set(&self, token: &str) {
        self.write(StorageArea::Session, SESSION_TOKEN_KEY, token);
        self.write(StorageArea::Local, LOCAL_TOKEN_KEY, token);
        self.write(StorageArea::Cookie, TOKEN_COOKIE, token);
    }

    pub fn clear(&self) {
        for (area, key) in TOKEN_SOURCES {
            if let Err(err) = self.backend.remove(area, key) {
                log::warn!("token clear skipped: {}", err);
            }
        }
    }
}

fn decode_claims(token: &str) -> Option<Value> {
    let mut parts = token.split('.');
    parts.next()?;
    let payload = parts.next()?;
    let decoded = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&decoded).ok()
}

pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let exp = decode_claims(token)?.get("exp")?.as_f64()?;
    DateTime::<Utc>::from_timestamp(exp as i64, 0)
}

/// Admin-scope check: the `exp` claim must lie more than the skew beyond `now`.
pub fn admin_token_is_valid(token: &str, now: DateTime<Utc>) -> bool {
    token_expiry(token)
        .map(|exp| now.timestamp() + ADMIN_EXPIRY_SKEW_SECS < exp.timestamp())
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn jwt_with_claims(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(entries: &[(StorageArea, &str, &str)]) -> TokenStore {
        let store = TokenStore::in_memory();
        for (area, key, value) in entries {
            store.backend().set(*area, key, value).unwrap();
        }
        store
    }

    fn session_value(store: &TokenStore) -> Option<String> {
        store.backend().get(StorageArea::Session, SESSION_TOKEN_KEY)
    }

    #[test]
    fn resolve_returns_none_when_empty() {
        let store = TokenStore::in_memory();
        assert_eq!(store.resolve(), None);
        assert_eq!(session_value(&store), None);
    }

    #[test]
    fn session_key_wins_over_every_other_source() {
        let store = store_with(&[
            (StorageArea::Session, SESSION_TOKEN_KEY, "from-session"),
            (StorageArea::Local, LOCAL_TOKEN_KEY, "from-local"),
            (StorageArea::Cookie, TOKEN_COOKIE, "from-cookie"),
        ]);
        assert_eq!(store.resolve().as_deref(), Some("from-session"));
    }

    #[test]
    fn precedence_follows_source_order() {
        let store = store_with(&[
            (StorageArea::Session, SESSION_TOKEN_ALT_KEY, "session-alt"),
            (StorageArea::Local, LOCAL_TOKEN_KEY, "local"),
        ]);
        assert_eq!(store.resolve().as_deref(), Some("session-alt"));

        let store = store_with(&[
            (StorageArea::Local, LOCAL_TOKEN_ALT_KEY, "local-alt"),
            (StorageArea::Cookie, TOKEN_COOKIE, "cookie"),
        ]);
        assert_eq!(store.resolve().as_deref(), Some("local-alt"));

        let store = store_with(&[
            (StorageArea::Cookie, TOKEN_COOKIE, "cookie"),
            (StorageArea::Cookie, TOKEN_COOKIE_ALT, "cookie-alt"),
        ]);
        assert_eq!(store.resolve().as_deref(), Some("cookie"));

        let store = store_with(&[(StorageArea::Cookie, TOKEN_COOKIE_ALT, "cookie-alt")]);
        assert_eq!(store.resolve().as_deref(), Some("cookie-alt"));
    }

    #[test]
    fn blank_values_are_skipped() {
        let store = store_with(&[
            (StorageArea::Session, SESSION_TOKEN_KEY, "  "),
            (StorageArea::Local, LOCAL_TOKEN_KEY, "from-local"),
        ]);
        assert_eq!(store.resolve().as_deref(), Some("from-local"));
    }

    #[test]
    fn local_only_token_is_normalized_into_session() {
        let store = store_with(&[(StorageArea::Local, LOCAL_TOKEN_KEY, "local-token")]);
        assert_eq!(store.resolve().as_deref(), Some("local-token"));
        assert_eq!(session_value(&store).as_deref(), Some("local-token"));
    }

    #[test]
    fn normalization_never_overwrites_existing_session_value() {
        let store = store_with(&[
            (StorageArea::Session, SESSION_TOKEN_KEY, "existing"),
            (StorageArea::Local, LOCAL_TOKEN_KEY, "local-token"),
        ]);
        store.normalize("local-token");
        assert_eq!(session_value(&store).as_deref(), Some("existing"));
    }

    #[test]
    fn set_writes_all_three_locations() {
        let store = TokenStore::in_memory();
        store.set("fresh");
        let backend = store.backend();
        assert_eq!(
            backend.get(StorageArea::Session, SESSION_TOKEN_KEY).as_deref(),
            Some("fresh")
        );
        assert_eq!(
            backend.get(StorageArea::Local, LOCAL_TOKEN_KEY).as_deref(),
            Some("fresh")
        );
        assert_eq!(
            backend.get(StorageArea::Cookie, TOKEN_COOKIE).as_deref(),
            Some("fresh")
        );
    }

    #[test]
    fn clear_removes_every_source() {
        let store = store_with(&[
            (StorageArea::Session, SESSION_TOKEN_KEY, "a"),
            (StorageArea::Session, SESSION_TOKEN_ALT_KEY, "b"),
            (StorageArea::Local, LOCAL_TOKEN_KEY, "c"),
            (StorageArea::Local, LOCAL_TOKEN_ALT_KEY, "d"),
            (StorageArea::Cookie, TOKEN_COOKIE, "e"),
            (StorageArea::Cookie, TOKEN_COOKIE_ALT, "f"),
        ]);
        store.clear();
        assert_eq!(store.resolve(), None);
    }

    #[test]
    fn admin_token_requires_expiry_beyond_skew() {
        let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let valid = jwt_with_claims(json!({ "sub": "root", "exp": 1_700_000_060 }));
        let inside_skew = jwt_with_claims(json!({ "sub": "root", "exp": 1_700_000_010 }));
        let expired = jwt_with_claims(json!({ "sub": "root", "exp": 1_699_999_000 }));
        let no_exp = jwt_with_claims(json!({ "sub": "root" }));

        assert!(admin_token_is_valid(&valid, now));
        assert!(!admin_token_is_valid(&inside_skew, now));
        assert!(!admin_token_is_valid(&expired, now));
        assert!(!admin_token_is_valid(&no_exp, now));
        assert!(!admin_token_is_valid("opaque-token", now));
    }

    #[test]
    fn token_expiry_reads_exp_claim() {
        let token = jwt_with_claims(json!({ "exp": 1_700_000_000 }));
        assert_eq!(
            token_expiry(&token).map(|dt| dt.timestamp()),
            Some(1_700_000_000)
        );
    }
}
