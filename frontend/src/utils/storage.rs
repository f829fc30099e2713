use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::{cell::RefCell, collections::HashMap, rc::Rc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    Session,
    Local,
    Cookie,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("no window object")]
    NoWindow,
    #[error("{0:?} storage is unavailable")]
    Unavailable(StorageArea),
    #[error("failed to write {key} to {area:?} storage")]
    WriteFailed { area: StorageArea, key: String },
}

/// Key/value access to the browser's persistence layers.
pub trait BrowserStore {
    fn get(&self, area: StorageArea, key: &str) -> Option<String>;
    fn set(&self, area: StorageArea, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, area: StorageArea, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<(StorageArea, String), String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BrowserStore for MemoryStore {
    fn get(&self, area: StorageArea, key: &str) -> Option<String> {
        self.entries.borrow().get(&(area, key.to_string())).cloned()
    }

    fn set(&self, area: StorageArea, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert((area, key.to_string()), value.to_string());
        Ok(())
    }

    fn remove(&self, area: StorageArea, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(&(area, key.to_string()));
        Ok(())
    }
}

const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

pub fn encode_cookie_value(value: &str) -> String {
    utf8_percent_encode(value, COOKIE_VALUE).to_string()
}

/// Finds `name` in a `document.cookie` style string.
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key.trim() != name {
            return None;
        }
        let decoded = percent_decode_str(value.trim()).decode_utf8().ok()?;
        Some(decoded.into_owned())
    })
}

/// Host-scoped cookie: no `Domain` attribute, so it is shared across ports.
pub fn format_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!(
        "{}={}; path=/; max-age={}; SameSite=Lax",
        name,
        encode_cookie_value(value),
        max_age_secs
    )
}

pub fn format_expired_cookie(name: &str) -> String {
    format!("{}=; path=/; max-age=0; SameSite=Lax", name)
}

#[cfg(target_arch = "wasm32")]
pub use web::WebStore;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{format_cookie, format_expired_cookie, parse_cookie, BrowserStore, StorageArea, StorageError};
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlDocument, Storage, Window};

    #[derive(Debug, Clone, Copy)]
    pub struct WebStore {
        cookie_max_age_secs: u64,
    }

    impl WebStore {
        pub fn new(cookie_max_age_secs: u64) -> Self {
            Self {
                cookie_max_age_secs,
            }
        }
    }

    fn window() -> Result<Window, StorageError> {
        web_sys::window().ok_or(StorageError::NoWindow)
    }

    fn storage(area: StorageArea) -> Result<Storage, StorageError> {
        let w = window()?;
        let storage = match area {
            StorageArea::Session => w.session_storage(),
            StorageArea::Local => w.local_storage(),
            StorageArea::Cookie => return Err(StorageError::Unavailable(area)),
        };
        storage
            .ok()
            .flatten()
            .ok_or(StorageError::Unavailable(area))
    }

    fn html_document() -> Result<HtmlDocument, StorageError> {
        window()?
            .document()
            .and_then(|doc| doc.dyn_into::<HtmlDocument>().ok())
            .ok_or(StorageError::Unavailable(StorageArea::Cookie))
    }

    fn write_cookie(raw: &str, key: &str) -> Result<(), StorageError> {
        html_document()?
            .set_cookie(raw)
            .map_err(|_| StorageError::WriteFailed {
                area: StorageArea::Cookie,
                key: key.to_string(),
            })
    }

    impl BrowserStore for WebStore {
        fn get(&self, area: StorageArea, key: &str) -> Option<String> {
            match area {
                StorageArea::Cookie => {
                    let cookies = html_document().ok()?.cookie().ok()?;
                    parse_cookie(&cookies, key)
                }
                _ => storage(area).ok()?.get_item(key).ok().flatten(),
            }
        }

        fn set(&self, area: StorageArea, key: &str, value: &str) -> Result<(), StorageError> {
            match area {
                StorageArea::Cookie => {
                    write_cookie(&format_cookie(key, value, self.cookie_max_age_secs), key)
                }
                _ => storage(area)?
                    .set_item(key, value)
                    .map_err(|_| StorageError::WriteFailed {
                        area,
                        key: key.to_string(),
                    }),
            }
        }

        fn remove(&self, area: StorageArea, key: &str) -> Result<(), StorageError> {
            match area {
                StorageArea::Cookie => write_cookie(&format_expired_cookie(key), key),
                _ => storage(area)?
                    .remove_item(key)
                    .map_err(|_| StorageError::WriteFailed {
                        area,
                        key: key.to_string(),
                    }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_isolates_areas() {
        let store = MemoryStore::new();
        store.set(StorageArea::Session, "k", "session").unwrap();
        store.set(StorageArea::Local, "k", "local").unwrap();
        assert_eq!(store.get(StorageArea::Session, "k").as_deref(), Some("session"));
        assert_eq!(store.get(StorageArea::Local, "k").as_deref(), Some("local"));
        assert_eq!(store.get(StorageArea::Cookie, "k"), None);

        store.remove(StorageArea::Session, "k").unwrap();
        assert_eq!(store.get(StorageArea::Session, "k"), None);
        assert_eq!(store.get(StorageArea::Local, "k").as_deref(), Some("local"));
    }

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        other.set(StorageArea::Local, "k", "v").unwrap();
        assert_eq!(store.get(StorageArea::Local, "k").as_deref(), Some("v"));
    }

    #[test]
    fn parse_cookie_finds_named_value() {
        let raw = "theme=dark; pit_token=abc.def.ghi; other=1";
        assert_eq!(parse_cookie(raw, "pit_token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(raw, "missing"), None);
        assert_eq!(parse_cookie("", "pit_token"), None);
    }

    #[test]
    fn parse_cookie_does_not_match_name_suffix() {
        let raw = "xpit_token=wrong; pit_token=right";
        assert_eq!(parse_cookie(raw, "pit_token").as_deref(), Some("right"));
    }

    #[test]
    fn cookie_values_survive_encoding() {
        let value = "a b;c%d";
        let raw = format_cookie("pit_token", value, 60);
        assert!(raw.starts_with("pit_token=a%20b%3Bc%25d;"));
        assert!(raw.contains("max-age=60"));
        assert!(!raw.contains("domain"));
        let header = raw.split("; path").next().unwrap();
        assert_eq!(parse_cookie(header, "pit_token").as_deref(), Some(value));
    }

    #[test]
    fn expired_cookie_has_zero_max_age() {
        assert_eq!(
            format_expired_cookie("pit_token"),
            "pit_token=; path=/; max-age=0; SameSite=Lax"
        );
    }
}
