use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_TOKEN_REDISCOVERY_MS: u64 = 150;
pub const DEFAULT_TOKEN_COOKIE_MAX_AGE_SECS: u64 = 7 * 24 * 3600;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub token_rediscovery_ms: Option<u64>,
    #[serde(default)]
    pub token_cookie_max_age_secs: Option<u64>,
}

impl RuntimeConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    /// `None` disables the fallback re-discovery.
    pub fn token_rediscovery_delay(&self) -> Option<Duration> {
        match self.token_rediscovery_ms.unwrap_or(DEFAULT_TOKEN_REDISCOVERY_MS) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    pub fn token_cookie_max_age_secs(&self) -> u64 {
        self.token_cookie_max_age_secs
            .unwrap_or(DEFAULT_TOKEN_COOKIE_MAX_AGE_SECS)
    }

    fn merge_missing(mut self, other: RuntimeConfig) -> Self {
        if self.api_base_url.is_none() {
            self.api_base_url = other.api_base_url;
        }
        if self.request_timeout_ms.is_none() {
            self.request_timeout_ms = other.request_timeout_ms;
        }
        if self.token_rediscovery_ms.is_none() {
            self.token_rediscovery_ms = other.token_rediscovery_ms;
        }
        if self.token_cookie_max_age_secs.is_none() {
            self.token_cookie_max_age_secs = other.token_cookie_max_age_secs;
        }
        self
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[cfg(not(target_arch = "wasm32"))]
fn read_global(_name: &str) -> Option<js_sys::Object> {
    None
}

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<js_sys::Object> {
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    Some(js_sys::Object::from(any))
}

fn read_string(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(obj, &(*key).into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .and_then(|v| v.as_string())
    })
}

fn read_u64(obj: &js_sys::Object, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(obj, &(*key).into())
            .ok()
            .and_then(|v| v.as_f64())
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64)
    })
}

fn config_from_global(name: &str) -> Option<RuntimeConfig> {
    // window.__PIT_ENV = { API_BASE_URL: "..." } or window.__PIT_CONFIG = { api_base_url: "..." }
    let obj = read_global(name)?;
    Some(RuntimeConfig {
        api_base_url: read_string(&obj, &["API_BASE_URL", "api_base_url"]),
        request_timeout_ms: read_u64(&obj, &["REQUEST_TIMEOUT_MS", "request_timeout_ms"]),
        token_rediscovery_ms: read_u64(&obj, &["TOKEN_REDISCOVERY_MS", "token_rediscovery_ms"]),
        token_cookie_max_age_secs: read_u64(
            &obj,
            &["TOKEN_COOKIE_MAX_AGE_SECS", "token_cookie_max_age_secs"],
        ),
    })
}

fn snapshot_from_globals() -> Option<RuntimeConfig> {
    let env = config_from_global("__PIT_ENV");
    let window_cfg = config_from_global("__PIT_CONFIG");
    match (env, window_cfg) {
        (Some(env), Some(cfg)) => Some(env.merge_missing(cfg)),
        (env, cfg) => env.or(cfg),
    }
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn cache(cfg: RuntimeConfig) -> RuntimeConfig {
    let _ = RUNTIME_CONFIG.set(cfg.clone());
    RUNTIME_CONFIG.get().cloned().unwrap_or(cfg)
}

pub async fn await_runtime_config() -> RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached.clone();
    }
    let from_globals = snapshot_from_globals().unwrap_or_default();
    if from_globals.api_base_url.is_some() {
        return cache(from_globals);
    }
    match fetch_runtime_config().await {
        Some(fetched) => cache(from_globals.merge_missing(fetched)),
        None => {
            log::warn!(
                "runtime config not found, falling back to {}",
                DEFAULT_API_BASE_URL
            );
            cache(from_globals)
        }
    }
}

pub async fn await_api_base_url() -> String {
    await_runtime_config()
        .await
        .api_base_url
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Cached config, or defaults when `init` has not completed yet.
pub fn current() -> RuntimeConfig {
    RUNTIME_CONFIG.get().cloned().unwrap_or_default()
}

pub async fn init() {
    let cfg = await_runtime_config().await;
    log::info!(
        "runtime config initialized (api_base_url={})",
        cfg.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    );
}
