// src/config.rs

use serde::Deserialize;

pub const DEFAULT_HISTORY_LIMIT: u32 = 50;
/// Rango aceptado por `/historial`
const MAX_HISTORY_LIMIT: u32 = 100;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_NATIVE_ENDPOINT: &str = "http://127.0.0.1:8000";
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "eco_quiz.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Origen del servicio; vacío = mismo origen (rutas relativas)
    pub base_url: String,
    pub history_limit: u32,
}

/// Forma del fichero `eco_quiz.yaml`
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    history_limit: Option<u32>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: &str, history_limit: u32) -> Self {
        Self {
            base_url: trim_trailing_slashes(base_url),
            history_limit: history_limit.clamp(1, MAX_HISTORY_LIMIT),
        }
    }

    /// Une origen y ruta con una sola barra
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    fn from_yaml(text: &str) -> Result<FileConfig, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Variable de entorno -> eco_quiz.yaml -> localhost
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let file = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match Self::from_yaml(&text) {
                Ok(cfg) => cfg,
                Err(err) => {
                    log::warn!("{CONFIG_FILE} inválido, se ignora: {err}");
                    FileConfig::default()
                }
            },
            Err(_) => FileConfig::default(),
        };

        let base_url = std::env::var("ECO_QUIZ_ENDPOINT")
            .ok()
            .and_then(|s| normalize_endpoint(&s))
            .or(file.base_url.as_deref().and_then(normalize_endpoint))
            .unwrap_or_else(|| DEFAULT_NATIVE_ENDPOINT.to_string());

        let cfg = Self::new(
            &base_url,
            file.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT),
        );
        log::info!("servicio de diagnóstico en {}", cfg.base_url);
        cfg
    }

    /// Build env -> querystring -> <meta> -> localStorage -> mismo origen
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let base_url = endpoint_from_build_env()
            .or_else(endpoint_from_querystring)
            .or_else(endpoint_from_meta)
            .or_else(endpoint_from_local_storage)
            .unwrap_or_default();
        Self::new(&base_url, DEFAULT_HISTORY_LIMIT)
    }
}

fn normalize_endpoint(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn trim_trailing_slashes(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_build_env() -> Option<String> {
    option_env!("ECO_QUIZ_ENDPOINT").and_then(normalize_endpoint)
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_querystring() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());

    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };

        if key == "endpoint" {
            let decoded = js_sys::decode_uri_component(value).ok()?;
            let decoded = decoded.as_string()?;
            return normalize_endpoint(&decoded);
        }
    }

    None
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_meta() -> Option<String> {
    let window = web_sys::window()?;
    let document = window.document()?;
    let meta = document
        .query_selector("meta[name='eco-quiz-endpoint']")
        .ok()??;

    meta.get_attribute("content")
        .as_deref()
        .and_then(normalize_endpoint)
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_local_storage() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    storage
        .get_item("eco_quiz_endpoint")
        .ok()?
        .as_deref()
        .and_then(normalize_endpoint)
}
