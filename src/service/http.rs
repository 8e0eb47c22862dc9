// src/service/http.rs

use super::{Dispatcher, ServiceRequest, ServiceResult};
#[cfg(not(target_arch = "wasm32"))]
use super::Method;
use crate::config::ServiceConfig;
#[cfg(not(target_arch = "wasm32"))]
use crate::error::ServiceError;
use std::sync::mpsc::{self, Receiver};

/// Cliente HTTP real. Nativo: hilo + reqwest bloqueante.
/// WASM: `spawn_local` + fetch del navegador.
pub struct HttpDispatcher {
    config: ServiceConfig,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
}

impl HttpDispatcher {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            #[cfg(not(target_arch = "wasm32"))]
            client: reqwest::blocking::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Dispatcher for HttpDispatcher {
    fn dispatch(&self, request: ServiceRequest) -> Receiver<ServiceResult> {
        let (tx, rx) = mpsc::channel();
        let client = self.client.clone();
        let url = self.config.url_for(&request.path());
        log::debug!("{:?} {url}", request.method());

        std::thread::spawn(move || {
            let result = execute_blocking(&client, &url, &request);
            let _ = tx.send(result);
        });
        rx
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn execute_blocking(
    client: &reqwest::blocking::Client,
    url: &str,
    request: &ServiceRequest,
) -> ServiceResult {
    let builder = match request.method() {
        Method::Get => client.get(url),
        Method::Post => match request.payload() {
            Some(payload) => client.post(url).json(&payload),
            None => client.post(url),
        },
    };

    let response = builder
        .send()
        .map_err(|err| ServiceError::Transport(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Status(status.as_u16()));
    }

    let text = response
        .text()
        .map_err(|err| ServiceError::Transport(err.to_string()))?;
    request.decode(&text)
}

#[cfg(target_arch = "wasm32")]
impl Dispatcher for HttpDispatcher {
    fn dispatch(&self, request: ServiceRequest) -> Receiver<ServiceResult> {
        let (tx, rx) = mpsc::channel();
        let url = self.config.url_for(&request.path());
        log::debug!("{:?} {url}", request.method());

        wasm_bindgen_futures::spawn_local(async move {
            let result = web::fetch(&url, &request).await;
            let _ = tx.send(result);
        });
        rx
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::super::{Method, ServiceRequest, ServiceResult};
    use crate::error::ServiceError;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    pub async fn fetch(url: &str, request: &ServiceRequest) -> ServiceResult {
        let opts = RequestInit::new();
        opts.set_mode(RequestMode::Cors);
        match request.method() {
            Method::Get => opts.set_method("GET"),
            Method::Post => {
                opts.set_method("POST");
                let body = request.body()?.unwrap_or_default();
                opts.set_body(&JsValue::from_str(&body));
            }
        }

        let window = web_sys::window()
            .ok_or_else(|| ServiceError::Transport("no existe window en entorno WASM".into()))?;

        let js_request = Request::new_with_str_and_init(url, &opts)
            .map_err(|err| ServiceError::Transport(format!("no se pudo crear request: {err:?}")))?;

        if request.method() == Method::Post {
            js_request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(|err| ServiceError::Transport(format!("{err:?}")))?;
        }

        let resp_value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(|err| ServiceError::Transport(format!("fetch falló: {err:?}")))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|_| ServiceError::Transport("la respuesta fetch no es un Response".into()))?;

        if !response.ok() {
            return Err(ServiceError::Status(response.status()));
        }

        let promise = response
            .text()
            .map_err(|err| ServiceError::Transport(format!("{err:?}")))?;
        let text = JsFuture::from(promise)
            .await
            .map_err(|err| ServiceError::Transport(format!("{err:?}")))?
            .as_string()
            .ok_or_else(|| ServiceError::Decode("response.text() no devolvió string".into()))?;

        request.decode(&text)
    }
}
