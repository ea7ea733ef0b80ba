use pulse_core::upload::FILE_FIELD;
use pulse_core::{ApiConfig, HttpReply, Transport, UploadError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, File, FormData, Request, RequestInit, Response};

use crate::state::AppState;

/// API base URL, fixed at build time.
pub fn api_config() -> ApiConfig {
    ApiConfig::from_override(option_env!("DECISIONPULSE_API_URL"))
}

/// Abort handle for one in-flight upload.
pub struct UploadHandle {
    controller: AbortController,
}

impl UploadHandle {
    pub fn new() -> Result<Self, UploadError> {
        let controller = AbortController::new()
            .map_err(|e| UploadError::Transport(format!("AbortController: {e:?}")))?;
        Ok(Self { controller })
    }

    pub fn signal(&self) -> AbortSignal {
        self.controller.signal()
    }

    pub fn abort(&self) {
        self.controller.abort();
    }
}

/// `fetch`-based transport. Each request registers its abort handle with the
/// app state, which cancels whatever request was in flight before it.
pub struct BrowserTransport {
    state: AppState,
}

impl BrowserTransport {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

fn fetch_error(signal: &AbortSignal, what: &str, e: wasm_bindgen::JsValue) -> UploadError {
    if signal.aborted() {
        UploadError::Cancelled
    } else {
        UploadError::Transport(format!("{what}: {e:?}"))
    }
}

impl Transport for BrowserTransport {
    type File = File;

    async fn post_file(&self, url: &str, file: &File) -> Result<HttpReply, UploadError> {
        let handle = UploadHandle::new()?;
        let signal = handle.signal();
        self.state.replace_in_flight(handle);

        let form = FormData::new().map_err(|e| fetch_error(&signal, "FormData", e))?;
        form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
            .map_err(|e| fetch_error(&signal, "FormData append", e))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        init.set_signal(Some(&signal));
        let request = Request::new_with_str_and_init(url, &init)
            .map_err(|e| fetch_error(&signal, "request", e))?;

        let window = web_sys::window().ok_or(UploadError::Transport("No window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| fetch_error(&signal, "fetch error", e))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| UploadError::Transport("Response cast failed".into()))?;

        let status = resp.status();
        let text = JsFuture::from(resp.text().map_err(|e| fetch_error(&signal, "text", e))?)
            .await
            .map_err(|e| fetch_error(&signal, "text", e))?;
        let body = text.as_string().unwrap_or_default();
        Ok(HttpReply { status, body })
    }
}
