//! Browser HTTP calls through `web_sys` fetch.
//!
//! Every request is armed with an `AbortController` that fires after
//! [`REQUEST_TIMEOUT_MS`]; an aborted request surfaces as
//! [`ApiError::Timeout`]. Requests go to relative URLs, so the backend is the
//! page's own origin.

use sip_core::error::ApiError;
use sip_core::geocode::{parse_search_results, Location, NOMINATIM_SEARCH_URL};
use sip_core::request::VisualizeRequest;
use sip_core::sample::{decode_response, RawSample};
use sip_core::source::ExportFormat;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Blob, Headers, HtmlAnchorElement, Request, RequestInit, RequestMode, Response, Url};

/// Abort requests still pending after this long.
pub const REQUEST_TIMEOUT_MS: i32 = 60_000;

fn js_error(context: &str, value: JsValue) -> ApiError {
    let detail = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    ApiError::Network(format!("{}: {}", context, detail))
}

fn window() -> Result<web_sys::Window, ApiError> {
    web_sys::window().ok_or_else(|| ApiError::Network("no browser window".to_string()))
}

/// Send `request` with the timeout armed and return the response, whatever
/// its status.
async fn send(request: Request, controller: AbortController) -> Result<Response, ApiError> {
    let window = window()?;
    let signal = controller.signal();
    let abort = Closure::once(move || controller.abort());
    let timer = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            abort.as_ref().unchecked_ref(),
            REQUEST_TIMEOUT_MS,
        )
        .map_err(|e| js_error("could not arm timeout", e))?;

    let result = JsFuture::from(window.fetch_with_request(&request)).await;
    window.clear_timeout_with_handle(timer);
    drop(abort);

    match result {
        Ok(value) => value
            .dyn_into::<Response>()
            .map_err(|e| js_error("unexpected fetch result", e)),
        Err(_) if signal.aborted() => Err(ApiError::Timeout),
        Err(e) => Err(js_error("request failed", e)),
    }
}

async fn post_json(url: &str, body: &str) -> Result<Response, ApiError> {
    let controller = AbortController::new().map_err(|e| js_error("AbortController", e))?;
    let headers = Headers::new().map_err(|e| js_error("Headers", e))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| js_error("Headers", e))?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::SameOrigin);
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));
    init.set_signal(Some(&controller.signal()));

    let request = Request::new_with_str_and_init(url, &init).map_err(|e| js_error("Request", e))?;
    send(request, controller).await
}

async fn response_text(response: &Response) -> Result<String, ApiError> {
    let promise = response.text().map_err(|e| js_error("reading response", e))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| js_error("reading response", e))?;
    Ok(text.as_string().unwrap_or_default())
}

/// Turn a non-2xx response into an [`ApiError::Http`], preferring the
/// backend's `error` field.
async fn check_status(response: &Response) -> Result<(), ApiError> {
    if response.ok() {
        return Ok(());
    }
    let body = response_text(response).await.unwrap_or_default();
    Err(ApiError::from_response(
        response.status(),
        &response.status_text(),
        &body,
    ))
}

/// POST the request to its data endpoint and decode the samples.
pub async fn fetch_samples(request: &VisualizeRequest) -> Result<Vec<RawSample>, ApiError> {
    let body = request
        .to_json()
        .map_err(|e| ApiError::Format(e.to_string()))?;
    log::info!("POST {} ({})", request.endpoint(), request.granularity);
    let response = post_json(request.endpoint(), &body).await?;
    check_status(&response).await?;
    let text = response_text(&response).await?;
    decode_response(&text)
}

/// POST the request to the export endpoint and return the file blob.
pub async fn fetch_export(request: &VisualizeRequest, format: ExportFormat) -> Result<Blob, ApiError> {
    let body = request
        .to_json()
        .map_err(|e| ApiError::Format(e.to_string()))?;
    let response = post_json(&format.endpoint(), &body).await?;
    check_status(&response).await?;
    let promise = response.blob().map_err(|e| js_error("reading export", e))?;
    let blob = JsFuture::from(promise)
        .await
        .map_err(|e| js_error("reading export", e))?;
    let blob: Blob = blob
        .dyn_into()
        .map_err(|e| js_error("export is not a blob", e))?;
    if blob.size() == 0.0 {
        return Err(ApiError::Format("the server returned an empty file".to_string()));
    }
    Ok(blob)
}

/// Look up `query` on Nominatim and return the first match.
pub async fn geocode(query: &str) -> Result<Option<Location>, ApiError> {
    let url = format!(
        "{}?format=json&q={}",
        NOMINATIM_SEARCH_URL,
        String::from(js_sys::encode_uri_component(query))
    );
    let controller = AbortController::new().map_err(|e| js_error("AbortController", e))?;
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_signal(Some(&controller.signal()));
    let request = Request::new_with_str_and_init(&url, &init).map_err(|e| js_error("Request", e))?;
    let response = send(request, controller).await?;
    check_status(&response).await?;
    let text = response_text(&response).await?;
    parse_search_results(&text)
}

/// Save `blob` under `file_name` through a temporary `<a download>` link.
pub fn save_blob(blob: &Blob, file_name: &str) -> Result<(), ApiError> {
    let document = window()?
        .document()
        .ok_or_else(|| ApiError::Network("no document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| ApiError::Network("no document body".to_string()))?;
    let url = Url::create_object_url_with_blob(blob).map_err(|e| js_error("object URL", e))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_error("create link", e))?
        .dyn_into()
        .map_err(|e| js_error("create link", e.into()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    body.append_child(&anchor)
        .map_err(|e| js_error("attach link", e))?;
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&url);
    Ok(())
}
