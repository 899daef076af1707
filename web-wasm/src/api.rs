//! バックエンドAPIの送信（fetch）
//!
//! リクエストの組み立ては `rag_console_common::api` が行い、
//! ここではブラウザのfetchで送信してレスポンスを解釈するだけ。

use rag_console_common::api::{api_error, ApiEnvelope};
use rag_console_common::{ApiRequest, Error};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// APIのベースパス（開発サーバのプロキシ経由でバックエンドへ転送される）
pub const API_BASE: &str = "/api";

/// リクエストを送信して `data` を取り出す
pub async fn execute<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, Error> {
    let url = request.url(API_BASE);

    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &request.body {
        let body = serde_json::to_string(body)?;
        opts.set_body(&JsValue::from_str(&body));
    }

    let fetch_request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
    if request.body.is_some() {
        fetch_request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window()
        .ok_or_else(|| Error::Transport("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&fetch_request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    if !resp.ok() {
        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        return Err(api_error(resp.status(), &text.as_string().unwrap_or_default()));
    }

    let json = JsFuture::from(resp.json().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let envelope: ApiEnvelope<T> = serde_wasm_bindgen::from_value(json)
        .map_err(|e| Error::Transport(format!("invalid response: {}", e)))?;

    Ok(envelope.data)
}

fn js_error(value: JsValue) -> Error {
    Error::Transport(describe_js_value(&value))
}

/// JS例外を表示用の文字列にする
pub fn describe_js_value(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_describe_js_value_string() {
        let value = JsValue::from_str("TypeError: Failed to fetch");
        assert_eq!(describe_js_value(&value), "TypeError: Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn wasm_js_error_is_transport() {
        let err = js_error(JsValue::from_str("offline"));
        assert!(matches!(err, Error::Transport(ref msg) if msg == "offline"));
    }
}
