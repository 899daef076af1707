//! バックエンドAPIのリクエスト定義
//!
//! 各ステージのAPIをHTTPリクエストの記述（`ApiRequest`）に変換する。
//! 実際の送信はホストごとの実装が行う（CLIはreqwest、Webはfetch）。
//! キャッシュ・リトライ・重複排除は行わない。

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// HTTPメソッド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 送信前のリクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// 値が空でない場合のみ追加
    pub fn optional_param(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => self.param(key, v),
            _ => self,
        }
    }

    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// パスとクエリ文字列（追加順を保持）
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    /// ベースURLと結合（区切りの `/` は1つにする）
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path_and_query().trim_start_matches('/'))
    }
}

/// `/data-import` API
pub struct DataImportApi;

impl DataImportApi {
    /// ファイルのアップロード・処理を開始する
    ///
    /// `file_type` / `file_format` は検証せずにそのままサーバへ渡す。
    pub fn upload_file(file_type: &str, file_format: &str, pdf_parser: Option<&str>) -> ApiRequest {
        ApiRequest::post("/data-import/upload")
            .param("file_type", file_type)
            .param("file_format", file_format)
            .optional_param("pdf_parser", pdf_parser)
    }

    pub fn get_file_list() -> ApiRequest {
        ApiRequest::get("/data-import/files")
    }

    /// IDはエスケープせずにパスへ埋め込む
    pub fn delete_file(file_id: &str) -> Result<ApiRequest> {
        let file_id = path_segment(file_id)?;
        Ok(ApiRequest::delete(format!("/data-import/files/{}", file_id)))
    }
}

/// `/text-chunk` API
pub struct TextChunkApi;

impl TextChunkApi {
    pub fn process(chunk_method: &str, chunk_size: u32, overlap_size: u32) -> ApiRequest {
        ApiRequest::post("/text-chunk/process")
            .param("chunk_method", chunk_method)
            .param("chunk_size", chunk_size)
            .param("overlap_size", overlap_size)
    }

    pub fn get_chunk_list() -> ApiRequest {
        ApiRequest::get("/text-chunk/chunks")
    }
}

/// `/vector-embed` API
pub struct VectorEmbedApi;

impl VectorEmbedApi {
    pub fn process(embed_model: &str, batch_size: u32) -> ApiRequest {
        ApiRequest::post("/vector-embed/process")
            .param("embed_model", embed_model)
            .param("batch_size", batch_size)
    }

    pub fn get_vector_list() -> ApiRequest {
        ApiRequest::get("/vector-embed/vectors")
    }
}

/// `/vector-db` API
pub struct VectorDbApi;

impl VectorDbApi {
    pub fn store_vectors(db_type: &str, collection_name: &str) -> ApiRequest {
        ApiRequest::post("/vector-db/store")
            .param("db_type", db_type)
            .param("collection_name", collection_name)
    }

    pub fn get_collection_list() -> ApiRequest {
        ApiRequest::get("/vector-db/collections")
    }
}

/// `/retrieval` API
pub struct RetrievalApi;

impl RetrievalApi {
    pub const DEFAULT_TOP_K: u32 = 5;

    pub fn search(query: &str, top_k: u32) -> ApiRequest {
        ApiRequest::post("/retrieval/search")
            .param("query", query)
            .param("top_k", top_k)
    }

    pub fn get_search_history() -> ApiRequest {
        ApiRequest::get("/retrieval/history")
    }
}

/// `/generation` API
pub struct GenerationApi;

impl GenerationApi {
    pub const DEFAULT_MODEL: &'static str = "gpt-3.5-turbo";

    /// `context` はJSON配列としてボディで送る
    pub fn generate(query: &str, context: &[String], model: &str) -> ApiRequest {
        ApiRequest::post("/generation/generate")
            .param("query", query)
            .param("model", model)
            .json_body(serde_json::Value::from(context.to_vec()))
    }

    pub fn get_generation_history() -> ApiRequest {
        ApiRequest::get("/generation/history")
    }
}

/// ヘルスチェック（APIプレフィックスではなくサーバ直下）
pub fn health() -> ApiRequest {
    ApiRequest::get("/health")
}

/// パスの1セグメントとしてそのまま使える値か
///
/// `.` と `..` はURL正規化で別のパスに変わるため不可。
fn path_segment(value: &str) -> Result<&str> {
    if value.is_empty()
        || value == "."
        || value == ".."
        || value.contains(|c: char| matches!(c, '/' | '?' | '#'))
    {
        return Err(Error::InvalidPathSegment(value.to_string()));
    }
    Ok(value)
}

/// 成功レスポンスの共通形式 `{"code": 200, "message": "...", "data": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: u16,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// エラーレスポンス `{"detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// ステータスとボディからレスポンスを解釈する
///
/// 2xxは `data` を取り出し、それ以外は `Error::Api` にする。
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(api_error(status, body));
    }
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

/// 非2xxレスポンスをエラーに変換（detailが読めなければ本文をそのまま使う）
pub fn api_error(status: u16, body: &str) -> Error {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| body.trim().to_string());
    Error::Api { status, detail }
}
