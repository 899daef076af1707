//! バックエンドAPIクライアント
//!
//! `ApiRequest` をreqwestで送信し、共通形式のレスポンスを解釈する。

use crate::config::Config;
use crate::error::Result;
use rag_console_common::api::{self, api_error};
use rag_console_common::types::{
    ChunkResult, ChunkSummary, CollectionInfo, DeleteResult, EmbedRecord, EmbedResult, FileInfo,
    GenerationRecord, GenerationResult, SearchRecord, SearchResult, StoreResult, UploadResult,
};
use rag_console_common::{
    decode_response, ApiRequest, DataImportApi, GenerationApi, Method, RetrievalApi, TextChunkApi,
    VectorDbApi, VectorEmbedApi,
};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct ApiClient {
    http: reqwest::Client,
    server_url: String,
    api_base: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            server_url: config.server_url.trim_end_matches('/').to_string(),
            api_base: config.api_base(),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// APIプレフィックス配下へ送信してdataを取り出す
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let (status, body) = self.send(&self.api_base, request).await?;
        Ok(decode_response(status, &body)?)
    }

    async fn send(&self, base: &str, request: &ApiRequest) -> Result<(u16, String)> {
        let url = request.url(base);
        tracing::debug!(method = %request.method, url = %url, "request");

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.http.request(method, &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "response");

        Ok((status, body))
    }

    /// サーバ直下の `/health`（共通形式ではない）
    pub async fn health(&self) -> Result<serde_json::Value> {
        let (status, body) = self.send(&self.server_url, &api::health()).await?;
        if !(200..300).contains(&status) {
            return Err(api_error(status, &body).into());
        }
        Ok(serde_json::from_str(&body)?)
    }

    // ==================== データ取込 ====================

    pub async fn upload_file(
        &self,
        file_type: &str,
        file_format: &str,
        pdf_parser: Option<&str>,
    ) -> Result<UploadResult> {
        self.execute(&DataImportApi::upload_file(file_type, file_format, pdf_parser))
            .await
    }

    pub async fn file_list(&self) -> Result<Vec<FileInfo>> {
        self.execute(&DataImportApi::get_file_list()).await
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<DeleteResult> {
        self.execute(&DataImportApi::delete_file(file_id)?).await
    }

    // ==================== テキスト分割 ====================

    pub async fn process_chunks(
        &self,
        chunk_method: &str,
        chunk_size: u32,
        overlap_size: u32,
    ) -> Result<ChunkResult> {
        self.execute(&TextChunkApi::process(chunk_method, chunk_size, overlap_size))
            .await
    }

    pub async fn chunk_list(&self) -> Result<Vec<ChunkSummary>> {
        self.execute(&TextChunkApi::get_chunk_list()).await
    }

    // ==================== ベクトル埋め込み ====================

    pub async fn process_embed(&self, embed_model: &str, batch_size: u32) -> Result<EmbedResult> {
        self.execute(&VectorEmbedApi::process(embed_model, batch_size))
            .await
    }

    pub async fn vector_list(&self) -> Result<Vec<EmbedRecord>> {
        self.execute(&VectorEmbedApi::get_vector_list()).await
    }

    // ==================== ベクトルDB ====================

    pub async fn store_vectors(&self, db_type: &str, collection_name: &str) -> Result<StoreResult> {
        self.execute(&VectorDbApi::store_vectors(db_type, collection_name))
            .await
    }

    pub async fn collection_list(&self) -> Result<Vec<CollectionInfo>> {
        self.execute(&VectorDbApi::get_collection_list()).await
    }

    // ==================== 検索 ====================

    pub async fn search(&self, query: &str, top_k: u32) -> Result<SearchResult> {
        self.execute(&RetrievalApi::search(query, top_k)).await
    }

    pub async fn search_history(&self) -> Result<Vec<SearchRecord>> {
        self.execute(&RetrievalApi::get_search_history()).await
    }

    // ==================== 生成 ====================

    pub async fn generate(
        &self,
        query: &str,
        context: &[String],
        model: &str,
    ) -> Result<GenerationResult> {
        self.execute(&GenerationApi::generate(query, context, model))
            .await
    }

    pub async fn generation_history(&self) -> Result<Vec<GenerationRecord>> {
        self.execute(&GenerationApi::get_generation_history())
            .await
    }
}
