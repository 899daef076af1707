//! RAG Console Common Library
//!
//! CLIとWeb(WASM)で共有されるルーティング・状態ストア・APIリクエスト定義

pub mod api;
pub mod error;
pub mod route;
pub mod stage;
pub mod store;
pub mod types;

pub use api::{
    ApiEnvelope, ApiErrorBody, ApiRequest, DataImportApi, GenerationApi, Method, RetrievalApi,
    TextChunkApi, VectorDbApi, VectorEmbedApi, decode_response,
};
pub use error::{Error, Result};
pub use route::{HistoryUpdate, Page, Resolution, RouteEntry, RouteTable, RouteTarget, Router};
pub use stage::{Stage, StageView};
pub use store::{AppStore, DataImportStore, Session, Theme};
pub use types::{
    ChunkResult, ChunkSummary, CollectionInfo, DeleteResult, EmbedRecord, EmbedResult, FileInfo,
    GenerationRecord, GenerationResult, ImportRecord, SearchHit, SearchRecord, SearchResult,
    StoreResult, UploadResult, IMPORTED_AT_FORMAT,
};
