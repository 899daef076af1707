//! RAG Console CLI
//!
//! パイプライン各ステージのバックエンドAPIを端末から操作する。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
