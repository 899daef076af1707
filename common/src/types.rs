//! バックエンドAPIのレコード型
//!
//! CLIとWeb(WASM)で共有される型。バックエンドのキーはsnake_case。
//! 未知のフィールドは無視し、欠けているフィールドはデフォルト値で埋める。

use serde::{Deserialize, Serialize};

/// 取込済みファイル（`GET /data-import/files`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub id: String,
    pub name: String,
    pub size: u64,
    /// ファイル形式（excel/txt/markdown/pdf/word）
    #[serde(rename = "type")]
    pub format: String,
    /// ファイル種別（structured/semi-structured/unstructured）
    pub file_type: String,
    pub upload_time: String,
    pub status: String,
    pub pdf_parser: Option<String>,
    pub error_message: Option<String>,
}

impl FileInfo {
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

/// アップロード結果（`POST /data-import/upload`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResult {
    pub file_id: String,
    pub status: String,
    pub message: String,
    pub processed_chunks: usize,
}

/// 削除結果（`DELETE /data-import/files/{id}`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteResult {
    pub file_id: String,
    pub message: String,
}

/// 取込履歴の時刻書式（chronoの書式指定）
pub const IMPORTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 取込履歴（新しい順に保持される）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportRecord {
    pub file_id: String,
    pub file_type: String,
    pub file_format: String,
    pub pdf_parser: Option<String>,
    pub status: String,
    pub message: String,
    pub processed_chunks: usize,
    pub imported_at: String,
}

impl ImportRecord {
    /// アップロード結果から履歴レコードを作る
    ///
    /// 時刻はホスト側（CLIはchrono、WebはDate）が与える。
    pub fn from_upload(
        result: &UploadResult,
        file_type: &str,
        file_format: &str,
        pdf_parser: Option<&str>,
        imported_at: impl Into<String>,
    ) -> Self {
        Self {
            file_id: result.file_id.clone(),
            file_type: file_type.to_string(),
            file_format: file_format.to_string(),
            pdf_parser: pdf_parser.filter(|p| !p.is_empty()).map(str::to_string),
            status: result.status.clone(),
            message: result.message.clone(),
            processed_chunks: result.processed_chunks,
            imported_at: imported_at.into(),
        }
    }
}

/// 分割処理の一覧行（`GET /text-chunk/chunks`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSummary {
    pub id: String,
    pub method: String,
    pub chunk_size: u32,
    pub overlap_size: u32,
    pub total_chunks: u32,
    pub process_time: String,
    pub status: String,
}

/// 分割結果（`POST /text-chunk/process`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkResult {
    pub chunk_id: String,
    pub status: String,
    pub message: String,
    pub total_chunks: u32,
}

/// 埋め込み処理の一覧行（`GET /vector-embed/vectors`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedRecord {
    pub id: String,
    pub model: String,
    pub batch_size: u32,
    pub process_time: String,
    pub status: String,
    pub total_vectors: u32,
    pub dimension: u32,
}

/// 埋め込み結果（`POST /vector-embed/process`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedResult {
    pub vector_id: String,
    pub status: String,
    pub message: String,
    pub total_vectors: u32,
}

/// ベクトルDBのコレクション（`GET /vector-db/collections`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    pub db_type: String,
    pub create_time: String,
    pub status: String,
    pub vector_count: u32,
}

/// 格納結果（`POST /vector-db/store`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreResult {
    pub collection_id: String,
    pub status: String,
    pub message: String,
}

/// 検索ヒット
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchHit {
    pub id: String,
    pub content: String,
    pub score: f64,
    pub metadata: serde_json::Value,
}

/// 検索結果（`POST /retrieval/search`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub search_id: String,
    pub query: String,
    pub results: Vec<SearchHit>,
}

/// 検索履歴（`GET /retrieval/history`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRecord {
    pub id: String,
    pub query: String,
    pub top_k: u32,
    pub search_time: String,
    pub results_count: u32,
}

/// 生成結果（`POST /generation/generate`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationResult {
    pub generation_id: String,
    pub query: String,
    pub generated_content: String,
    pub model: String,
    pub context_used: u32,
}

/// 生成履歴（`GET /generation/history`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRecord {
    pub id: String,
    pub query: String,
    pub model: String,
    pub context_count: u32,
    pub generation_time: String,
    pub content_length: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_info_deserialize_backend_row() {
        let json = r#"{
            "id": "4f1c",
            "name": "sample_pdf_file.pdf",
            "size": 1048576,
            "type": "pdf",
            "file_type": "unstructured",
            "upload_time": "2025-07-01 10:00:00",
            "status": "success",
            "error_message": null
        }"#;

        let file: FileInfo = serde_json::from_str(json).expect("パース失敗");
        assert_eq!(file.id, "4f1c");
        assert_eq!(file.format, "pdf");
        assert_eq!(file.file_type, "unstructured");
        assert_eq!(file.size, 1_048_576);
        assert!(file.error_message.is_none());
        assert!(!file.is_error());
    }

    #[test]
    fn test_file_info_missing_fields_default() {
        let file: FileInfo = serde_json::from_str(r#"{"id": "x", "extra": 1}"#).unwrap();
        assert_eq!(file.id, "x");
        assert_eq!(file.name, "");
        assert_eq!(file.status, "");
    }

    #[test]
    fn test_file_info_serialize_type_key() {
        let file = FileInfo {
            format: "word".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"type\":\"word\""));
        assert!(!json.contains("\"format\""));
    }

    #[test]
    fn test_import_record_from_upload() {
        let result = UploadResult {
            file_id: "abc".to_string(),
            status: "success".to_string(),
            message: "文件处理成功".to_string(),
            processed_chunks: 5,
        };

        let record =
            ImportRecord::from_upload(&result, "unstructured", "pdf", Some("PyPDF"), "2025-07-01");
        assert_eq!(record.file_id, "abc");
        assert_eq!(record.file_format, "pdf");
        assert_eq!(record.pdf_parser.as_deref(), Some("PyPDF"));
        assert_eq!(record.processed_chunks, 5);
        assert_eq!(record.imported_at, "2025-07-01");

        let record = ImportRecord::from_upload(&result, "structured", "txt", Some(""), "t");
        assert!(record.pdf_parser.is_none());
    }

    #[test]
    fn test_search_result_deserialize() {
        let json = r#"{
            "search_id": "s1",
            "query": "RAG",
            "results": [
                {"id": "result_0", "content": "a", "score": 0.9, "metadata": {"source": "document_0.txt"}},
                {"id": "result_1", "content": "b", "score": 0.8, "metadata": {"source": "document_1.txt"}}
            ]
        }"#;

        let result: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.results.len(), 2);
        assert!((result.results[0].score - 0.9).abs() < 1e-9);
        assert_eq!(result.results[1].metadata["source"], "document_1.txt");
    }
}
