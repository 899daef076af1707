//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("index out of range: {index} (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("upload progress out of range: {0} (expected 0-100)")]
    ProgressOutOfRange(u32),

    #[error("invalid theme: {0}")]
    InvalidTheme(String),

    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("duplicate route: {0}")]
    DuplicateRoute(String),

    #[error("invalid route table: {0}")]
    InvalidRouteTable(String),

    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        let display = format!("{}", error);
        assert!(display.contains("JSON error"));
    }

    #[test]
    fn test_error_display_index() {
        let error = Error::IndexOutOfRange { index: 3, len: 1 };
        assert_eq!(format!("{}", error), "index out of range: 3 (len 1)");
    }

    #[test]
    fn test_error_display_api() {
        let error = Error::Api {
            status: 500,
            detail: "文件处理失败".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("500"));
        assert!(display.contains("文件处理失败"));
    }

    #[test]
    fn test_error_display_path_segment() {
        let error = Error::InvalidPathSegment("a/b".to_string());
        assert_eq!(format!("{}", error), "invalid path segment: \"a/b\"");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidTheme("solarized".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidTheme"));
        assert!(debug.contains("solarized"));
    }
}
