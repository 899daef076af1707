use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Common(#[from] rag_console_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("操作を中止しました")]
    Aborted,
}

impl ConsoleError {
    /// サーバが返したHTTPステータス（APIエラーの場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Common(rag_console_common::Error::Api { status, .. }) => Some(*status),
            ConsoleError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
