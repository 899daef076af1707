//! エラーケーステスト

use rag_console::error::ConsoleError;
use rag_console_common::Error;

/// ConsoleErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ConsoleError::Config("テスト設定エラー".to_string()),
        ConsoleError::Common(Error::InvalidPathSegment("a/b".to_string())),
        ConsoleError::Common(Error::Api {
            status: 500,
            detail: "文件处理失败".to_string(),
        }),
        ConsoleError::Prompt("not a terminal".to_string()),
        ConsoleError::Aborted,
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty());
    }
}

/// 共通エラーはメッセージをそのまま表示する
#[test]
fn test_common_error_transparent() {
    let err: ConsoleError = Error::IndexOutOfRange { index: 2, len: 0 }.into();
    assert_eq!(format!("{}", err), "index out of range: 2 (len 0)");
}

#[test]
fn test_status_only_for_api_errors() {
    let api: ConsoleError = Error::Api {
        status: 404,
        detail: "Not Found".to_string(),
    }
    .into();
    assert_eq!(api.status(), Some(404));

    assert_eq!(ConsoleError::Aborted.status(), None);
    assert_eq!(ConsoleError::Config("x".into()).status(), None);
}

#[test]
fn test_from_io_and_json() {
    let io: ConsoleError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
    assert!(matches!(io, ConsoleError::Io(_)));

    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let json: ConsoleError = json_err.into();
    assert!(matches!(json, ConsoleError::JsonParse(_)));
}
