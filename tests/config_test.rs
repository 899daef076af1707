//! 設定ファイルのテスト

use rag_console::config::Config;
use rag_console::error::ConsoleError;
use tempfile::tempdir;

/// 設定ファイルが無い場合はデフォルト
#[test]
fn test_load_missing_file_returns_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).expect("読み込み失敗");

    assert_eq!(config, Config::default());
    assert_eq!(config.api_base(), "http://localhost:8000/api");
}

/// 保存と読み込み
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        server_url: "http://rag.internal:9000".to_string(),
        api_prefix: "/api".to_string(),
        timeout_seconds: 60,
    };
    config.save_to(&path).expect("保存失敗");

    let loaded = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(loaded, config);
}

/// 一部のキーしか無い設定ファイル
#[test]
fn test_load_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"server_url": "https://rag.example.com/"}"#).unwrap();

    let config = Config::load_from(&path).expect("読み込み失敗");
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.api_base(), "https://rag.example.com/api");
}

/// 壊れた設定ファイル
#[test]
fn test_load_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConsoleError::JsonParse(_)));
}

#[test]
fn test_api_base_without_prefix() {
    let config = Config {
        api_prefix: String::new(),
        ..Config::default()
    };
    assert_eq!(config.api_base(), "http://localhost:8000");
}

#[test]
fn test_set_server_url_validates_scheme() {
    let mut config = Config::default();
    config
        .set_server_url("https://rag.example.com".to_string())
        .expect("https URLは有効");
    assert_eq!(config.server_url, "https://rag.example.com");

    let err = config.set_server_url("rag.example.com".to_string()).unwrap_err();
    assert!(matches!(err, ConsoleError::Config(_)));
    assert_eq!(config.server_url, "https://rag.example.com");
}
