//! ブラウザ履歴との連携

use gloo::history::{BrowserHistory, History};
use rag_console_common::HistoryUpdate;

/// 現在のURLパス
pub fn current_path() -> String {
    BrowserHistory::new().location().path().to_string()
}

/// ルーターが決めた更新をブラウザ履歴に反映する
pub fn apply(update: HistoryUpdate) {
    match update {
        HistoryUpdate::Keep => {}
        HistoryUpdate::Push(path) => BrowserHistory::new().push(path),
        HistoryUpdate::Replace(path) => BrowserHistory::new().replace(path),
    }
}
