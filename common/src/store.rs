//! 状態ストア
//!
//! - `AppStore`: ローディング・サイドバー・テーマのUI状態
//! - `DataImportStore`: 取込ファイル・アップロード進捗・取込履歴
//! - `Session`: 両ストアを所有する明示的なコンテキスト
//!
//! 変更操作はすべて同期的で、不正な入力は状態を変えずに `Err` を返す。
//! 変更通知はホスト側が担う（Webコンソールでは `RwSignal` で包む）。

use crate::error::{Error, Result};
use crate::types::{FileInfo, ImportRecord};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::str::FromStr;

/// 取込履歴の既定上限
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// アップロード進捗の最大値
pub const MAX_UPLOAD_PROGRESS: u8 = 100;

/// 表示テーマ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(Error::InvalidTheme(s.to_string())),
        }
    }
}

/// アプリケーション全体のUI状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStore {
    loading: bool,
    sidebar_collapsed: bool,
    theme: Theme,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn current_theme(&self) -> Theme {
        self.theme
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// 折りたたみ状態を反転し、新しい値を返す
    pub fn toggle_sidebar(&mut self) -> bool {
        self.sidebar_collapsed = !self.sidebar_collapsed;
        self.sidebar_collapsed
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// テーマ名から設定（未知の名前は拒否）
    pub fn set_theme_name(&mut self, name: &str) -> Result<()> {
        self.theme = name.parse()?;
        Ok(())
    }
}

/// データ取込ステージの状態
#[derive(Debug, Clone, PartialEq)]
pub struct DataImportStore {
    files: Vec<FileInfo>,
    upload_progress: u8,
    import_history: VecDeque<ImportRecord>,
    history_limit: usize,
}

impl Default for DataImportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataImportStore {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// 履歴上限を指定して作成（0は1として扱う）
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            files: Vec::new(),
            upload_progress: 0,
            import_history: VecDeque::new(),
            history_limit: limit.max(1),
        }
    }

    pub fn files(&self) -> &[FileInfo] {
        &self.files
    }

    pub fn upload_progress(&self) -> u8 {
        self.upload_progress
    }

    /// 新しい順の取込履歴
    pub fn import_history(&self) -> impl Iterator<Item = &ImportRecord> {
        self.import_history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.import_history.len()
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// 末尾に追加（追加順 = アップロード順）
    pub fn add_file(&mut self, file: FileInfo) {
        self.files.push(file);
    }

    /// サーバから取得した一覧で置き換える
    pub fn set_files(&mut self, files: Vec<FileInfo>) {
        self.files = files;
    }

    /// 位置指定で削除し、削除したファイルを返す
    pub fn remove_file(&mut self, index: usize) -> Result<FileInfo> {
        if index >= self.files.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    /// IDで位置を探す
    pub fn position_of(&self, file_id: &str) -> Option<usize> {
        self.files.iter().position(|f| f.id == file_id)
    }

    /// 進捗を上書き（0〜100）
    pub fn set_upload_progress(&mut self, progress: u32) -> Result<()> {
        if progress > u32::from(MAX_UPLOAD_PROGRESS) {
            return Err(Error::ProgressOutOfRange(progress));
        }
        self.upload_progress = progress as u8;
        Ok(())
    }

    /// アップロード開始（進捗を0に戻す）
    pub fn begin_upload(&mut self) {
        self.upload_progress = 0;
    }

    /// アップロード完了（進捗を100にして履歴へ追加）
    pub fn complete_upload(&mut self, record: ImportRecord) {
        self.upload_progress = MAX_UPLOAD_PROGRESS;
        self.add_to_history(record);
    }

    /// 先頭に追加し、上限を超えた古いレコードを捨てる
    pub fn add_to_history(&mut self, record: ImportRecord) {
        self.import_history.push_front(record);
        self.import_history.truncate(self.history_limit);
    }

    pub fn reset(&mut self) {
        self.files.clear();
        self.upload_progress = 0;
        self.import_history.clear();
    }
}

/// セッション単位のストア所有者
///
/// アプリ起動時に `start` し、終了時に `end` する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub app: AppStore,
    pub data_import: DataImportStore,
}

impl Session {
    pub fn start() -> Self {
        tracing::debug!("session started");
        Self::default()
    }

    /// 両ストアを初期状態に戻す
    pub fn end(&mut self) {
        self.app = AppStore::default();
        self.data_import.reset();
        tracing::debug!("session ended");
    }
}
