//! ルーティング
//!
//! URLパスから画面を決定するデータ駆動のディスパッチテーブルと、
//! 閲覧履歴を持つ状態機械。
//!
//! - `/` は `/data-import/config` へ明示的にリダイレクトする
//! - テーブルに無いパスは `Page::NotFound` に解決される
//! - クエリ文字列・フラグメント・末尾スラッシュは無視し、大文字小文字は区別しない

use crate::error::{Error, Result};
use crate::stage::{Stage, StageView};
use std::collections::HashSet;

/// ルートパス
pub const ROOT_PATH: &str = "/";

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Stage(Stage, StageView),
    NotFound,
}

impl Page {
    pub fn title(&self) -> String {
        match self {
            Page::Stage(stage, view) => format!("{} - {}", stage.label(), view.label()),
            Page::NotFound => "ページが見つかりません".to_string(),
        }
    }
}

/// ルートの遷移先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    View(Page),
    Redirect(String),
}

/// ルート定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub target: RouteTarget,
}

impl RouteEntry {
    pub fn view(path: impl Into<String>, page: Page) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::View(page),
        }
    }

    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect(to.into()),
        }
    }
}

/// パス解決の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// 要求されたパス（正規化前）
    pub requested: String,
    /// 最終的に表示するパス
    pub path: String,
    pub page: Page,
    /// リダイレクト元（リダイレクトが発生した場合のみ）
    pub redirected_from: Option<String>,
}

impl Resolution {
    pub fn is_redirect(&self) -> bool {
        self.redirected_from.is_some()
    }

    pub fn is_not_found(&self) -> bool {
        self.page == Page::NotFound
    }
}

/// 起動時に一度だけ構築される不変のルートテーブル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// 検証付きでテーブルを構築
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !entry.path.starts_with('/') {
                return Err(Error::InvalidRouteTable(format!(
                    "path must start with '/': {}",
                    entry.path
                )));
            }
            if !seen.insert(normalize(&entry.path).to_ascii_lowercase()) {
                return Err(Error::DuplicateRoute(entry.path.clone()));
            }
            if entry.target == RouteTarget::View(Page::NotFound) {
                return Err(Error::InvalidRouteTable(format!(
                    "{} maps to the not-found page",
                    entry.path
                )));
            }
        }

        let table = Self { entries };

        match table.lookup(ROOT_PATH).map(|e| &e.target) {
            Some(RouteTarget::Redirect(_)) => {}
            Some(RouteTarget::View(_)) => {
                return Err(Error::InvalidRouteTable("'/' must redirect".into()));
            }
            None => {
                return Err(Error::InvalidRouteTable("missing '/' entry".into()));
            }
        }

        for entry in &table.entries {
            if let RouteTarget::Redirect(to) = &entry.target {
                match table.lookup(to).map(|e| &e.target) {
                    Some(RouteTarget::View(_)) => {}
                    Some(RouteTarget::Redirect(_)) => {
                        return Err(Error::InvalidRouteTable(format!(
                            "redirect chain: {} -> {}",
                            entry.path, to
                        )));
                    }
                    None => {
                        return Err(Error::InvalidRouteTable(format!(
                            "redirect target not found: {} -> {}",
                            entry.path, to
                        )));
                    }
                }
            }
        }

        Ok(table)
    }

    /// パイプラインコンソールの標準テーブル
    ///
    /// `/` → `/data-import/config` のリダイレクトと、6ステージ×2画面。
    pub fn pipeline() -> Self {
        let mut entries = vec![RouteEntry::redirect(
            ROOT_PATH,
            Stage::DataImport.path(StageView::Config),
        )];
        for stage in Stage::ALL {
            for view in StageView::ALL {
                entries.push(RouteEntry::view(stage.path(view), Page::Stage(stage, view)));
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        let path = normalize(path);
        self.entries
            .iter()
            .find(|e| normalize(&e.path).eq_ignore_ascii_case(path))
    }

    /// パスを画面に解決する（リダイレクトは1段のみ）
    pub fn resolve(&self, path: &str) -> Resolution {
        match self.lookup(path) {
            Some(RouteEntry {
                path: canonical,
                target: RouteTarget::View(page),
            }) => Resolution {
                requested: path.to_string(),
                path: canonical.clone(),
                page: *page,
                redirected_from: None,
            },
            Some(RouteEntry {
                path: from,
                target: RouteTarget::Redirect(to),
            }) => match self.lookup(to) {
                Some(RouteEntry {
                    path: canonical,
                    target: RouteTarget::View(page),
                }) => {
                    tracing::debug!(from = %from, to = %canonical, "redirect");
                    Resolution {
                        requested: path.to_string(),
                        path: canonical.clone(),
                        page: *page,
                        redirected_from: Some(from.clone()),
                    }
                }
                _ => self.not_found(path),
            },
            None => self.not_found(path),
        }
    }

    fn not_found(&self, path: &str) -> Resolution {
        tracing::warn!(path = %path, "no route matched");
        Resolution {
            requested: path.to_string(),
            path: normalize(path).to_string(),
            page: Page::NotFound,
            redirected_from: None,
        }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::pipeline()
    }
}

/// クエリ・フラグメント・末尾スラッシュを取り除く
pub fn normalize(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

/// ブラウザ履歴への反映方法
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryUpdate {
    /// URLはそのまま
    Keep,
    /// 新しい履歴エントリを追加
    Push(String),
    /// 現在のエントリのURLを置き換える（リダイレクト時）
    Replace(String),
}

/// 閲覧履歴付きルーター
///
/// ブラウザの履歴と同じく、戻った後に遷移すると進む側の履歴は破棄される。
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    stack: Vec<Resolution>,
    cursor: usize,
}

impl Router {
    /// `/` を初期状態として開始する
    pub fn new(table: RouteTable) -> Self {
        Self::starting_at(table, ROOT_PATH)
    }

    /// 任意のパスを初期状態として開始する（ブラウザでの直接アクセス）
    pub fn starting_at(table: RouteTable, path: &str) -> Self {
        let initial = table.resolve(path);
        Self {
            table,
            stack: vec![initial],
            cursor: 0,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn current(&self) -> &Resolution {
        &self.stack[self.cursor]
    }

    pub fn history(&self) -> &[Resolution] {
        &self.stack
    }

    /// 新しいパスへ遷移（履歴に追加）
    ///
    /// 現在と同じパスへの遷移は履歴を増やさない。
    pub fn navigate(&mut self, path: &str) -> &Resolution {
        let resolution = self.table.resolve(path);
        if resolution.path == self.current().path && resolution.page == self.current().page {
            self.stack[self.cursor] = resolution;
            return self.current();
        }
        tracing::debug!(path = %resolution.path, "navigate");
        self.stack.truncate(self.cursor + 1);
        self.stack.push(resolution);
        self.cursor = self.stack.len() - 1;
        self.current()
    }

    /// 現在の履歴エントリを置き換える
    pub fn replace(&mut self, path: &str) -> &Resolution {
        self.stack[self.cursor] = self.table.resolve(path);
        self.current()
    }

    /// リンク遷移を行い、ブラウザ履歴への反映方法を返す
    ///
    /// 遷移先が現在と同じパスなら履歴は増やさない。
    pub fn follow_link(&mut self, path: &str) -> HistoryUpdate {
        let previous = self.current().path.clone();
        let resolution = self.navigate(path);
        if resolution.path == previous {
            HistoryUpdate::Keep
        } else {
            HistoryUpdate::Push(resolution.path.clone())
        }
    }

    /// ブラウザのURL（初回表示・戻る/進む）に状態を合わせる
    ///
    /// 隣の履歴エントリと一致すればカーソルを動かし、そうでなければ現在の
    /// エントリを置き換える。リダイレクトされた場合はURLの置き換えを返す。
    pub fn sync_location(&mut self, path: &str) -> HistoryUpdate {
        let resolution = self.table.resolve(path);
        let matches = |r: &Resolution| r.path == resolution.path;

        if matches(self.current()) {
            self.stack[self.cursor] = resolution.clone();
        } else if self.cursor > 0 && matches(&self.stack[self.cursor - 1]) {
            self.cursor -= 1;
        } else if self.stack.get(self.cursor + 1).is_some_and(matches) {
            self.cursor += 1;
        } else {
            self.stack[self.cursor] = resolution.clone();
        }

        if resolution.is_redirect() {
            HistoryUpdate::Replace(resolution.path)
        } else {
            HistoryUpdate::Keep
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    pub fn back(&mut self) -> Option<&Resolution> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Resolution> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::pipeline())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PATHS: [&str; 13] = [
        "/",
        "/data-import/config",
        "/data-import/management",
        "/text-chunk/config",
        "/text-chunk/management",
        "/vector-embed/config",
        "/vector-embed/management",
        "/vector-db/config",
        "/vector-db/management",
        "/retrieval/config",
        "/retrieval/management",
        "/generation/config",
        "/generation/management",
    ];

    #[test]
    fn test_pipeline_table_paths() {
        let table = RouteTable::pipeline();
        let paths: Vec<&str> = table.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ALL_PATHS);
    }

    #[test]
    fn test_pipeline_table_is_valid() {
        let table = RouteTable::pipeline();
        assert!(RouteTable::new(table.entries().to_vec()).is_ok());
    }

    #[test]
    fn test_root_redirects_to_data_import_config() {
        let table = RouteTable::pipeline();
        let root = table.resolve("/");
        let direct = table.resolve("/data-import/config");

        assert_eq!(root.path, direct.path);
        assert_eq!(root.page, direct.page);
        assert_eq!(root.redirected_from.as_deref(), Some("/"));
        assert!(!direct.is_redirect());
        assert_eq!(root.page, Page::Stage(Stage::DataImport, StageView::Config));
    }

    #[test]
    fn test_every_stage_path_resolves() {
        let table = RouteTable::pipeline();
        for stage in Stage::ALL {
            for view in StageView::ALL {
                let res = table.resolve(&stage.path(view));
                assert_eq!(res.page, Page::Stage(stage, view));
            }
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let table = RouteTable::pipeline();
        let res = table.resolve("/reranking/config");
        assert!(res.is_not_found());
        assert_eq!(res.path, "/reranking/config");
        assert!(table.resolve("/data-import").is_not_found());
    }

    #[test]
    fn test_resolve_normalization() {
        let table = RouteTable::pipeline();
        let expected = Page::Stage(Stage::TextChunk, StageView::Management);

        assert_eq!(table.resolve("/text-chunk/management/").page, expected);
        assert_eq!(table.resolve("/text-chunk/management?page=2").page, expected);
        assert_eq!(table.resolve("/text-chunk/management#top").page, expected);
        assert_eq!(table.resolve("/Text-Chunk/Management").page, expected);
        assert_eq!(table.resolve("/Text-Chunk/Management").path, "/text-chunk/management");
        assert!(table.resolve("").is_redirect());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/a/b/"), "/a/b");
        assert_eq!(normalize("/a?x=1"), "/a");
        assert_eq!(normalize("/?x=1"), "/");
    }

    #[test]
    fn test_new_rejects_duplicate() {
        let result = RouteTable::new(vec![
            RouteEntry::redirect("/", "/a"),
            RouteEntry::view("/a", Page::Stage(Stage::DataImport, StageView::Config)),
            RouteEntry::view("/A/", Page::Stage(Stage::TextChunk, StageView::Config)),
        ]);
        assert!(matches!(result, Err(Error::DuplicateRoute(p)) if p == "/A/"));
    }

    #[test]
    fn test_new_requires_root_redirect() {
        let missing = RouteTable::new(vec![RouteEntry::view(
            "/a",
            Page::Stage(Stage::DataImport, StageView::Config),
        )]);
        assert!(matches!(missing, Err(Error::InvalidRouteTable(_))));

        let view = RouteTable::new(vec![RouteEntry::view(
            "/",
            Page::Stage(Stage::DataImport, StageView::Config),
        )]);
        assert!(matches!(view, Err(Error::InvalidRouteTable(_))));
    }

    #[test]
    fn test_new_rejects_bad_redirects() {
        let dangling = RouteTable::new(vec![RouteEntry::redirect("/", "/nowhere")]);
        assert!(matches!(dangling, Err(Error::InvalidRouteTable(_))));

        let chain = RouteTable::new(vec![
            RouteEntry::redirect("/", "/a"),
            RouteEntry::redirect("/a", "/b"),
            RouteEntry::view("/b", Page::Stage(Stage::DataImport, StageView::Config)),
        ]);
        assert!(matches!(chain, Err(Error::InvalidRouteTable(_))));

        let cycle = RouteTable::new(vec![RouteEntry::redirect("/", "/")]);
        assert!(matches!(cycle, Err(Error::InvalidRouteTable(_))));
    }

    #[test]
    fn test_new_rejects_relative_and_not_found() {
        let relative = RouteTable::new(vec![
            RouteEntry::redirect("/", "/a"),
            RouteEntry::view("a", Page::Stage(Stage::DataImport, StageView::Config)),
        ]);
        assert!(matches!(relative, Err(Error::InvalidRouteTable(_))));

        let not_found = RouteTable::new(vec![
            RouteEntry::redirect("/", "/a"),
            RouteEntry::view("/a", Page::NotFound),
        ]);
        assert!(matches!(not_found, Err(Error::InvalidRouteTable(_))));
    }

    #[test]
    fn test_router_initial_state() {
        let router = Router::default();
        assert_eq!(router.current().path, "/data-import/config");
        assert!(router.current().is_redirect());
        assert!(!router.can_go_back());
        assert!(!router.can_go_forward());
    }

    #[test]
    fn test_router_starting_at_deep_link() {
        let router = Router::starting_at(RouteTable::pipeline(), "/generation/management");
        assert_eq!(
            router.current().page,
            Page::Stage(Stage::Generation, StageView::Management)
        );
    }

    #[test]
    fn test_router_navigate_back_forward() {
        let mut router = Router::default();
        router.navigate("/text-chunk/config");
        router.navigate("/retrieval/management");
        assert_eq!(router.history().len(), 3);

        assert_eq!(router.back().map(|r| r.path.clone()), Some("/text-chunk/config".into()));
        assert_eq!(router.back().map(|r| r.path.clone()), Some("/data-import/config".into()));
        assert!(router.back().is_none());

        assert_eq!(
            router.forward().map(|r| r.path.clone()),
            Some("/text-chunk/config".into())
        );
    }

    #[test]
    fn test_follow_link_to_current_page_keeps_url() {
        let mut router = Router::starting_at(RouteTable::pipeline(), "/data-import/config");
        assert_eq!(router.follow_link("/"), HistoryUpdate::Keep);
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.follow_link("/data-import/config/"), HistoryUpdate::Keep);
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_follow_link_root_from_other_page_pushes_redirect_target() {
        let mut router = Router::starting_at(RouteTable::pipeline(), "/text-chunk/config");
        assert_eq!(
            router.follow_link("/"),
            HistoryUpdate::Push("/data-import/config".to_string())
        );
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn test_follow_link_unknown_path_pushes_not_found() {
        let mut router = Router::default();
        assert_eq!(router.follow_link("/nope?x=1"), HistoryUpdate::Push("/nope".to_string()));
        assert!(router.current().is_not_found());
    }

    #[test]
    fn test_sync_location_replaces_redirected_url() {
        let mut router = Router::starting_at(RouteTable::pipeline(), "/");
        assert_eq!(
            router.sync_location("/"),
            HistoryUpdate::Replace("/data-import/config".to_string())
        );
        assert_eq!(router.history().len(), 1);

        assert_eq!(router.sync_location("/vector-db/config"), HistoryUpdate::Keep);
        assert_eq!(
            router.current().page,
            Page::Stage(Stage::VectorDb, StageView::Config)
        );
    }

    #[test]
    fn test_sync_location_follows_browser_back_and_forward() {
        let mut router = Router::default();
        router.follow_link("/text-chunk/config");
        router.follow_link("/retrieval/management");

        // 戻る
        assert_eq!(router.sync_location("/text-chunk/config"), HistoryUpdate::Keep);
        assert!(router.can_go_forward());
        assert_eq!(router.history().len(), 3);

        // 進む
        router.sync_location("/retrieval/management");
        assert!(!router.can_go_forward());

        // 戻ってからのリンク遷移で進む側が破棄され、重複しない
        router.sync_location("/text-chunk/config");
        router.follow_link("/generation/config");
        let paths: Vec<&str> = router.history().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            ["/data-import/config", "/text-chunk/config", "/generation/config"]
        );
    }

    #[test]
    fn test_router_navigate_truncates_forward_history() {
        let mut router = Router::default();
        router.navigate("/text-chunk/config");
        router.navigate("/retrieval/management");
        router.back();
        router.navigate("/vector-db/config");

        assert!(!router.can_go_forward());
        let paths: Vec<&str> = router.history().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["/data-import/config", "/text-chunk/config", "/vector-db/config"]);
    }

    #[test]
    fn test_router_navigate_same_path_does_not_grow_history() {
        let mut router = Router::default();
        router.navigate("/");
        router.navigate("/data-import/config");
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_router_navigate_root_matches_direct() {
        let mut via_root = Router::starting_at(RouteTable::pipeline(), "/retrieval/config");
        let mut direct = via_root.clone();

        let a = via_root.navigate("/").clone();
        let b = direct.navigate("/data-import/config").clone();
        assert_eq!(a.path, b.path);
        assert_eq!(a.page, b.page);
    }

    #[test]
    fn test_router_replace() {
        let mut router = Router::default();
        router.navigate("/text-chunk/config");
        router.replace("/missing");
        assert_eq!(router.history().len(), 2);
        assert!(router.current().is_not_found());
    }
}
