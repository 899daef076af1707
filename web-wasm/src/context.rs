//! コンソールのコンテキスト
//!
//! 2つのストアとルーターを `RwSignal` で包み、`provide_context` で画面に渡す。
//! ストアの変更はシグナル経由で購読中のビューへ通知される。

use crate::api;
use crate::history;
use leptos::prelude::*;
use leptos::task::spawn_local;
use rag_console_common::{
    ApiRequest, AppStore, DataImportStore, Error, Page, RouteTable, Router, Session,
};
use serde::de::DeserializeOwned;

#[derive(Clone, Copy)]
pub struct ConsoleContext {
    pub app: RwSignal<AppStore>,
    pub data_import: RwSignal<DataImportStore>,
    pub router: RwSignal<Router>,
}

impl ConsoleContext {
    /// セッションを開始し、現在のURLを初期ルートとして解決する
    pub fn new(initial_path: &str) -> Self {
        let Session { app, data_import } = Session::start();
        Self {
            app: RwSignal::new(app),
            data_import: RwSignal::new(data_import),
            router: RwSignal::new(Router::starting_at(RouteTable::pipeline(), initial_path)),
        }
    }

    pub fn provide(initial_path: &str) -> Self {
        let ctx = Self::new(initial_path);
        provide_context(ctx);
        ctx
    }

    pub fn expect() -> Self {
        expect_context::<ConsoleContext>()
    }

    pub fn current_page(&self) -> Page {
        self.router.with(|r| r.current().page)
    }

    pub fn current_path(&self) -> String {
        self.router.with(|r| r.current().path.clone())
    }

    /// リンク遷移（ブラウザ履歴に追加）
    pub fn navigate(&self, path: &str) {
        if let Some(update) = self.router.try_update(|r| r.follow_link(path)) {
            history::apply(update);
        }
    }

    /// 戻る/進む・初回表示でURLから状態を合わせる
    pub fn sync_from_location(&self, path: &str) {
        if let Some(update) = self.router.try_update(|r| r.sync_location(path)) {
            history::apply(update);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.app.with(|a| a.is_loading())
    }

    /// APIを呼び出し、完了までローディング表示にする
    pub fn request<T, F>(&self, request: ApiRequest, on_done: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<T, Error>) + 'static,
    {
        let app = self.app;
        app.update(|a| a.set_loading(true));
        spawn_local(async move {
            let result = api::execute::<T>(&request).await;
            if let Err(e) = &result {
                tracing::warn!(path = %request.path, error = %e, "request failed");
            }
            app.try_update(|a| a.set_loading(false));
            on_done(result);
        });
    }

    /// セッション終了時に両ストアを初期化する
    pub fn end_session(&self) {
        self.app.try_update(|a| *a = AppStore::default());
        self.data_import.try_update(|s| s.reset());
        tracing::debug!("session ended");
    }
}
