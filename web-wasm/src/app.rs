//! メインアプリケーションコンポーネント

use crate::components::{header::Header, sidebar::Sidebar};
use crate::context::ConsoleContext;
use crate::history;
use crate::pages::PageView;
use leptos::ev;
use leptos::prelude::*;

/// メインアプリケーションコンポーネント
///
/// セッションはこのコンポーネントの生存期間と一致する。
#[component]
pub fn App() -> impl IntoView {
    let initial_path = history::current_path();
    let ctx = ConsoleContext::provide(&initial_path);
    // 初回表示でリダイレクトされた場合はURLも合わせる
    ctx.sync_from_location(&initial_path);

    // ブラウザの戻る/進む
    let popstate = window_event_listener(ev::popstate, move |_| {
        ctx.sync_from_location(&history::current_path());
    });

    on_cleanup(move || {
        popstate.remove();
        ctx.end_session();
    });

    let theme_class = move || format!("app theme-{}", ctx.app.with(|a| a.current_theme().as_str()));

    view! {
        <div class=theme_class>
            <Header/>
            <div class="layout">
                <Sidebar/>
                <main class="main-content">
                    <PageView/>
                </main>
            </div>
        </div>
    }
}
