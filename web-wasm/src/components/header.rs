//! ヘッダーコンポーネント

use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::Theme;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let theme = move || ctx.app.with(|a| a.current_theme());

    view! {
        <header class="header">
            <button
                class="btn btn-icon"
                title="サイドバーの表示切替"
                on:click=move |_| {
                    ctx.app.update(|a| {
                        a.toggle_sidebar();
                    });
                }
            >
                "☰"
            </button>

            <h1>"RAG全流程サービス"</h1>

            <Show when=move || ctx.is_loading()>
                <span class="loading-indicator">"通信中..."</span>
            </Show>

            <button
                class="btn btn-icon"
                title="テーマ切替"
                on:click=move |_| {
                    let next = theme().toggled();
                    ctx.app.update(|a| a.set_theme(next));
                }
            >
                {move || if theme() == Theme::Dark { "☀" } else { "🌙" }}
            </button>
        </header>
    }
}
