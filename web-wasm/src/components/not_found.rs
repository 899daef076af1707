//! 未定義パスの画面

use crate::components::link::Link;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::route::ROOT_PATH;

#[component]
pub fn NotFound() -> impl IntoView {
    let ctx = ConsoleContext::expect();

    view! {
        <section class="page not-found">
            <h2>"404 - ページが見つかりません"</h2>
            <p class="text-muted">{move || ctx.current_path()}</p>
            <Link href=ROOT_PATH.to_string()>"データ取込へ戻る"</Link>
        </section>
    }
}
