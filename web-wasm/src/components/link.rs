//! 画面内リンク

use crate::context::ConsoleContext;
use leptos::prelude::*;

/// クリックでページ遷移せずにルーターを進めるリンク
#[component]
pub fn Link(href: String, children: Children) -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let target = href.clone();
    let is_active = {
        let href = href.clone();
        move || ctx.current_path() == href
    };

    view! {
        <a
            href=href
            class=move || if is_active() { "nav-link active" } else { "nav-link" }
            on:click=move |ev| {
                ev.prevent_default();
                ctx.navigate(&target);
            }
        >
            {children()}
        </a>
    }
}
