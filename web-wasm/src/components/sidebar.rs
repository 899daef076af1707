//! サイドバー（ステージナビゲーション）

use crate::components::link::Link;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{Page, Stage, StageView};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let collapsed = move || ctx.app.with(|a| a.is_sidebar_collapsed());

    view! {
        <nav class=move || if collapsed() { "sidebar collapsed" } else { "sidebar" }>
            <ul class="stage-list">
                {Stage::ALL
                    .into_iter()
                    .map(|stage| {
                        let is_current = move || {
                            matches!(ctx.current_page(), Page::Stage(s, _) if s == stage)
                        };
                        view! {
                            <li class=move || if is_current() { "stage-item current" } else { "stage-item" }>
                                <span class="stage-label">{stage.label()}</span>
                                <ul class="view-list">
                                    {StageView::ALL
                                        .into_iter()
                                        .map(|view| {
                                            view! {
                                                <li>
                                                    <Link href=stage.path(view)>{view.label()}</Link>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
