//! ステージごとの画面

pub mod data_import;
pub mod generation;
pub mod retrieval;
pub mod text_chunk;
pub mod vector_db;
pub mod vector_embed;

use crate::components::not_found::NotFound;
use crate::components::notice::Notice;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{ApiRequest, Page, Stage, StageView};
use serde::de::DeserializeOwned;

/// 現在のルートに対応する画面を表示する
#[component]
pub fn PageView() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    // 同じ画面への遷移では再描画しない
    let page = Memo::new(move |_| ctx.current_page());

    move || match page.get() {
        Page::Stage(stage, view) => view! {
            <section class="page">
                <h2 class="page-title">{Page::Stage(stage, view).title()}</h2>
                {stage_view(stage, view)}
            </section>
        }
        .into_any(),
        Page::NotFound => view! { <NotFound/> }.into_any(),
    }
}

fn stage_view(stage: Stage, view: StageView) -> AnyView {
    use StageView::{Config, Management};
    match (stage, view) {
        (Stage::DataImport, Config) => view! { <data_import::ImportConfig/> }.into_any(),
        (Stage::DataImport, Management) => view! { <data_import::ImportManagement/> }.into_any(),
        (Stage::TextChunk, Config) => view! { <text_chunk::ChunkConfig/> }.into_any(),
        (Stage::TextChunk, Management) => view! { <text_chunk::ChunkManagement/> }.into_any(),
        (Stage::VectorEmbed, Config) => view! { <vector_embed::EmbedConfig/> }.into_any(),
        (Stage::VectorEmbed, Management) => view! { <vector_embed::EmbedManagement/> }.into_any(),
        (Stage::VectorDb, Config) => view! { <vector_db::VectorDbConfig/> }.into_any(),
        (Stage::VectorDb, Management) => view! { <vector_db::VectorDbManagement/> }.into_any(),
        (Stage::Retrieval, Config) => view! { <retrieval::RetrievalConfig/> }.into_any(),
        (Stage::Retrieval, Management) => view! { <retrieval::RetrievalManagement/> }.into_any(),
        (Stage::Generation, Config) => view! { <generation::GenerationConfig/> }.into_any(),
        (Stage::Generation, Management) => view! { <generation::GenerationManagement/> }.into_any(),
    }
}

/// 一覧APIを呼び出し、各レコードを表の行に変換して書き込む
pub(crate) fn load_rows<T, F>(
    ctx: ConsoleContext,
    request: ApiRequest,
    rows: RwSignal<Vec<Vec<String>>>,
    notice: RwSignal<Option<Notice>>,
    to_row: F,
) where
    T: DeserializeOwned + 'static,
    F: Fn(&T) -> Vec<String> + 'static,
{
    ctx.request::<Vec<T>, _>(request, move |result| match result {
        Ok(items) => {
            rows.try_set(items.iter().map(&to_row).collect());
        }
        Err(e) => {
            notice.try_set(Some(Notice::Error(e.to_string())));
        }
    });
}

/// 数値入力を解釈する（空や不正値は `None`）
pub(crate) fn parse_number(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}
