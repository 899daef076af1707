//! テキスト分割画面

use super::{load_rows, parse_number};
use crate::components::notice::{Notice, NoticeBar};
use crate::components::record_table::RecordTable;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{ChunkResult, ChunkSummary, TextChunkApi};

static CHUNK_METHODS: [(&str, &str); 4] = [
    ("fixed", "固定長"),
    ("semantic", "意味単位"),
    ("sentence", "文単位"),
    ("paragraph", "段落単位"),
];

fn chunk_row(chunk: &ChunkSummary) -> Vec<String> {
    vec![
        chunk.id.clone(),
        chunk.method.clone(),
        chunk.chunk_size.to_string(),
        chunk.overlap_size.to_string(),
        chunk.total_chunks.to_string(),
        chunk.process_time.clone(),
        chunk.status.clone(),
    ]
}

#[component]
pub fn ChunkConfig() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let method = RwSignal::new(CHUNK_METHODS[0].0.to_string());
    let size = RwSignal::new("512".to_string());
    let overlap = RwSignal::new("50".to_string());
    let notice = RwSignal::new(None::<Notice>);

    let on_run = move |_| {
        let (Some(chunk_size), Some(overlap_size)) =
            (parse_number(&size.get()), parse_number(&overlap.get()))
        else {
            notice.set(Some(Notice::Error("チャンクサイズと重なりは0以上の整数で入力してください".into())));
            return;
        };
        let request = TextChunkApi::process(&method.get(), chunk_size, overlap_size);
        ctx.request::<ChunkResult, _>(request, move |result| {
            let result = result.map(|r| {
                format!("{}（ID: {}, チャンク数: {}）", r.message, r.chunk_id, r.total_chunks)
            });
            notice.try_set(Some(Notice::from(result)));
        });
    };

    view! {
        <div class="stage-form">
            <div class="form-group">
                <label for="chunk-method">"分割方式"</label>
                <select id="chunk-method" on:change=move |ev| method.set(event_target_value(&ev))>
                    {CHUNK_METHODS
                        .iter()
                        .map(|(key, label)| {
                            view! {
                                <option value=*key selected=move || method.with(|m| m == key)>
                                    {*label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="chunk-size">"チャンクサイズ（文字）"</label>
                <input
                    type="number"
                    id="chunk-size"
                    min="1"
                    prop:value=move || size.get()
                    on:input=move |ev| size.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="overlap-size">"重なり（文字）"</label>
                <input
                    type="number"
                    id="overlap-size"
                    min="0"
                    prop:value=move || overlap.get()
                    on:input=move |ev| overlap.set(event_target_value(&ev))
                />
            </div>

            <button class="btn btn-primary" disabled=move || ctx.is_loading() on:click=on_run>
                "分割を実行"
            </button>

            <NoticeBar notice=notice/>
        </div>
    }
}

#[component]
pub fn ChunkManagement() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let rows = RwSignal::new(Vec::new());
    let notice = RwSignal::new(None::<Notice>);

    let reload = move || load_rows(ctx, TextChunkApi::get_chunk_list(), rows, notice, chunk_row);
    reload();

    view! {
        <div class="stage-management">
            <NoticeBar notice=notice/>
            <div class="toolbar">
                <button class="btn btn-secondary btn-small" on:click=move |_| reload()>"再読込"</button>
            </div>
            <RecordTable
                headers=&["ID", "方式", "サイズ", "重なり", "チャンク数", "処理時刻", "状態"]
                rows=rows
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_row() {
        let chunk = ChunkSummary {
            id: "c-1".into(),
            method: "fixed".into(),
            chunk_size: 512,
            overlap_size: 50,
            total_chunks: 20,
            process_time: "2024-01-01 10:00:00".into(),
            status: "success".into(),
        };
        assert_eq!(
            chunk_row(&chunk),
            vec!["c-1", "fixed", "512", "50", "20", "2024-01-01 10:00:00", "success"]
        );
    }
}
