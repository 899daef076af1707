//! ベクトル埋め込み画面

use super::{load_rows, parse_number};
use crate::components::notice::{Notice, NoticeBar};
use crate::components::record_table::RecordTable;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{EmbedRecord, EmbedResult, VectorEmbedApi};

static EMBED_MODELS: [&str; 3] = ["text-embedding-ada-002", "bge-large-zh", "m3e-base"];

fn embed_row(record: &EmbedRecord) -> Vec<String> {
    vec![
        record.id.clone(),
        record.model.clone(),
        record.batch_size.to_string(),
        record.total_vectors.to_string(),
        record.dimension.to_string(),
        record.process_time.clone(),
        record.status.clone(),
    ]
}

#[component]
pub fn EmbedConfig() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let model = RwSignal::new(EMBED_MODELS[0].to_string());
    let batch_size = RwSignal::new("32".to_string());
    let notice = RwSignal::new(None::<Notice>);

    let on_run = move |_| {
        let Some(batch) = parse_number(&batch_size.get()).filter(|b| *b > 0) else {
            notice.set(Some(Notice::Error("バッチサイズは1以上の整数で入力してください".into())));
            return;
        };
        let request = VectorEmbedApi::process(&model.get(), batch);
        ctx.request::<EmbedResult, _>(request, move |result| {
            let result = result.map(|r| {
                format!("{}（ID: {}, ベクトル数: {}）", r.message, r.vector_id, r.total_vectors)
            });
            notice.try_set(Some(Notice::from(result)));
        });
    };

    view! {
        <div class="stage-form">
            <div class="form-group">
                <label for="embed-model">"埋め込みモデル"</label>
                <select id="embed-model" on:change=move |ev| model.set(event_target_value(&ev))>
                    {EMBED_MODELS
                        .iter()
                        .map(|name| {
                            view! {
                                <option value=*name selected=move || model.with(|m| m == name)>
                                    {*name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="batch-size">"バッチサイズ"</label>
                <input
                    type="number"
                    id="batch-size"
                    min="1"
                    prop:value=move || batch_size.get()
                    on:input=move |ev| batch_size.set(event_target_value(&ev))
                />
            </div>

            <button class="btn btn-primary" disabled=move || ctx.is_loading() on:click=on_run>
                "埋め込みを実行"
            </button>

            <NoticeBar notice=notice/>
        </div>
    }
}

#[component]
pub fn EmbedManagement() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let rows = RwSignal::new(Vec::new());
    let notice = RwSignal::new(None::<Notice>);

    let reload = move || load_rows(ctx, VectorEmbedApi::get_vector_list(), rows, notice, embed_row);
    reload();

    view! {
        <div class="stage-management">
            <NoticeBar notice=notice/>
            <div class="toolbar">
                <button class="btn btn-secondary btn-small" on:click=move |_| reload()>"再読込"</button>
            </div>
            <RecordTable
                headers=&["ID", "モデル", "バッチ", "ベクトル数", "次元", "処理時刻", "状態"]
                rows=rows
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_row() {
        let record = EmbedRecord {
            id: "v-1".into(),
            model: "bge-large-zh".into(),
            batch_size: 32,
            process_time: "2024-01-01 10:00:00".into(),
            status: "success".into(),
            total_vectors: 15,
            dimension: 768,
        };
        assert_eq!(
            embed_row(&record),
            vec!["v-1", "bge-large-zh", "32", "15", "768", "2024-01-01 10:00:00", "success"]
        );
    }
}
