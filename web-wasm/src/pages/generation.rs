//! 生成画面

use super::load_rows;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::record_table::RecordTable;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{GenerationApi, GenerationRecord, GenerationResult};

static MODELS: [&str; 3] = [GenerationApi::DEFAULT_MODEL, "gpt-4", "qwen-turbo"];

/// 1行1件のコンテキスト入力を分解する（空行は除く）
fn parse_context(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn history_row(record: &GenerationRecord) -> Vec<String> {
    vec![
        record.generation_time.clone(),
        record.query.clone(),
        record.model.clone(),
        record.context_count.to_string(),
        record.content_length.to_string(),
    ]
}

#[component]
pub fn GenerationConfig() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let query = RwSignal::new(String::new());
    let context = RwSignal::new(String::new());
    let model = RwSignal::new(GenerationApi::DEFAULT_MODEL.to_string());
    let answer = RwSignal::new(None::<GenerationResult>);
    let notice = RwSignal::new(None::<Notice>);

    let on_generate = move |_| {
        let text = query.get().trim().to_string();
        if text.is_empty() {
            notice.set(Some(Notice::Error("質問を入力してください".into())));
            return;
        }
        let request = GenerationApi::generate(&text, &parse_context(&context.get()), &model.get());
        notice.set(None);
        ctx.request::<GenerationResult, _>(request, move |result| match result {
            Ok(result) => {
                answer.try_set(Some(result));
            }
            Err(e) => {
                notice.try_set(Some(Notice::Error(e.to_string())));
            }
        });
    };

    view! {
        <div class="stage-form">
            <div class="form-group">
                <label for="gen-query">"質問"</label>
                <input
                    type="text"
                    id="gen-query"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="gen-context">"コンテキスト（1行1件）"</label>
                <textarea
                    id="gen-context"
                    rows="6"
                    prop:value=move || context.get()
                    on:input=move |ev| context.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="gen-model">"モデル"</label>
                <select id="gen-model" on:change=move |ev| model.set(event_target_value(&ev))>
                    {MODELS
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

            <button class="btn btn-primary" disabled=move || ctx.is_loading() on:click=on_generate>
                "生成"
            </button>

            <NoticeBar notice=notice/>

            {move || {
                answer.get().map(|result| {
                    view! {
                        <article class="generation-answer">
                            <p class="text-muted">
                                {format!("{}（コンテキスト: {}件）", result.model, result.context_used)}
                            </p>
                            <pre>{result.generated_content}</pre>
                        </article>
                    }
                })
            }}
        </div>
    }
}

#[component]
pub fn GenerationManagement() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let rows = RwSignal::new(Vec::new());
    let notice = RwSignal::new(None::<Notice>);

    let reload =
        move || load_rows(ctx, GenerationApi::get_generation_history(), rows, notice, history_row);
    reload();

    view! {
        <div class="stage-management">
            <NoticeBar notice=notice/>
            <div class="toolbar">
                <button class="btn btn-secondary btn-small" on:click=move |_| reload()>"再読込"</button>
            </div>
            <RecordTable
                headers=&["生成時刻", "質問", "モデル", "コンテキスト", "文字数"]
                rows=rows
                empty_text="生成履歴はありません"
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context() {
        let input = "RAGは検索拡張生成\n\n  ベクトルDBに格納する  \n";
        assert_eq!(
            parse_context(input),
            vec!["RAGは検索拡張生成".to_string(), "ベクトルDBに格納する".to_string()]
        );
        assert!(parse_context("   \n").is_empty());
    }

    #[test]
    fn test_history_row() {
        let record = GenerationRecord {
            id: "g-1".into(),
            query: "RAGとは".into(),
            model: "gpt-4".into(),
            context_count: 2,
            generation_time: "2024-01-01 10:00:00".into(),
            content_length: 120,
        };
        assert_eq!(
            history_row(&record),
            vec!["2024-01-01 10:00:00", "RAGとは", "gpt-4", "2", "120"]
        );
    }
}
