//! 検索画面

use super::{load_rows, parse_number};
use crate::components::notice::{Notice, NoticeBar};
use crate::components::record_table::RecordTable;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{RetrievalApi, SearchHit, SearchRecord, SearchResult};

fn history_row(record: &SearchRecord) -> Vec<String> {
    vec![
        record.search_time.clone(),
        record.query.clone(),
        record.top_k.to_string(),
        record.results_count.to_string(),
    ]
}

fn format_score(hit: &SearchHit) -> String {
    format!("{:.3}", hit.score)
}

#[component]
pub fn RetrievalConfig() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let query = RwSignal::new(String::new());
    let top_k = RwSignal::new(RetrievalApi::DEFAULT_TOP_K.to_string());
    let hits = RwSignal::new(Vec::<SearchHit>::new());
    let notice = RwSignal::new(None::<Notice>);

    let on_search = move |_| {
        let text = query.get().trim().to_string();
        if text.is_empty() {
            notice.set(Some(Notice::Error("検索クエリを入力してください".into())));
            return;
        }
        let Some(k) = parse_number(&top_k.get()).filter(|k| *k > 0) else {
            notice.set(Some(Notice::Error("取得件数は1以上の整数で入力してください".into())));
            return;
        };
        notice.set(None);
        ctx.request::<SearchResult, _>(RetrievalApi::search(&text, k), move |result| match result {
            Ok(result) => {
                notice.try_set(Some(Notice::Success(format!(
                    "「{}」の検索結果: {}件",
                    result.query,
                    result.results.len()
                ))));
                hits.try_set(result.results);
            }
            Err(e) => {
                notice.try_set(Some(Notice::Error(e.to_string())));
            }
        });
    };

    view! {
        <div class="stage-form">
            <div class="form-group">
                <label for="query">"検索クエリ"</label>
                <input
                    type="text"
                    id="query"
                    placeholder="質問や検索したい内容を入力..."
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="top-k">"取得件数"</label>
                <input
                    type="number"
                    id="top-k"
                    min="1"
                    prop:value=move || top_k.get()
                    on:input=move |ev| top_k.set(event_target_value(&ev))
                />
            </div>

            <button class="btn btn-primary" disabled=move || ctx.is_loading() on:click=on_search>
                "検索"
            </button>

            <NoticeBar notice=notice/>

            <ol class="search-results">
                <For
                    each=move || hits.get()
                    key=|hit| hit.id.clone()
                    children=|hit| {
                        view! {
                            <li class="search-hit">
                                <span class="score">{format_score(&hit)}</span>
                                <p>{hit.content.clone()}</p>
                            </li>
                        }
                    }
                />
            </ol>
        </div>
    }
}

#[component]
pub fn RetrievalManagement() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let rows = RwSignal::new(Vec::new());
    let notice = RwSignal::new(None::<Notice>);

    let reload =
        move || load_rows(ctx, RetrievalApi::get_search_history(), rows, notice, history_row);
    reload();

    view! {
        <div class="stage-management">
            <NoticeBar notice=notice/>
            <div class="toolbar">
                <button class="btn btn-secondary btn-small" on:click=move |_| reload()>"再読込"</button>
            </div>
            <RecordTable
                headers=&["検索時刻", "クエリ", "top_k", "件数"]
                rows=rows
                empty_text="検索履歴はありません"
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_row() {
        let record = SearchRecord {
            id: "s-1".into(),
            query: "RAGとは".into(),
            top_k: 5,
            search_time: "2024-01-01 10:00:00".into(),
            results_count: 3,
        };
        assert_eq!(history_row(&record), vec!["2024-01-01 10:00:00", "RAGとは", "5", "3"]);
    }

    #[test]
    fn test_format_score() {
        let hit = SearchHit { score: 0.91234, ..Default::default() };
        assert_eq!(format_score(&hit), "0.912");
    }
}
