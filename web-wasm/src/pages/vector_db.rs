//! ベクトルDB画面

use super::load_rows;
use crate::components::notice::{Notice, NoticeBar};
use crate::components::record_table::RecordTable;
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{CollectionInfo, StoreResult, VectorDbApi};

static DB_TYPES: [&str; 3] = ["milvus", "chroma", "faiss"];

fn collection_row(collection: &CollectionInfo) -> Vec<String> {
    vec![
        collection.id.clone(),
        collection.name.clone(),
        collection.db_type.clone(),
        collection.vector_count.to_string(),
        collection.create_time.clone(),
        collection.status.clone(),
    ]
}

#[component]
pub fn VectorDbConfig() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let db_type = RwSignal::new(DB_TYPES[0].to_string());
    let collection = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<Notice>);

    let on_store = move |_| {
        let name = collection.get().trim().to_string();
        if name.is_empty() {
            notice.set(Some(Notice::Error("コレクション名を入力してください".into())));
            return;
        }
        let request = VectorDbApi::store_vectors(&db_type.get(), &name);
        ctx.request::<StoreResult, _>(request, move |result| {
            let result = result.map(|r| format!("{}（コレクションID: {}）", r.message, r.collection_id));
            notice.try_set(Some(Notice::from(result)));
        });
    };

    view! {
        <div class="stage-form">
            <div class="form-group">
                <label for="db-type">"データベース"</label>
                <select id="db-type" on:change=move |ev| db_type.set(event_target_value(&ev))>
                    {DB_TYPES
                        .iter()
                        .map(|name| {
                            view! {
                                <option value=*name selected=move || db_type.with(|t| t == name)>
                                    {*name}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="collection-name">"コレクション名"</label>
                <input
                    type="text"
                    id="collection-name"
                    placeholder="例: manuals"
                    prop:value=move || collection.get()
                    on:input=move |ev| collection.set(event_target_value(&ev))
                />
            </div>

            <button class="btn btn-primary" disabled=move || ctx.is_loading() on:click=on_store>
                "ベクトルを格納"
            </button>

            <NoticeBar notice=notice/>
        </div>
    }
}

#[component]
pub fn VectorDbManagement() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let rows = RwSignal::new(Vec::new());
    let notice = RwSignal::new(None::<Notice>);

    let reload =
        move || load_rows(ctx, VectorDbApi::get_collection_list(), rows, notice, collection_row);
    reload();

    view! {
        <div class="stage-management">
            <NoticeBar notice=notice/>
            <div class="toolbar">
                <button class="btn btn-secondary btn-small" on:click=move |_| reload()>"再読込"</button>
            </div>
            <RecordTable
                headers=&["ID", "名前", "DB", "ベクトル数", "作成時刻", "状態"]
                rows=rows
                empty_text="コレクションはまだありません"
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_row() {
        let collection = CollectionInfo {
            id: "col-1".into(),
            name: "manuals".into(),
            db_type: "milvus".into(),
            create_time: "2024-01-01 10:00:00".into(),
            status: "success".into(),
            vector_count: 15,
        };
        assert_eq!(
            collection_row(&collection),
            vec!["col-1", "manuals", "milvus", "15", "2024-01-01 10:00:00", "success"]
        );
    }
}
