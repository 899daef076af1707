//! データ取込画面
//!
//! 取込の状態はデータ取込ストアに保持し、他の画面と共有する。

use crate::components::notice::{Notice, NoticeBar};
use crate::components::progress_bar::ProgressBar;
use crate::components::record_table::{format_size, status_class, RecordTable};
use crate::context::ConsoleContext;
use leptos::prelude::*;
use rag_console_common::{
    DataImportApi, DeleteResult, FileInfo, ImportRecord, UploadResult, IMPORTED_AT_FORMAT,
};

/// ファイル種別と、その種別で選べる形式
static FILE_TYPES: [(&str, &str, &[&str]); 3] = [
    ("structured", "構造化", &["excel", "txt"]),
    ("semi-structured", "半構造化", &["markdown"]),
    ("unstructured", "非構造化", &["pdf", "word"]),
];

static PDF_PARSERS: [&str; 2] = ["PyPDF", "PyMuPDF"];

fn formats_for(file_type: &str) -> &'static [&'static str] {
    FILE_TYPES
        .iter()
        .find(|(key, _, _)| *key == file_type)
        .map(|(_, _, formats)| *formats)
        .unwrap_or(&[])
}

/// PDFの場合のみパーサを送る
fn parser_for<'a>(file_format: &str, parser: &'a str) -> Option<&'a str> {
    (file_format == "pdf" && !parser.is_empty()).then_some(parser)
}

/// 取込時刻（CLIと同じ書式のローカル時刻）
fn now_string() -> String {
    chrono::Local::now().format(IMPORTED_AT_FORMAT).to_string()
}

fn history_row(record: &ImportRecord) -> Vec<String> {
    vec![
        record.imported_at.clone(),
        record.file_id.clone(),
        format!("{} / {}", record.file_type, record.file_format),
        record.pdf_parser.clone().unwrap_or_else(|| "-".to_string()),
        record.processed_chunks.to_string(),
        record.message.clone(),
    ]
}

#[component]
pub fn ImportConfig() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let file_type = RwSignal::new(FILE_TYPES[0].0.to_string());
    let file_format = RwSignal::new(FILE_TYPES[0].2[0].to_string());
    let pdf_parser = RwSignal::new(PDF_PARSERS[0].to_string());
    let notice = RwSignal::new(None::<Notice>);

    let progress = Signal::derive(move || ctx.data_import.with(|s| s.upload_progress()));
    let is_pdf = move || file_format.with(|f| f == "pdf");

    let on_upload = move |_| {
        let (ty, format, parser) = (file_type.get(), file_format.get(), pdf_parser.get());
        let parser = parser_for(&format, &parser).map(str::to_string);
        let request = DataImportApi::upload_file(&ty, &format, parser.as_deref());

        ctx.data_import.update(|s| s.begin_upload());
        notice.set(None);

        ctx.request::<UploadResult, _>(request, move |result| match result {
            Ok(result) => {
                let record = ImportRecord::from_upload(
                    &result,
                    &ty,
                    &format,
                    parser.as_deref(),
                    now_string(),
                );
                ctx.data_import.try_update(|s| s.complete_upload(record));
                notice.try_set(Some(Notice::Success(format!(
                    "{}（チャンク数: {}）",
                    result.message, result.processed_chunks
                ))));
            }
            Err(e) => {
                notice.try_set(Some(Notice::Error(e.to_string())));
            }
        });
    };

    view! {
        <div class="stage-form">
            <div class="form-group">
                <label for="file-type">"ファイル種別"</label>
                <select
                    id="file-type"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if let Some(first) = formats_for(&value).first() {
                            file_format.set(first.to_string());
                        }
                        file_type.set(value);
                    }
                >
                    {FILE_TYPES
                        .iter()
                        .map(|(key, label, _)| {
                            view! {
                                <option value=*key selected=move || file_type.with(|t| t == key)>
                                    {*label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="file-format">"ファイル形式"</label>
                <select
                    id="file-format"
                    on:change=move |ev| file_format.set(event_target_value(&ev))
                >
                    {move || {
                        formats_for(&file_type.get())
                            .iter()
                            .map(|format| {
                                view! {
                                    <option value=*format selected=move || file_format.with(|f| f == format)>
                                        {*format}
                                    </option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </div>

            <Show when=is_pdf>
                <div class="form-group">
                    <label for="pdf-parser">"PDFパーサ"</label>
                    <select
                        id="pdf-parser"
                        on:change=move |ev| pdf_parser.set(event_target_value(&ev))
                    >
                        {PDF_PARSERS
                            .iter()
                            .map(|parser| {
                                view! {
                                    <option value=*parser selected=move || pdf_parser.with(|p| p == parser)>
                                        {*parser}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>
            </Show>

            <button
                class="btn btn-primary"
                disabled=move || ctx.is_loading()
                on:click=on_upload
            >
                "アップロード"
            </button>

            <Show when=move || { ctx.is_loading() || progress.get() > 0 }>
                <ProgressBar progress=progress/>
            </Show>

            <NoticeBar notice=notice/>
        </div>
    }
}

#[component]
pub fn ImportManagement() -> impl IntoView {
    let ctx = ConsoleContext::expect();
    let notice = RwSignal::new(None::<Notice>);

    ctx.request::<Vec<FileInfo>, _>(DataImportApi::get_file_list(), move |result| match result {
        Ok(files) => {
            ctx.data_import.try_update(|s| s.set_files(files));
        }
        Err(e) => {
            notice.try_set(Some(Notice::Error(e.to_string())));
        }
    });

    let on_delete = move |file_id: String, name: String| {
        let confirmed = window()
            .confirm_with_message(&format!("{} を削除しますか？", name))
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let request = match DataImportApi::delete_file(&file_id) {
            Ok(request) => request,
            Err(e) => {
                notice.set(Some(Notice::Error(e.to_string())));
                return;
            }
        };

        ctx.request::<DeleteResult, _>(request, move |result| match result {
            Ok(result) => {
                let removed = ctx.data_import.try_update(|s| match s.position_of(&file_id) {
                    Some(index) => s.remove_file(index).map(Some),
                    None => Ok(None),
                });
                if let Some(Err(e)) = removed {
                    tracing::warn!(
                        file_id = %file_id,
                        error = %e,
                        "failed to remove file from store"
                    );
                }
                notice.try_set(Some(Notice::Success(result.message)));
            }
            Err(e) => {
                notice.try_set(Some(Notice::Error(e.to_string())));
            }
        });
    };

    let history_rows = Signal::derive(move || {
        ctx.data_import.with(|s| s.import_history().map(history_row).collect::<Vec<_>>())
    });

    view! {
        <div class="stage-management">
            <NoticeBar notice=notice/>

            <h3>"取込済みファイル"</h3>
            <Show
                when=move || ctx.data_import.with(|s| !s.files().is_empty())
                fallback=|| view! { <p class="text-muted">"取込済みファイルはありません"</p> }
            >
                <table class="record-table">
                    <thead>
                        <tr>
                            <th>"ファイル名"</th>
                            <th>"形式"</th>
                            <th>"種別"</th>
                            <th>"サイズ"</th>
                            <th>"アップロード時刻"</th>
                            <th>"状態"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || ctx.data_import.with(|s| s.files().to_vec())
                            key=|file| file.id.clone()
                            children=move |file| {
                                let (id, name) = (file.id.clone(), file.name.clone());
                                let status = match &file.error_message {
                                    Some(msg) if file.is_error() => format!("{} ({})", file.status, msg),
                                    _ => file.status.clone(),
                                };
                                view! {
                                    <tr>
                                        <td>{file.name.clone()}</td>
                                        <td>{file.format.clone()}</td>
                                        <td>{file.file_type.clone()}</td>
                                        <td>{format_size(file.size)}</td>
                                        <td>{file.upload_time.clone()}</td>
                                        <td>
                                            <span class=format!("badge {}", status_class(&file.status))>
                                                {status}
                                            </span>
                                        </td>
                                        <td>
                                            <button
                                                class="btn btn-tertiary btn-small"
                                                disabled=move || ctx.is_loading()
                                                on:click=move |_| on_delete(id.clone(), name.clone())
                                            >
                                                "削除"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>

            <h3>{move || format!("取込履歴（{}件）", ctx.data_import.with(|s| s.history_len()))}</h3>
            <RecordTable
                headers=&["取込時刻", "ファイルID", "種別 / 形式", "PDFパーサ", "チャンク数", "メッセージ"]
                rows=history_rows
                empty_text="このセッションでの取込はまだありません"
            />
        </div>
    }
}
