//! 一覧表示テーブル

use leptos::prelude::*;

/// 見出しと行データから一覧を描画する
///
/// 行が空の場合は `empty_text` を表示する。
#[component]
pub fn RecordTable(
    headers: &'static [&'static str],
    #[prop(into)] rows: Signal<Vec<Vec<String>>>,
    #[prop(default = "データがありません")] empty_text: &'static str,
) -> impl IntoView {
    view! {
        <Show
            when=move || rows.with(|r| !r.is_empty())
            fallback=move || view! { <p class="text-muted">{empty_text}</p> }
        >
            <table class="record-table">
                <thead>
                    <tr>
                        {headers.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        rows.get()
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <tr>
                                        {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </Show>
    }
}

/// ステータス文字列をバッジ用のCSSクラスに変換
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "success" | "completed" | "done" | "active" => "status-success",
        "error" | "failed" => "status-error",
        "processing" | "pending" | "running" => "status-pending",
        _ => "status-unknown",
    }
}

/// バイト数を人が読める単位に変換
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class("success"), "status-success");
        assert_eq!(status_class("ERROR"), "status-error");
        assert_eq!(status_class("processing"), "status-pending");
        assert_eq!(status_class("???"), "status-unknown");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
