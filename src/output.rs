//! 端末出力ヘルパー

use indicatif::{ProgressBar, ProgressStyle};
use rag_console_common::route::{RouteTable, RouteTarget};
use rag_console_common::Resolution;
use serde::Serialize;
use std::time::Duration;

/// 通信中に表示するスピナー
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 列幅を揃えた表を出力
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", render_table(headers, rows));
}

pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let format_row = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(display_width(cell));
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_row(headers.to_vec())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

/// 全角文字を幅2として数える
fn display_width(s: &str) -> usize {
    s.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

pub fn route_rows(table: &RouteTable) -> Vec<Vec<String>> {
    table
        .entries()
        .iter()
        .map(|entry| match &entry.target {
            RouteTarget::View(page) => vec![entry.path.clone(), page.title()],
            RouteTarget::Redirect(to) => vec![entry.path.clone(), format!("→ {}", to)],
        })
        .collect()
}

pub fn describe_resolution(res: &Resolution) -> String {
    match &res.redirected_from {
        Some(from) => format!("{} → {} ({})", from, res.path, res.page.title()),
        None if res.is_not_found() => format!("{} : {}", res.path, res.page.title()),
        None => format!("{} ({})", res.path, res.page.title()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_alignment() {
        let rows = vec![
            vec!["a1".to_string(), "success".to_string()],
            vec!["long-id".to_string(), "error".to_string()],
        ];
        let table = render_table(&["ID", "状態"], &rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "ID       状態");
        assert_eq!(lines[1], "-------  -------");
        assert_eq!(lines[2], "a1       success");
        assert_eq!(lines[3], "long-id  error");
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("生成"), 4);
    }

    #[test]
    fn test_route_rows() {
        let rows = route_rows(&RouteTable::pipeline());
        assert_eq!(rows.len(), 13);
        assert_eq!(rows[0], vec!["/".to_string(), "→ /data-import/config".to_string()]);
        assert_eq!(rows[1][1], "データ取込 - 設定");
    }

    #[test]
    fn test_describe_resolution() {
        let table = RouteTable::pipeline();
        assert_eq!(
            describe_resolution(&table.resolve("/")),
            "/ → /data-import/config (データ取込 - 設定)"
        );
        assert_eq!(
            describe_resolution(&table.resolve("/nope")),
            "/nope : ページが見つかりません"
        );
    }
}
