//! プログレスバーコンポーネント

use leptos::prelude::*;

#[component]
pub fn ProgressBar(#[prop(into)] progress: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {}%", progress.get())
                />
            </div>
            <p class="progress-text">
                {move || progress_label(progress.get())}
            </p>
        </div>
    }
}

fn progress_label(progress: u8) -> String {
    if progress >= 100 {
        "完了".to_string()
    } else {
        format!("処理中... {}%", progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_label() {
        assert_eq!(progress_label(0), "処理中... 0%");
        assert_eq!(progress_label(42), "処理中... 42%");
        assert_eq!(progress_label(100), "完了");
    }
}
