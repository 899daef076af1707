//! 処理結果の通知表示

use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn class(&self) -> &'static str {
        match self {
            Notice::Success(_) => "notice notice-success",
            Notice::Error(_) => "notice notice-error",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }
}

impl<E: std::fmt::Display> From<Result<String, E>> for Notice {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(text) => Notice::Success(text),
            Err(e) => Notice::Error(e.to_string()),
        }
    }
}

#[component]
pub fn NoticeBar(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    view! {
        {move || {
            notice.get().map(|n| {
                view! {
                    <div class=n.class()>
                        <span>{n.text().to_string()}</span>
                        <button class="btn btn-icon btn-small" on:click=move |_| notice.set(None)>
                            "×"
                        </button>
                    </div>
                }
            })
        }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_from_result() {
        let ok: Notice = Ok::<_, String>("完了".to_string()).into();
        assert_eq!(ok, Notice::Success("完了".to_string()));
        assert_eq!(ok.class(), "notice notice-success");

        let err: Notice = Err::<String, _>("500: boom").into();
        assert_eq!(err.text(), "500: boom");
        assert_eq!(err.class(), "notice notice-error");
    }
}
