use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Text shown in a banner plus its tone.
#[derive(Clone, Debug, PartialEq)]
pub struct NoticeText {
    pub kind: NoticeKind,
    pub text: String,
}

impl NoticeText {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeProps {
    pub notice: Option<NoticeText>,
    pub on_dismiss: Callback<()>,
}

/// Dismissible banner used for login / register / password feedback.
#[function_component(Notice)]
pub fn notice(props: &NoticeProps) -> Html {
    let Some(n) = &props.notice else {
        return Html::default();
    };
    let class = match n.kind {
        NoticeKind::Success => "notice notice-success",
        NoticeKind::Error => "notice notice-error",
        NoticeKind::Info => "notice notice-info",
    };
    let dismiss = props.on_dismiss.reform(|_: MouseEvent| ());

    html! {
        <div {class} role="alert">
            <span class="notice-text">{ &n.text }</span>
            <button class="notice-close" onclick={dismiss}>{ "×" }</button>
        </div>
    }
}
