/// Reusable UI components

use yew::prelude::*;
use patternfly_yew::prelude::*;

/// Message shown to the user after an action
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Notice {
        Notice { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Notice {
        Notice { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Notice {
        Notice { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Notice {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notice: Notice,
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    let (alert_type, title) = match props.notice.level {
        NoticeLevel::Info => (AlertType::Info, "Favorites"),
        NoticeLevel::Success => (AlertType::Success, "Done"),
        NoticeLevel::Warning => (AlertType::Warning, "Warning"),
        NoticeLevel::Error => (AlertType::Danger, "Error"),
    };

    html! {
        <div class="favorites-notice">
            <Alert r#type={alert_type} title={title} inline={true}>
                <p class="message-paragraph">{&props.notice.message}</p>
                <Button onclick={props.on_dismiss.reform(|_| ())} variant={ButtonVariant::Secondary}>
                    {"Dismiss"}
                </Button>
            </Alert>
        </div>
    }
}

/// Grip shown on draggable rows
#[function_component(DragHandle)]
pub fn drag_handle() -> Html {
    html! {
        <span class="favorite-drag-handle" title="Drag to reorder" aria-hidden="true">{"⋮⋮"}</span>
    }
}

#[derive(Properties, PartialEq)]
pub struct ExternalBadgeProps {
    /// Hostname the link points at, if it has one
    #[prop_or_default]
    pub host: Option<String>,
}

/// Warning marker for links that belong to another site
#[function_component(ExternalBadge)]
pub fn external_badge(props: &ExternalBadgeProps) -> Html {
    let title = match &props.host {
        Some(host) => format!("From another site: {}", host),
        None => "Not a link on this site".to_string(),
    };

    html! {
        <span class="favorite-external" title={title}>{"⚠️"}</span>
    }
}
