//! Upload progress and user notices.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct StatusBannerProps {
    /// An upload is in flight
    pub loading: bool,
    /// Last notice from a failed action, if any
    pub notice: Option<String>,
    pub on_dismiss: EventHandler<MouseEvent>,
}

/// Progress line while uploading, otherwise the pending notice (if any).
#[component]
pub fn StatusBanner(props: StatusBannerProps) -> Element {
    let on_dismiss = props.on_dismiss;

    if props.loading {
        return rsx! {
            div {
                style: "padding: 12px 16px; margin: 8px 0; color: #1B4965; background: #E3F2FD; border-radius: 4px;",
                "Processing file..."
            }
        };
    }

    let Some(message) = props.notice else {
        return rsx! {};
    };

    rsx! {
        div {
            role: "alert",
            style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 16px; margin: 8px 0; background: #FFF3E0; color: #BF360C; border-left: 4px solid #FB8C00; border-radius: 4px;",
            span { "{message}" }
            button {
                style: "background: none; border: none; cursor: pointer; color: inherit;",
                onclick: move |evt| on_dismiss.call(evt),
                "Dismiss"
            }
        }
    }
}
