//! File picker plus the fit and forecast buttons.

use dioxus::prelude::*;

/// DOM id of the CSV file input.
pub const CSV_INPUT_ID: &str = "csv-input";

#[derive(Props, Clone, PartialEq)]
pub struct ActionBarProps {
    /// Fired when the file selection changes
    pub on_file: EventHandler<FormEvent>,
    pub on_fit: EventHandler<MouseEvent>,
    pub on_forecast: EventHandler<MouseEvent>,
    /// Disable actions while an upload is in flight
    #[props(default = false)]
    pub busy: bool,
}

#[component]
pub fn ActionBar(props: ActionBarProps) -> Element {
    let on_file = props.on_file;
    let on_fit = props.on_fit;
    let on_forecast = props.on_forecast;

    rsx! {
        div {
            style: "margin: 8px 0 16px 0; display: flex; gap: 12px; align-items: center;",
            input {
                id: CSV_INPUT_ID,
                r#type: "file",
                accept: ".csv",
                onchange: move |evt| on_file.call(evt),
            }
            button {
                disabled: props.busy,
                onclick: move |evt| on_fit.call(evt),
                "Run fit"
            }
            button {
                disabled: props.busy,
                onclick: move |evt| on_forecast.call(evt),
                "Run forecast"
            }
        }
    }
}
