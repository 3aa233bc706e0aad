//! Shared Dioxus components and Chart.js bridge for the production dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for Chart.js functions via `js_sys::eval()`
//! - `renderer`: `ChartRenderer`/`ChartSurface` implementations bound to canvases
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (header, canvas container, notices, MSE summary)

pub mod components;
pub mod js_bridge;
pub mod renderer;
pub mod state;
