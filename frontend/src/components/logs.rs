//! Diagnostic log panel.
//!
//! Everything the workflow reports (schema loads, saves, failures) is
//! appended here and mirrored to the browser console.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::{LogEntry, LogLevel, MAX_LOG_ENTRIES};

/// Request animation frame helper for smooth scrolling
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    if let Some(window) = web_sys::window() {
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::debug!("requestAnimationFrame unavailable");
        }
    }
    closure.forget();
}

/// Append an entry, dropping the oldest past `MAX_LOG_ENTRIES`.
pub fn add_log(set_logs: WriteSignal<Vec<LogEntry>>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => log::error!("{}", message),
        LogLevel::Warning => log::warn!("{}", message),
        LogLevel::Info | LogLevel::Success => log::info!("{}", message),
    }

    let entry = LogEntry {
        level,
        message: message.to_string(),
        timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
    };

    set_logs.update(|logs| {
        logs.push(entry);
        if logs.len() > MAX_LOG_ENTRIES {
            logs.remove(0);
        }
    });
}

#[component]
pub fn LogsPanel(
    logs: ReadSignal<Vec<LogEntry>>,
    /// Set logs signal (for clearing)
    set_logs: WriteSignal<Vec<LogEntry>>,
) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Keep the newest entry in view
    create_effect(move |_| {
        let _ = logs.get();
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"📋 Activity"</span>
                <button
                    class="logs-clear"
                    on:click=move |_| set_logs.set(vec![])
                >
                    "Clear"
                </button>
            </div>
            <div class="logs-content" node_ref=logs_container>
                <Show
                    when=move || !logs.with(Vec::is_empty)
                    fallback=|| view! { <div class="log-empty">"No activity yet"</div> }
                >
                    {move || {
                        logs.get()
                            .into_iter()
                            .map(|entry| view! {
                                <div class=format!("log-entry {}", entry.level.css_class())>
                                    <span class="log-time">"[" {entry.timestamp} "] "</span>
                                    {entry.message}
                                </div>
                            })
                            .collect_view()
                    }}
                </Show>
            </div>
        </div>
    }
}
