//! Product intake page.
//!
//! Drives [`Workflow`] from the UI: scanner → type selector → schema fetch →
//! dynamic form → save. Failures are logged to the activity panel and leave
//! the page where it was.

use leptos::*;
use serde_json::{Map, Value};
use web_sys::File;

use crate::services::{create_product, SchemaService};
use crate::workflow::{Applied, PendingSave, Workflow, WorkflowError, WorkflowState};
use crate::{
    add_log, DynamicForm, LogEntry, LogLevel, ProductType, ScannerPanel, TypeSelector, API_URL,
};

const STEPS: [&str; 5] = ["Scan", "Type", "Details", "Save", "Done"];

fn step_index(state: WorkflowState) -> usize {
    match state {
        WorkflowState::Scanning => 0,
        WorkflowState::TypeSelected => 1,
        WorkflowState::SchemaLoading | WorkflowState::FormReady => 2,
        WorkflowState::Saving => 3,
        WorkflowState::Saved => 4,
    }
}

#[component]
pub fn ProductCreation(set_logs: WriteSignal<Vec<LogEntry>>) -> impl IntoView {
    let workflow = create_rw_signal(Workflow::new());
    let schema_service = store_value(SchemaService::default());

    let state = create_memo(move |_| workflow.with(Workflow::state));
    let scanned_id = create_memo(move |_| workflow.with(|w| w.scanned_id().map(str::to_string)));
    let product_type = create_memo(move |_| workflow.with(Workflow::product_type));
    let schema = create_memo(move |_| workflow.with(|w| w.schema().to_vec()));
    let last_error = create_memo(move |_| workflow.with(|w| w.last_error().map(str::to_string)));
    let can_select_type = create_memo(move |_| workflow.with(Workflow::can_select_type));
    let can_reset = create_memo(move |_| workflow.with(Workflow::can_reset));
    let form_visible = create_memo(move |_| {
        matches!(state.get(), WorkflowState::FormReady | WorkflowState::Saving)
    });

    let on_scan = Callback::new(move |decoded: Vec<String>| {
        match workflow.try_update(|w| w.scan(&decoded).map(str::to_string)) {
            Some(Ok(code)) => add_log(set_logs, LogLevel::Info, &format!("🔎 Scanned {}", code)),
            Some(Err(WorkflowError::EmptyScan)) => {
                add_log(set_logs, LogLevel::Warning, "⚠️ Scan contained no readable code")
            }
            // repeated frames after the first successful scan
            _ => {}
        }
    });

    let on_type = Callback::new(move |ty: ProductType| {
        let ticket = match workflow.try_update(|w| w.select_type(ty)) {
            Some(Ok(ticket)) => ticket,
            Some(Err(e)) => {
                add_log(set_logs, LogLevel::Warning, &format!("⚠️ {}", e));
                return;
            }
            None => return,
        };

        add_log(set_logs, LogLevel::Info, &format!("📋 Loading {} form...", ty.label()));
        let service = schema_service.get_value();

        spawn_local(async move {
            match service.fetch(ty).await {
                Ok(fields) => {
                    let count = fields.len();
                    match workflow.try_update(|w| w.schema_loaded(ticket, fields)) {
                        Some(Applied::Current) => add_log(
                            set_logs,
                            LogLevel::Success,
                            &format!("✅ {} form ready ({} fields)", ty.label(), count),
                        ),
                        Some(Applied::Stale) => {
                            log::debug!("Dropped superseded {} schema", ty.as_str())
                        }
                        None => {}
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    let applied = workflow.try_update(|w| w.schema_failed(ticket, message.clone()));
                    if applied == Some(Applied::Current) {
                        add_log(
                            set_logs,
                            LogLevel::Error,
                            &format!("❌ Could not load {} form: {}", ty.label(), message),
                        );
                    }
                }
            }
        });
    });

    let on_media = Callback::new(move |(key, file): (String, Option<File>)| match file {
        Some(file) => add_log(
            set_logs,
            LogLevel::Info,
            &format!("🖼️ {} attached to {}", file.name(), key),
        ),
        None => add_log(set_logs, LogLevel::Info, &format!("🖼️ {} cleared", key)),
    });

    let on_submit = Callback::new(move |attributes: Map<String, Value>| {
        let PendingSave { ticket, payload } = match workflow.try_update(|w| w.submit(attributes)) {
            Some(Ok(pending)) => pending,
            Some(Err(e)) => {
                add_log(set_logs, LogLevel::Warning, &format!("⚠️ {}", e));
                return;
            }
            None => return,
        };

        add_log(set_logs, LogLevel::Info, &format!("💾 Saving {}...", payload.scanned_id));

        spawn_local(async move {
            match create_product(&payload, API_URL).await {
                Ok(()) => {
                    let applied = workflow.try_update(|w| w.save_succeeded(ticket));
                    if applied == Some(Applied::Stale) {
                        log::debug!("Save of {} answered after reset", payload.scanned_id);
                    }
                    add_log(
                        set_logs,
                        LogLevel::Success,
                        &format!("✅ {} saved as {}", payload.scanned_id, payload.product_type),
                    );
                }
                Err(e) => {
                    let message = e.to_string();
                    let applied = workflow.try_update(|w| w.save_failed(ticket, message.clone()));
                    if applied == Some(Applied::Stale) {
                        log::debug!("Save of {} answered after reset", payload.scanned_id);
                    }
                    add_log(
                        set_logs,
                        LogLevel::Error,
                        &format!("❌ Save of {} failed: {}", payload.scanned_id, message),
                    );
                }
            }
        });
    });

    let reset = move |_| {
        if !workflow.with_untracked(Workflow::can_reset) {
            return;
        }
        workflow.update(Workflow::reset);
        log::info!("🔄 Workflow reset");
    };

    view! {
        <div class="product-creation">
            <ol class="stepper">
                {STEPS
                    .into_iter()
                    .enumerate()
                    .map(|(idx, label)| view! {
                        <li
                            class="step"
                            class:active=move || { step_index(state.get()) == idx }
                            class:done=move || { step_index(state.get()) > idx }
                        >
                            {label}
                        </li>
                    })
                    .collect_view()}
            </ol>

            <Show
                when=move || state.get() == WorkflowState::Scanning
                fallback=move || view! {
                    <div class="scanned-summary">
                        <span class="badge">"🏷️ " {move || scanned_id.get().unwrap_or_default()}</span>
                        <Show when=move || can_reset.get() fallback=|| view! { }>
                            <button class="link-button" on:click=reset>"Scan another"</button>
                        </Show>
                    </div>
                }
            >
                <ScannerPanel on_scan=on_scan/>
            </Show>

            <Show
                when=move || !matches!(state.get(), WorkflowState::Scanning | WorkflowState::Saved)
                fallback=|| view! { }
            >
                <TypeSelector selected=product_type enabled=can_select_type on_select=on_type/>
            </Show>

            <Show
                when=move || state.get() == WorkflowState::SchemaLoading
                fallback=|| view! { }
            >
                <div class="loading">"⏳ Loading form..."</div>
            </Show>

            <Show when=move || form_visible.get() fallback=|| view! { }>
                <section class="details">
                    <h2>"3. Details"</h2>
                    <DynamicForm
                        schema=schema
                        on_submit=on_submit
                        on_media=on_media
                        disabled=Signal::derive(move || state.get() == WorkflowState::Saving)
                        submit_label="Save product"
                    />
                </section>
            </Show>

            <Show when=move || last_error.get().is_some() fallback=|| view! { }>
                <div class="error-message">{move || last_error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || state.get() == WorkflowState::Saved fallback=|| view! { }>
                <div class="saved-card">
                    <div class="saved-title">"✅ Product saved"</div>
                    <div class="saved-detail">
                        {move || scanned_id.get().unwrap_or_default()} " · "
                        {move || product_type.get().map(|t| t.label()).unwrap_or_default()}
                    </div>
                    <button class="upload-button" on:click=reset>"Scan next item"</button>
                </div>
            </Show>
        </div>
    }
}
