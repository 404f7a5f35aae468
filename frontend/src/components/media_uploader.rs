//! Photo picker with simulated upload progress.
//!
//! The selected file is handed to the parent unchanged; the progress bar
//! only simulates the upload until the backend accepts media.

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, HtmlInputElement};

use crate::upload::{MediaSelection, Selection, Tick, UploadRun};
use crate::UPLOAD_TICK_MS;

#[component]
pub fn MediaUploader(
    /// DOM id of the hidden file input
    #[prop(into)]
    input_id: String,
    /// `Some(file)` on selection, `None` when cleared
    on_select: Callback<Option<File>>,
    #[prop(optional, into)] label: Option<String>,
    #[prop(default = "image/*".to_string(), into)] accept: String,
) -> impl IntoView {
    let media = create_rw_signal(MediaSelection::default());
    let selected_name = create_memo(move |_| media.with(|m| m.name().map(str::to_string)));
    let error = create_memo(move |_| media.with(|m| m.error().map(str::to_string)));
    let progress = create_memo(move |_| media.with(MediaSelection::progress));

    let simulate_upload = move |run: UploadRun| {
        spawn_local(async move {
            loop {
                TimeoutFuture::new(UPLOAD_TICK_MS).await;
                match media.try_update(|m| m.tick(run)) {
                    Some(Tick::Running) => continue,
                    _ => break,
                }
            }
        });
    };

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        let name = file.name();
        let size = file.size();
        match media.try_update(|m| m.select(file, &name, size)) {
            Some(Selection::Accepted { file, run }) => {
                log::info!("🖼️ Selected {} ({} bytes)", name, size);
                on_select.call(Some(file));
                simulate_upload(run);
            }
            Some(Selection::Rejected(message)) => {
                log::warn!("{}", message);
                input.set_value("");
            }
            None => {}
        }
    };

    let dom_id = store_value(input_id.clone());
    let file_input = move || {
        dom_id
            .with_value(|id| gloo_utils::document().get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    };

    let trigger_file_input = move |_| {
        if let Some(input) = file_input() {
            input.click();
        }
    };

    let clear_file = move |_| {
        let emitted = media.try_update(MediaSelection::clear::<File>).flatten();
        if let Some(input) = file_input() {
            input.set_value("");
        }
        on_select.call(emitted);
    };

    view! {
        <div class="media-uploader">
            <input
                type="file"
                id=input_id
                accept=accept
                style="display:none"
                on:change=on_file_change
            />
            <div class="media-actions">
                <button type="button" class="upload-button" on:click=trigger_file_input>
                    {label.unwrap_or_else(|| "📷 Choose photo".to_string())}
                </button>
                <Show when=move || selected_name.get().is_some() fallback=|| view! { }>
                    <span class="media-name">{move || selected_name.get().unwrap_or_default()}</span>
                    <button type="button" class="media-clear" on:click=clear_file>"✕"</button>
                </Show>
            </div>

            <Show when=move || progress.get().percent().is_some() fallback=|| view! { }>
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        class:complete=move || progress.get().is_complete()
                        style=move || format!("width: {}%;", progress.get().percent().unwrap_or(0))
                    ></div>
                </div>
            </Show>

            <Show when=move || error.get().is_some() fallback=|| view! { }>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>
        </div>
    }
}
