//! QR scanner panel.
//!
//! Starts the camera when mounted and stops it on cleanup. A manual entry
//! box covers devices without a usable camera.

use gloo_timers::future::TimeoutFuture;
use leptos::*;

use crate::services::QrScanner;
use crate::SCANNER_ELEMENT_ID;

#[component]
pub fn ScannerPanel(
    /// Decoded values of one scan, as reported by the widget
    on_scan: Callback<Vec<String>>,
) -> impl IntoView {
    let (camera_error, set_camera_error) = create_signal(None::<String>);
    let (manual_code, set_manual_code) = create_signal(String::new());
    let scanner = store_value(None::<QrScanner>);

    spawn_local(async move {
        // let the panel mount before the widget looks up its element
        TimeoutFuture::new(0).await;
        let started = QrScanner::start(SCANNER_ELEMENT_ID, move |decoded| {
            on_scan.call(decoded);
        })
        .await;

        match started {
            Ok(running) => {
                // The panel may have been removed while the camera started
                if let Some(orphan) = scanner.try_set_value(Some(running)).flatten() {
                    if let Err(e) = orphan.stop().await {
                        log::warn!("{}", e);
                    }
                }
            }
            Err(e) => {
                log::warn!("Camera unavailable: {}", e);
                let _ = set_camera_error.try_set(Some(e.to_string()));
            }
        }
    });

    on_cleanup(move || {
        if let Some(running) = scanner.try_update_value(Option::take).flatten() {
            spawn_local(async move {
                if let Err(e) = running.stop().await {
                    log::warn!("{}", e);
                }
            });
        }
    });

    let submit_manual = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        on_scan.call(vec![manual_code.get_untracked()]);
    };

    view! {
        <section class="scanner-panel">
            <h2>"1. Scan product tag"</h2>
            <div id=SCANNER_ELEMENT_ID class="qr-reader"></div>

            <Show when=move || camera_error.get().is_some() fallback=|| view! { }>
                <div class="error-message">
                    "📷 " {move || camera_error.get().unwrap_or_default()}
                </div>
            </Show>

            <form class="manual-entry" on:submit=submit_manual>
                <input
                    type="text"
                    placeholder="…or type the code"
                    prop:value=move || manual_code.get()
                    on:input=move |ev| set_manual_code.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || manual_code.with(|c| c.trim().is_empty())>
                    "Use code"
                </button>
            </form>
        </section>
    }
}
