//! Landing page

use leptos::*;
use leptos_router::*;

use crate::ProductType;

#[component]
pub fn Dashboard() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Dashboard"</h1>
            <p class="subtitle">
                "Welcome to the Gemstone ERP. Scan a tag to register a new item in the inventory."
            </p>
            <div class="type-options">
                {ProductType::ALL
                    .into_iter()
                    .map(|ty| view! {
                        <div class="type-card">
                            <span class="type-emoji">{ty.emoji()}</span>
                            {ty.label()}
                        </div>
                    })
                    .collect_view()}
            </div>
            <A href="/new-product" class="upload-button">"➕ New product"</A>
        </div>
    }
}
