//! Top navigation bar.

use leptos::*;
use leptos_router::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <A href="/dashboard" class="logo">"💎 GEM ERP"</A>
            </div>
            <nav class="header-right">
                <A href="/dashboard" class="nav-link" active_class="active">"Dashboard"</A>
                <A href="/new-product" class="nav-link" active_class="active">"New product"</A>
            </nav>
        </header>
    }
}
