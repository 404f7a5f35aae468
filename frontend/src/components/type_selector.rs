//! Product category picker.

use leptos::*;

use crate::ProductType;

#[component]
pub fn TypeSelector(
    #[prop(into)] selected: Signal<Option<ProductType>>,
    #[prop(into)] enabled: Signal<bool>,
    on_select: Callback<ProductType>,
) -> impl IntoView {
    view! {
        <section class="type-selector">
            <h2>"2. Product type"</h2>
            <div class="type-options">
                {ProductType::ALL
                    .into_iter()
                    .map(|ty| view! {
                        <button
                            type="button"
                            class="type-option"
                            class:selected=move || selected.get() == Some(ty)
                            disabled=move || !enabled.get()
                            on:click=move |_| on_select.call(ty)
                        >
                            <span class="type-emoji">{ty.emoji()}</span>
                            {ty.label()}
                        </button>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
