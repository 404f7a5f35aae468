//! Form generated from a field schema.
//!
//! One control per [`FormField`]. Whenever the schema signal changes the
//! whole control set is rebuilt and previously entered values are dropped.
//! Submitting an invalid form only surfaces the inline errors.

use leptos::*;
use serde_json::{Map, Value};
use web_sys::File;

use crate::form::FormState;
use crate::types::{FieldKind, FormField};
use crate::MediaUploader;

#[component]
pub fn DynamicForm(
    #[prop(into)] schema: Signal<Vec<FormField>>,
    /// Receives key → value once every control is valid
    on_submit: Callback<Map<String, Value>>,
    /// Receives media selections as `(field key, file)`
    #[prop(optional)]
    on_media: Option<Callback<(String, Option<File>)>>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(default = "Save".to_string(), into)] submit_label: String,
) -> impl IntoView {
    let form = create_rw_signal(FormState::new(&schema.get_untracked()));

    create_effect(move |previous: Option<()>| {
        let fields = schema.get();
        // first run already matches the initial state
        if previous.is_some() {
            log::debug!("Schema changed, rebuilding {} controls", fields.len());
            form.update(|f| f.rebuild(&fields));
        }
    });

    let on_form_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if disabled.get_untracked() {
            return;
        }
        match form.try_update(FormState::submit).flatten() {
            Some(values) => on_submit.call(values),
            None => log::debug!("Form invalid, showing validation errors"),
        }
    };

    view! {
        <form class="dynamic-form" on:submit=on_form_submit novalidate=true>
            {move || {
                schema
                    .get()
                    .into_iter()
                    .map(|field| view! { <FieldControl field=field form=form on_media=on_media/> })
                    .collect_view()
            }}
            <button type="submit" class="submit-button" disabled=move || disabled.get()>
                {submit_label}
            </button>
        </form>
    }
}

#[component]
fn FieldControl(
    field: FormField,
    form: RwSignal<FormState>,
    on_media: Option<Callback<(String, Option<File>)>>,
) -> impl IntoView {
    let key = store_value(field.key.clone());
    let dom_id = format!("field-{}", field.key);

    let raw = move || key.with_value(|k| form.with(|f| f.raw(k)));
    let set_raw = move |value: String| key.with_value(|k| form.update(|f| f.set_value(k, value)));
    let touch = move |_| key.with_value(|k| form.update(|f| f.touch(k)));
    let error = move || key.with_value(|k| form.with(|f| f.visible_error(k)));

    let control = match field.kind {
        FieldKind::Text | FieldKind::Number => {
            let (input_type, step) = match field.kind {
                FieldKind::Number => ("number", Some("any")),
                _ => ("text", None),
            };
            view! {
                <input
                    type=input_type
                    step=step
                    id=dom_id.clone()
                    class="field-input"
                    class:invalid=move || error().is_some()
                    prop:value=raw
                    on:input=move |ev| set_raw(event_target_value(&ev))
                    on:blur=touch
                />
            }
            .into_view()
        }
        FieldKind::Select => {
            let options = field
                .options
                .iter()
                .map(|opt| {
                    let value = opt.value.clone();
                    let is_selected = move || raw() == value;
                    view! {
                        <option value=opt.value.clone() prop:selected=is_selected>
                            {opt.label.clone()}
                        </option>
                    }
                })
                .collect_view();
            view! {
                <select
                    id=dom_id.clone()
                    class="field-input"
                    class:invalid=move || error().is_some()
                    on:change=move |ev| set_raw(event_target_value(&ev))
                    on:blur=touch
                >
                    <option value="" disabled=true prop:selected=move || raw().is_empty()>
                        "Select…"
                    </option>
                    {options}
                </select>
            }
            .into_view()
        }
        FieldKind::Media => {
            let on_select = Callback::new(move |file: Option<File>| {
                let name = file.as_ref().map(File::name).unwrap_or_default();
                key.with_value(|k| {
                    form.update(|f| {
                        f.set_value(k, name);
                        f.touch(k);
                    })
                });
                if let Some(cb) = on_media {
                    cb.call((key.get_value(), file));
                }
            });
            view! { <MediaUploader input_id=dom_id.clone() on_select=on_select/> }.into_view()
        }
    };

    view! {
        <div class="form-field">
            <label for=dom_id class="field-label">
                {field.label}
                {field.required.then_some(view! { <span class="required">" *"</span> })}
            </label>
            {control}
            {move || error().map(|e| view! { <div class="field-error">{e.to_string()}</div> })}
        </div>
    }
}
