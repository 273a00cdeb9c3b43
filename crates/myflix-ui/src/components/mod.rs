//! Shared presentational components.
pub(crate) mod dialog;
pub(crate) mod shell;
pub(crate) mod toast;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Labelled input that reports every edit through `on_change`.
pub(crate) fn text_field(
    label: &'static str,
    kind: &'static str,
    value: &str,
    on_change: impl Fn(String) + 'static,
) -> Html {
    let oninput = Callback::from(move |event: InputEvent| {
        on_change(event.target_unchecked_into::<HtmlInputElement>().value());
    });
    html! {
        <label class="field">
            <span>{label}</span>
            <input type={kind} value={value.to_string()} {oninput} />
        </label>
    }
}
