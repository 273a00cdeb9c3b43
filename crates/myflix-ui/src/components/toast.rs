use std::collections::HashMap;

use crate::core::ui::{TOAST_TIMEOUT_MS, Toast, timer_changes};
use gloo::timers::callback::Timeout;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ToastHostProps {
    pub toasts: Vec<Toast>,
    pub on_dismiss: Callback<u64>,
    #[prop_or_default]
    pub class: Classes,
}

/// Renders the toast stack. Each toast gets one dismiss timer when it first
/// appears; the timers drop with the host.
#[function_component(ToastHost)]
pub(crate) fn toast_host(props: &ToastHostProps) -> Html {
    let timers = use_mut_ref(HashMap::<u64, Timeout>::new);
    {
        let toasts = props.toasts.clone();
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |list: &Vec<Toast>| {
                let mut timers = timers.borrow_mut();
                let scheduled: Vec<u64> = timers.keys().copied().collect();
                let (to_start, to_cancel) = timer_changes(&scheduled, list);
                for id in to_cancel {
                    timers.remove(&id);
                }
                for id in to_start {
                    let on_dismiss = on_dismiss.clone();
                    timers.insert(id, Timeout::new(TOAST_TIMEOUT_MS, move || on_dismiss.emit(id)));
                }
                || ()
            },
            toasts,
        );
    }

    html! {
        <div class={classes!("toast-host", props.class.clone())} aria-live="polite" aria-atomic="true">
            {for props.toasts.iter().map(|toast| render_toast(toast, props.on_dismiss.clone()))}
        </div>
    }
}

fn render_toast(toast: &Toast, on_dismiss: Callback<u64>) -> Html {
    let id = toast.id;
    let on_close = Callback::from(move |_| on_dismiss.emit(id));

    html! {
        <div key={id} class={classes!("toast", toast.kind.class())} role="status">
            <span>{toast.message.clone()}</span>
            <button class="ghost" aria-label="Dismiss" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
