use crate::features::movies::state::DetailPayload;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DetailDialogProps {
    pub payload: DetailPayload,
    pub on_close: Callback<()>,
}

/// Modal showing a genre, director or synopsis.
#[function_component(DetailDialog)]
pub(crate) fn detail_dialog(props: &DetailDialogProps) -> Html {
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };
    let kind = props.payload.kind();

    html! {
        <div class="modal-backdrop" role="dialog" aria-modal="true">
            <div class={classes!("modal", "detail-dialog", kind.label().to_lowercase())}>
                <header>
                    <small class="muted">{kind.label()}</small>
                    <h2>{props.payload.title()}</h2>
                </header>
                <p>{props.payload.content()}</p>
                <footer>
                    <button class="ghost" onclick={on_close}>{"Close"}</button>
                </footer>
            </div>
        </div>
    }
}
