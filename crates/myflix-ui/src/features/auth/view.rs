//! Welcome page with the login and registration dialogs.
//!
//! # Design
//! - Validate forms locally; only well-formed requests reach the API.
//! - A successful login mirrors the new session into the store and opens the catalog.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::components::text_field;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::auth::state::{
    AuthDialog, LoginFormState, RegistrationFormState, login_notice, registration_notice,
};
use gloo::console;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(WelcomePage)]
pub(crate) fn welcome_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let authenticated = use_selector(AppStore::is_authenticated);
    let dialog = use_state(|| None as Option<AuthDialog>);
    let login = use_state(LoginFormState::default);
    let registration = use_state(RegistrationFormState::default);
    let error = use_state(|| None as Option<String>);
    let busy = use_state(|| false);

    if *authenticated {
        return html! { <Redirect<Route> to={Route::Movies} /> };
    }
    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="text-sm text-error">{"Missing API context."}</p>
            </div>
        };
    };

    let open = |target: Option<AuthDialog>| {
        let dialog = dialog.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            error.set(None);
            dialog.set(target);
        })
    };

    let on_login = {
        let api_ctx = api_ctx.clone();
        let login = login.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let credentials = match login.to_credentials() {
                Ok(credentials) => credentials,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.service.login(&credentials).await;
                if let Err(err) = &result {
                    console::error!("login failed", err.user_message());
                }
                let (kind, message) = login_notice(result.is_ok());
                let session = api_ctx.session();
                app_dispatch().reduce_mut(|store| {
                    store.session = session;
                    store.push_toast(kind, message);
                });
                busy.set(false);
                if result.is_ok() {
                    if let Some(navigator) = navigator {
                        navigator.push(&Route::Movies);
                    }
                }
            });
        })
    };

    let on_register = {
        let registration = registration.clone();
        let dialog = dialog.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let request = match registration.to_registration() {
                Ok(request) => request,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            let api_ctx = api_ctx.clone();
            let dialog = dialog.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.service.register(&request).await;
                if let Err(err) = &result {
                    console::error!("registration failed", err.user_message());
                }
                let (kind, message) = registration_notice(result.is_ok());
                app_dispatch().reduce_mut(|store| {
                    store.push_toast(kind, message);
                });
                busy.set(false);
                if result.is_ok() {
                    dialog.set(Some(AuthDialog::Login));
                }
            });
        })
    };

    let error_line = (*error).clone().map(|message| {
        html! { <p class="text-sm text-error" role="alert">{message}</p> }
    });

    html! {
        <section class="welcome">
            <h1>{"Welcome to myFlix"}</h1>
            <p class="muted">{"Browse the catalog, read about genres and directors, and keep a list of favourites."}</p>
            <div class="actions">
                <button class="primary" onclick={open(Some(AuthDialog::Login))}>{"Login"}</button>
                <button class="ghost" onclick={open(Some(AuthDialog::Register))}>{"Sign up"}</button>
            </div>
            {match *dialog {
                Some(AuthDialog::Login) => html! {
                    <div class="modal-backdrop" role="dialog" aria-modal="true">
                        <form class="modal" onsubmit={on_login}>
                            <h2>{"Login"}</h2>
                            {text_field("Username", "text", &login.username, {
                                let login = login.clone();
                                move |value| login.set(LoginFormState { username: value, ..(*login).clone() })
                            })}
                            {text_field("Password", "password", &login.password, {
                                let login = login.clone();
                                move |value| login.set(LoginFormState { password: value, ..(*login).clone() })
                            })}
                            {error_line}
                            <footer>
                                <button type="button" class="ghost" onclick={open(None)}>{"Cancel"}</button>
                                <button type="submit" class="primary" disabled={*busy}>{"Login"}</button>
                            </footer>
                        </form>
                    </div>
                },
                Some(AuthDialog::Register) => html! {
                    <div class="modal-backdrop" role="dialog" aria-modal="true">
                        <form class="modal" onsubmit={on_register}>
                            <h2>{"Sign up"}</h2>
                            {text_field("Username", "text", &registration.username, {
                                let form = registration.clone();
                                move |value| form.set(RegistrationFormState { username: value, ..(*form).clone() })
                            })}
                            {text_field("Password", "password", &registration.password, {
                                let form = registration.clone();
                                move |value| form.set(RegistrationFormState { password: value, ..(*form).clone() })
                            })}
                            {text_field("Email", "email", &registration.email, {
                                let form = registration.clone();
                                move |value| form.set(RegistrationFormState { email: value, ..(*form).clone() })
                            })}
                            {text_field("Birthday", "date", &registration.birthday, {
                                let form = registration.clone();
                                move |value| form.set(RegistrationFormState { birthday: value, ..(*form).clone() })
                            })}
                            {error_line}
                            <footer>
                                <button type="button" class="ghost" onclick={open(None)}>{"Cancel"}</button>
                                <button type="submit" class="primary" disabled={*busy}>{"Sign up"}</button>
                            </footer>
                        </form>
                    </div>
                },
                None => html! {},
            }}
        </section>
    }
}
