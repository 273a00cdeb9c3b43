//! Profile page: account details, edit form, favourites and account deletion.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::components::dialog::DetailDialog;
use crate::components::text_field;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::movies::actions::MovieAction;
use crate::features::movies::state::DetailPayload;
use crate::features::movies::view::{MovieCard, toggle_favourite};
use crate::features::profile::logic::{deletion_notice, update_notice};
use crate::features::profile::state::{ProfileField, ProfileFormState};
use gloo::console;
use myflix_client::ProfileView;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

#[function_component(ProfilePage)]
pub(crate) fn profile_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let profile = use_state(|| None as Option<ProfileView>);
    let form = use_state(ProfileFormState::default);
    let detail = use_state(|| None as Option<DetailPayload>);
    let error = use_state(|| None as Option<String>);
    let busy = use_state(|| false);

    {
        let api_ctx = api_ctx.clone();
        let profile = profile.clone();
        let form = form.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |authenticated: &bool| {
                if let (true, Some(api_ctx)) = (*authenticated, api_ctx) {
                    yew::platform::spawn_local(async move {
                        match api_ctx.service.load_profile().await {
                            Ok(view) => {
                                form.set(ProfileFormState::from_user(&view.user));
                                profile.set(Some(view));
                            }
                            Err(err) => {
                                console::error!("profile load failed", err.user_message());
                                error.set(Some(err.user_message().to_string()));
                            }
                        }
                        let session = api_ctx.session();
                        app_dispatch().reduce_mut(|store| store.session = session);
                    });
                }
                || ()
            },
            session.is_authenticated(),
        );
    }

    if !session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Welcome} /> };
    }
    let Some(api_ctx) = api_ctx else {
        return html! {
            <div class="panel">
                <p class="text-sm text-error">{"Missing API context."}</p>
            </div>
        };
    };

    let field = |label: &'static str, kind: &'static str, which: ProfileField, value: &str| {
        let form = form.clone();
        text_field(label, kind, value, move |input| {
            let mut next = (*form).clone();
            next.set(which, input);
            form.set(next);
        })
    };

    let on_save = {
        let api_ctx = api_ctx.clone();
        let form = form.clone();
        let profile = profile.clone();
        let error = error.clone();
        let busy = busy.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let update = match form.to_update() {
                Ok(update) => update,
                Err(message) => {
                    error.set(Some(message));
                    return;
                }
            };
            error.set(None);
            busy.set(true);
            let api_ctx = api_ctx.clone();
            let form = form.clone();
            let profile = profile.clone();
            let busy = busy.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.service.update_user(&update).await;
                match &result {
                    Ok(user) => {
                        form.set(ProfileFormState::from_user(user));
                        if let Some(current) = (*profile).clone() {
                            profile.set(Some(ProfileView {
                                user: user.clone(),
                                ..current
                            }));
                        }
                    }
                    Err(err) => console::error!("profile update failed", err.user_message()),
                }
                let (kind, message) = update_notice(result.is_ok());
                let session = api_ctx.session();
                app_dispatch().reduce_mut(|store| {
                    store.session = session;
                    store.push_toast(kind, message);
                });
                busy.set(false);
            });
        })
    };

    let on_delete = {
        let api_ctx = api_ctx.clone();
        Callback::from(move |_: MouseEvent| {
            if !gloo::dialogs::confirm("Delete your account? This cannot be undone.") {
                return;
            }
            let api_ctx = api_ctx.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                let result = api_ctx.service.delete_account().await;
                if let Err(err) = &result {
                    console::error!("account deletion failed", err.user_message());
                }
                let (kind, message) = deletion_notice(&result);
                let session = api_ctx.session();
                app_dispatch().reduce_mut(|store| {
                    store.session = session;
                    store.push_toast(kind, message);
                });
                if let Some(navigator) = navigator {
                    navigator.push(&Route::Welcome);
                }
            });
        })
    };

    let on_action = {
        let detail = detail.clone();
        let profile = profile.clone();
        Callback::from(move |action: MovieAction| match action {
            MovieAction::ShowDetail { movie_id, kind } => {
                let payload = profile.as_ref().and_then(|view| {
                    view.favourites
                        .iter()
                        .find(|movie| movie.id == movie_id)
                        .map(|movie| DetailPayload::for_movie(movie, kind))
                });
                detail.set(payload);
            }
            MovieAction::CloseDetail => detail.set(None),
            MovieAction::ToggleFavourite { movie_id } => toggle_favourite(&api_ctx, movie_id),
        })
    };
    let on_close = {
        let on_action = on_action.clone();
        Callback::from(move |()| on_action.emit(MovieAction::CloseDetail))
    };

    let favourites: Vec<_> = profile
        .as_ref()
        .map(|view| {
            view.favourites
                .iter()
                .filter(|movie| session.is_favourite(&movie.id))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    html! {
        <section class="profile">
            if let Some(view) = profile.as_ref() {
                <div class="panel account">
                    <h2>{view.user.username.clone()}</h2>
                    <p>{view.user.email.clone()}</p>
                    if let Some(birthday) = view.user.birthday {
                        <p class="muted">{birthday.format("%Y-%m-%d").to_string()}</p>
                    }
                </div>
            } else if error.is_none() {
                <p class="muted">{"Loading profile…"}</p>
            }
            <form class="panel" onsubmit={on_save}>
                <h3>{"Update profile"}</h3>
                {field("Username", "text", ProfileField::Username, &form.username)}
                {field("Password", "password", ProfileField::Password, &form.password)}
                {field("Email", "email", ProfileField::Email, &form.email)}
                {field("Birthday", "date", ProfileField::Birthday, &form.birthday)}
                if let Some(message) = (*error).clone() {
                    <p class="text-sm text-error" role="alert">{message}</p>
                }
                <footer>
                    <button type="submit" class="primary" disabled={*busy}>{"Save"}</button>
                </footer>
            </form>
            <div class="panel">
                <h3>{"Favourite movies"}</h3>
                if favourites.is_empty() {
                    <p class="muted">{"No favourite movies yet."}</p>
                }
                <div class="movie-grid">
                    {for favourites.iter().map(|movie| html! {
                        <MovieCard
                            key={movie.id.clone()}
                            movie={movie.clone()}
                            is_favourite={true}
                            on_action={on_action.clone()}
                        />
                    })}
                </div>
            </div>
            <div class="panel danger">
                <button class="danger" onclick={on_delete}>{"Delete account"}</button>
            </div>
            if let Some(payload) = (*detail).clone() {
                <DetailDialog {payload} on_close={on_close} />
            }
        </section>
    }
}
