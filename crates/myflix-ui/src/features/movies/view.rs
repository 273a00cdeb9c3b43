//! Movie catalog views.
//!
//! # Design
//! - Anonymous visitors are sent back to the welcome page.
//! - Favourite flags come from the mirrored session; writes go through the service.

use crate::app::Route;
use crate::app::api::ApiCtx;
use crate::components::dialog::DetailDialog;
use crate::core::store::{AppStore, app_dispatch};
use crate::features::movies::actions::{
    MovieAction, favourite_button_label, favourite_message, toggle_direction,
};
use crate::features::movies::state::{DetailKind, MovieListState};
use gloo::console;
use myflix_client::models::Movie;
use yew::prelude::*;
use yew_router::prelude::Redirect;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct MovieCardProps {
    pub movie: Movie,
    pub is_favourite: bool,
    pub on_action: Callback<MovieAction>,
}

#[function_component(MovieCard)]
pub(crate) fn movie_card(props: &MovieCardProps) -> Html {
    let movie_id = props.movie.id.clone();
    let detail_button = |kind: DetailKind| {
        let on_action = props.on_action.clone();
        let movie_id = movie_id.clone();
        let onclick = Callback::from(move |_| {
            on_action.emit(MovieAction::ShowDetail {
                movie_id: movie_id.clone(),
                kind,
            });
        });
        html! { <button class="ghost" {onclick}>{kind.label()}</button> }
    };
    let on_favourite = {
        let on_action = props.on_action.clone();
        let movie_id = movie_id.clone();
        Callback::from(move |_| {
            on_action.emit(MovieAction::ToggleFavourite {
                movie_id: movie_id.clone(),
            });
        })
    };
    let label = favourite_button_label(props.is_favourite);

    html! {
        <article class={classes!("movie-card", props.movie.featured.then_some("featured"))}>
            if let Some(src) = props.movie.image_path.clone() {
                <img src={src} alt={props.movie.title.clone()} loading="lazy" />
            }
            <h3>{props.movie.title.clone()}</h3>
            <div class="actions">
                {for DetailKind::all().into_iter().map(detail_button)}
                <button
                    class={classes!("favourite", props.is_favourite.then_some("active"))}
                    aria-label={label}
                    title={label}
                    onclick={on_favourite}
                >
                    {if props.is_favourite { "♥" } else { "♡" }}
                </button>
            </div>
        </article>
    }
}

/// Toggle a favourite through the service and report the outcome as a toast.
pub(crate) fn toggle_favourite(api_ctx: &ApiCtx, movie_id: String) {
    let api_ctx = api_ctx.clone();
    yew::platform::spawn_local(async move {
        let attempted = toggle_direction(api_ctx.service.is_favourite(&movie_id));
        let result = api_ctx.service.toggle_favourite(&movie_id).await;
        if let Err(err) = &result {
            console::error!("favourite update failed", movie_id.clone(), err.user_message());
        }
        let (kind, message) = favourite_message(attempted, result.is_ok());
        let session = api_ctx.session();
        app_dispatch().reduce_mut(|store| {
            store.session = session;
            store.push_toast(kind, message);
        });
    });
}

#[function_component(MoviesPage)]
pub(crate) fn movies_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let session = use_selector(|store: &AppStore| store.session.clone());
    let state = use_state(MovieListState::loading);

    {
        let api_ctx = api_ctx.clone();
        let state = state.clone();
        let authenticated = session.is_authenticated();
        use_effect_with_deps(
            move |authenticated: &bool| {
                if let (true, Some(api_ctx)) = (*authenticated, api_ctx) {
                    yew::platform::spawn_local(async move {
                        let mut next = MovieListState::loading();
                        match api_ctx.service.movies().await {
                            Ok(movies) => next.loaded(movies),
                            Err(err) => {
                                console::error!("movie fetch failed", err.user_message());
                                next.failed(err.user_message());
                            }
                        }
                        state.set(next);
                    });
                }
                || ()
            },
            authenticated,
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

    let on_action = {
        let state = state.clone();
        Callback::from(move |action: MovieAction| match action {
            MovieAction::ShowDetail { movie_id, kind } => {
                let mut next = (*state).clone();
                if next.show_detail(&movie_id, kind) {
                    state.set(next);
                }
            }
            MovieAction::CloseDetail => {
                let mut next = (*state).clone();
                next.close_detail();
                state.set(next);
            }
            MovieAction::ToggleFavourite { movie_id } => toggle_favourite(&api_ctx, movie_id),
        })
    };
    let on_close = {
        let on_action = on_action.clone();
        Callback::from(move |()| on_action.emit(MovieAction::CloseDetail))
    };

    html! {
        <section class="movies">
            if state.loading {
                <p class="muted">{"Loading movies…"}</p>
            }
            if let Some(message) = state.error.clone() {
                <p class="text-sm text-error" role="alert">{message}</p>
            }
            if !state.loading && state.error.is_none() && state.movies.is_empty() {
                <p class="muted">{"No movies to show."}</p>
            }
            <div class="movie-grid">
                {for state.movies.iter().map(|movie| html! {
                    <MovieCard
                        key={movie.id.clone()}
                        movie={movie.clone()}
                        is_favourite={session.is_favourite(&movie.id)}
                        on_action={on_action.clone()}
                    />
                })}
            </div>
            if let Some(payload) = state.detail.clone() {
                <DetailDialog {payload} on_close={on_close} />
            }
        </section>
    }
}
