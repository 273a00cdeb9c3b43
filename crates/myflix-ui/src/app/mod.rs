use crate::app::api::ApiCtx;
use crate::components::shell::AppShell;
use crate::components::toast::ToastHost;
use crate::core::store::{AppStore, app_dispatch};
use crate::core::ui::ToastKind;
use crate::features::auth::view::WelcomePage;
use crate::features::movies::view::MoviesPage;
use crate::features::profile::view::ProfilePage;
use gloo::console;
use myflix_client::notice::LOGGED_OUT;
use preferences::api_base_url;
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

pub(crate) mod api;
mod preferences;
mod routes;

#[function_component(MyflixApp)]
pub(crate) fn myflix_app() -> Html {
    let api_ctx = use_memo(|_| ApiCtx::new(api_base_url()), ());

    {
        let api_ctx = api_ctx.clone();
        use_effect_with_deps(
            move |_| {
                if let Ok(ctx) = api_ctx.as_ref() {
                    let session = ctx.session();
                    app_dispatch().reduce_mut(|store| store.session = session);
                }
                || ()
            },
            (),
        );
    }

    match api_ctx.as_ref() {
        Ok(ctx) => html! {
            <ContextProvider<ApiCtx> context={ctx.clone()}>
                <BrowserRouter>
                    <AppRoutes />
                </BrowserRouter>
            </ContextProvider<ApiCtx>>
        },
        Err(err) => html! {
            <div class="panel">
                <p class="text-error">{err.user_message()}</p>
            </div>
        },
    }
}

#[function_component(AppRoutes)]
fn app_routes() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let navigator = use_navigator();
    let active = use_route::<Route>().unwrap_or(Route::Welcome);
    let session = use_selector(|store: &AppStore| store.session.clone());
    let toasts = use_selector(|store: &AppStore| store.toasts.clone());
    let dispatch: Dispatch<AppStore> = app_dispatch();

    let on_logout = {
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            if let Some(ctx) = api_ctx.as_ref() {
                if let Err(err) = ctx.service.logout() {
                    console::error!("logout failed", err.user_message());
                }
                let session = ctx.session();
                dispatch.reduce_mut(|store| {
                    store.session = session;
                    store.push_toast(ToastKind::Info, LOGGED_OUT);
                });
            }
            if let Some(navigator) = navigator.as_ref() {
                navigator.push(&Route::Welcome);
            }
        })
    };
    let on_dismiss = {
        let dispatch = dispatch.clone();
        Callback::from(move |id: u64| dispatch.reduce_mut(|store| store.dismiss_toast(id)))
    };

    html! {
        <>
            <AppShell
                active={active}
                authenticated={session.is_authenticated()}
                username={session.username().map(str::to_string)}
                on_logout={on_logout}
            >
                <Switch<Route> render={switch} />
            </AppShell>
            <ToastHost toasts={(*toasts).clone()} on_dismiss={on_dismiss} />
        </>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Welcome => html! { <WelcomePage /> },
        Route::Movies => html! { <MoviesPage /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::NotFound => html! {
            <div class="panel">
                <h2>{"Page not found"}</h2>
                <Link<Route> to={Route::Welcome}>{"Back to myFlix"}</Link<Route>>
            </div>
        },
    }
}

/// Entrypoint for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<MyflixApp>::with_root(root).render();
    } else {
        yew::Renderer::<MyflixApp>::new().render();
    }
}
