use crate::app::Route;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub(crate) struct ShellProps {
    pub children: Children,
    pub active: Route,
    pub authenticated: bool,
    pub username: Option<String>,
    pub on_logout: Callback<()>,
}

#[function_component(AppShell)]
pub(crate) fn app_shell(props: &ShellProps) -> Html {
    let on_logout = {
        let on_logout = props.on_logout.clone();
        Callback::from(move |_| on_logout.emit(()))
    };

    html! {
        <div class="app-shell">
            <header class="topbar">
                <strong class="brand">{"myFlix"}</strong>
                if props.authenticated {
                    <nav>
                        {nav_item(Route::Movies, "Movies", &props.active)}
                        {nav_item(Route::Profile, "Profile", &props.active)}
                    </nav>
                    <div class="session">
                        if let Some(username) = props.username.clone() {
                            <span class="muted">{username}</span>
                        }
                        <button class="ghost" onclick={on_logout}>{"Logout"}</button>
                    </div>
                }
            </header>
            <main>{for props.children.iter()}</main>
        </div>
    }
}

fn nav_item(route: Route, label: &str, active: &Route) -> Html {
    let classes = classes!("nav-item", (route == *active).then_some("active"));
    html! {
        <Link<Route> to={route} classes={classes}>{label.to_string()}</Link<Route>>
    }
}
