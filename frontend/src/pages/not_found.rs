use yew::prelude::*;
use yew_router::components::Link;

use crate::Route;

#[function_component]
pub fn NotFound() -> Html {
    html! {
        <div style="min-height: 100vh; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 1rem;">
            <h1>{"Page not found"}</h1>
            <Link<Route> to={Route::Home}>{"Back to StudiVerse"}</Link<Route>>
        </div>
    }
}
