use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod components {
    pub mod animated_background;
    pub mod countdown;
    pub mod waitlist_form;
}
mod pages {
    pub mod coming_soon;
    pub mod not_found;
}
mod utils {
    pub mod api;
    pub mod countdown;
    pub mod particles;
    pub mod waitlist;
}

use pages::{coming_soon::ComingSoon, not_found::NotFound};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <ComingSoon /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("StudiVerse frontend starting");
    yew::Renderer::<App>::new().render();
}
