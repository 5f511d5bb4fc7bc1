//! Header Component
//!
//! Top navigation bar with the active section highlighted.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use item_console_core::Route;

#[component]
pub fn Header() -> impl IntoView {
    let location = use_location();
    let pathname = location.pathname;

    // "/items/new" is its own tab, so "Items" must not light up for it
    let nav_class = move |route: Route| {
        let path = pathname.get();
        let active = match route {
            Route::ItemList => {
                path == "/" || (path.starts_with(&route.path()) && path != Route::NewItem.path())
            }
            _ => path == route.path(),
        };
        if active {
            "nav-link active"
        } else {
            "nav-link"
        }
    };

    view! {
        <header class="app-header">
            <div class="header-inner">
                <A href="/" attr:class="brand">"Item Console"</A>
                <nav class="main-nav">
                    <A href=Route::ItemList.path() attr:class=move || nav_class(Route::ItemList)>
                        "Items"
                    </A>
                    <A href=Route::NewItem.path() attr:class=move || nav_class(Route::NewItem)>
                        "New Item"
                    </A>
                    <A href=Route::Logs.path() attr:class=move || nav_class(Route::Logs)>
                        "Logs"
                    </A>
                </nav>
            </div>
        </header>
    }
}
