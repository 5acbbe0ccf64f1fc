use log::info;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::Route;

/// Drops the stored session and goes back to the login view. The token is
/// not revoked server-side.
#[function_component(Logout)]
pub fn logout() -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let onclick = Callback::from(move |_| {
        info!("logout");
        session.sign_out();
        if let Some(nav) = &navigator {
            nav.replace(&Route::Login);
        }
    });

    html! { <button class="menu-item menu-logout" {onclick}>{ "Logout" }</button> }
}
