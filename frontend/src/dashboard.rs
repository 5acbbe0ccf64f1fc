use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchState};
use crate::modals::AddCategoryModal;
use crate::models::Category;
use crate::session::use_session;
use crate::Route;

fn category_icon(name: &str) -> &'static str {
    if name.to_lowercase().contains("system") {
        "🏗️"
    } else {
        "💻"
    }
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let show_modal = use_state(|| false);

    let categories = {
        let api = ApiClient::new(session.session());
        use_fetch((), move |_, signal| async move { api.categories(signal.as_ref()).await })
    };

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };
    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(false))
    };

    let card = |c: &Category| {
        let onclick = {
            let navigator = navigator.clone();
            let route = Route::for_category(&c.slug);
            Callback::from(move |_: MouseEvent| {
                if let Some(nav) = &navigator {
                    nav.push(&route);
                }
            })
        };
        html! {
            <div key={c.id} class="category-card" {onclick}>
                <div class="category-icon">{ category_icon(&c.name) }</div>
                <h2 class="category-name">{ &c.name }</h2>
                <p class="muted">{ "Explore topics and start mastering concepts." }</p>
                <div class="category-cta">{ "View Topics →" }</div>
            </div>
        }
    };

    let body = match categories.state() {
        FetchState::Idle | FetchState::Loading => html!(<p class="muted">{ "Loading categories..." }</p>),
        FetchState::Failed(_) => html!(<p class="muted">{ "No categories available." }</p>),
        FetchState::Loaded(list) if list.is_empty() => html!(<p class="muted">{ "No categories available." }</p>),
        FetchState::Loaded(list) => html! {
            <div class="category-grid">{ for list.iter().map(card) }</div>
        },
    };

    html! {
        <div class="page dashboard">
            <h1 class="page-title">{ "Learning Dashboard 🚀" }</h1>
            { body }

            if session.is_admin() {
                <button class="fab" onclick={open_modal}>{ "+ Add Category" }</button>
            }
            if *show_modal {
                <AddCategoryModal on_close={close_modal} on_created={categories.reload_callback()} />
            }
        </div>
    }
}
