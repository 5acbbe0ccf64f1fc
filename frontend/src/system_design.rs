use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchState};
use crate::markdown::render_markdown;
use crate::session::use_session;
use crate::Route;

/// The two fixed branches of the system-design tree.
const BRANCHES: [(&str, &str, &str); 2] = [
    ("hld", "High Level Design", "Scalability, caching, load balancing and distributed building blocks."),
    ("lld", "Low Level Design", "Object modelling, design patterns and class-level design problems."),
];

#[function_component(SystemDesign)]
pub fn system_design() -> Html {
    html! {
        <div class="page">
            <h1 class="page-title">{ "System Design" }</h1>
            <div class="category-grid">
                { for BRANCHES.into_iter().map(|(kind, title, blurb)| html! {
                    <Link<Route> to={Route::SystemDesignKind { kind: kind.to_string() }} classes="category-card">
                        <h2 class="category-name">{ title }</h2>
                        <p class="muted">{ blurb }</p>
                        <div class="category-cta">{ "Explore →" }</div>
                    </Link<Route>>
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TheoryPageProps {
    pub kind: String,
    pub topic_slug: String,
}

#[function_component(TheoryPage)]
pub fn theory_page(props: &TheoryPageProps) -> Html {
    let session = use_session();

    let topic = {
        let api = ApiClient::new(session.session());
        use_fetch(props.topic_slug.clone(), move |slug, signal| async move {
            api.markdown_topic(&slug, signal.as_ref()).await
        })
    };

    let back = html! {
        <Link<Route> to={Route::SystemDesignKind { kind: props.kind.clone() }} classes="back-link">
            { format!("← {}", props.kind.to_uppercase()) }
        </Link<Route>>
    };

    let body = match topic.state() {
        FetchState::Idle | FetchState::Loading => html!(<p>{ "Loading..." }</p>),
        FetchState::Failed(_) => html!(<p>{ "Topic not found." }</p>),
        FetchState::Loaded(t) => {
            let theory = t.description.as_deref().filter(|d| !d.trim().is_empty());
            html! {
                <>
                    <h1 class="page-title">{ &t.title }</h1>
                    <article class="theory">
                        { match theory {
                            Some(text) => render_markdown(text),
                            None => html!(<p class="muted">{ "No theory added yet." }</p>),
                        } }
                    </article>
                </>
            }
        }
    };

    html! {
        <div class="page">
            { back }
            { body }
        </div>
    }
}
