//! `/topic/:name`: a single markdown document cut into `##` sections, each
//! with a local "done" checkbox.

use yew::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchState};
use crate::markdown::{render_markdown, split_sections, Section};
use crate::progress_cache::{completion, ProgressCache};
use crate::session::use_session;
use crate::storage::BrowserStore;
use crate::topic::progress_bar;

fn cache() -> ProgressCache<BrowserStore> {
    ProgressCache::new(BrowserStore)
}

#[derive(Properties, PartialEq)]
pub struct MarkdownTopicProps {
    pub name: String,
}

#[function_component(MarkdownTopicPage)]
pub fn markdown_topic_page(props: &MarkdownTopicProps) -> Html {
    let session = use_session();
    let done = use_state(Vec::<bool>::new);
    let expanded = use_state(|| None::<usize>);

    let topic = {
        let api = ApiClient::new(session.session());
        use_fetch(props.name.clone(), move |name, signal| async move {
            api.markdown_topic(&name, signal.as_ref()).await
        })
    };

    let sections: Vec<Section> = topic
        .state()
        .loaded()
        .map(|t| split_sections(&t.content))
        .unwrap_or_default();

    // Stored flags follow the sections actually on screen.
    {
        let done = done.clone();
        let expanded = expanded.clone();
        use_effect_with((props.name.clone(), sections.clone()), move |(name, sections)| {
            done.set(cache().load(name, sections));
            expanded.set(None);
        });
    }

    let title = match topic.state() {
        FetchState::Idle | FetchState::Loading => return html!(<p>{ "Loading..." }</p>),
        FetchState::Failed(_) => return html!(<p>{ "Topic not found." }</p>),
        FetchState::Loaded(t) => t.title.clone(),
    };

    let pct = completion(&done);

    let row = |(index, section): (usize, &Section)| {
        let checked = done.get(index).copied().unwrap_or(false);
        let open = *expanded == Some(index);

        let on_check = {
            let done = done.clone();
            let name = props.name.clone();
            let sections = sections.clone();
            Callback::from(move |_: Event| done.set(cache().toggle(&name, &sections, index)))
        };
        let on_expand = {
            let expanded = expanded.clone();
            Callback::from(move |_: MouseEvent| {
                expanded.set(if *expanded == Some(index) { None } else { Some(index) })
            })
        };

        html! {
            <div key={index} class={classes!("md-section", checked.then_some("done"))}>
                <div class="md-section-head">
                    <input type="checkbox" {checked} onchange={on_check} />
                    <h2 class="section-title" onclick={on_expand}>{ &section.title }</h2>
                </div>
                if open {
                    <div class="section-body">{ render_markdown(&section.body) }</div>
                }
            </div>
        }
    };

    html! {
        <div class="page markdown-topic">
            <h1 class="page-title">{ title }</h1>
            <div class="progress-card">
                <div class="progress-headline">
                    <span>{ "Sections completed" }</span>
                    <span>{ format!("{pct}%") }</span>
                </div>
                { progress_bar(pct) }
            </div>
            if sections.is_empty() {
                <p class="muted">{ "This topic has no content yet." }</p>
            } else {
                { for sections.iter().enumerate().map(row) }
            }
        </div>
    }
}
