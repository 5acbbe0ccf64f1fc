//! Topic listings: a category's topics, the DSA topics, or the children of
//! a system-design branch. Same screen, different endpoint.

use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchState};
use crate::modals::AddTopicModal;
use crate::models::{Topic, TopicParent};
use crate::session::use_session;
use crate::Route;

#[derive(Clone, Debug, PartialEq)]
pub enum TopicSource {
    Category(String),
    Dsa,
    Children(String),
}

impl TopicSource {
    pub fn heading(&self) -> String {
        match self {
            TopicSource::Category(_) => "Topics".into(),
            TopicSource::Dsa => "DSA Topics".into(),
            TopicSource::Children(parent) => parent.to_uppercase(),
        }
    }

    /// Where "+ Add Topic" hangs the new topic.
    pub fn parent(&self) -> TopicParent {
        match self {
            TopicSource::Category(slug) => TopicParent::Category(slug.clone()),
            TopicSource::Dsa => TopicParent::Category("dsa".into()),
            TopicSource::Children(parent) => TopicParent::Parent(parent.clone()),
        }
    }

    pub fn route_for(&self, topic: &Topic) -> Route {
        match self {
            TopicSource::Category(slug) => Route::for_topic(slug, &topic.slug),
            TopicSource::Dsa => Route::for_topic("dsa", &topic.slug),
            TopicSource::Children(kind) => Route::SystemDesignTheory {
                kind: kind.clone(),
                topic_slug: topic.slug.clone(),
            },
        }
    }

    async fn load(self, api: ApiClient, signal: Option<web_sys::AbortSignal>) -> Result<Vec<Topic>, crate::error::ApiError> {
        match &self {
            TopicSource::Category(slug) => api.topics_in_category(slug, signal.as_ref()).await,
            TopicSource::Dsa => api.dsa_topics(signal.as_ref()).await,
            TopicSource::Children(parent) => api.child_topics(parent, signal.as_ref()).await,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TopicListProps {
    pub source: TopicSource,
}

#[function_component(TopicList)]
pub fn topic_list(props: &TopicListProps) -> Html {
    let session = use_session();
    let show_modal = use_state(|| false);

    let topics = {
        let api = ApiClient::new(session.session());
        use_fetch(props.source.clone(), move |source, signal| source.load(api, signal))
    };

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };
    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(false))
    };

    let body = match topics.state() {
        FetchState::Idle | FetchState::Loading => html!(<p>{ "Loading..." }</p>),
        FetchState::Failed(_) => html!(<p>{ "No topics yet." }</p>),
        FetchState::Loaded(list) if list.is_empty() => html!(<p>{ "No topics yet." }</p>),
        FetchState::Loaded(list) => html! {
            <div class="topic-grid">
                { for list.iter().map(|t| html! {
                    <Link<Route> to={props.source.route_for(t)} classes="topic-card">
                        { &t.title }
                    </Link<Route>>
                }) }
            </div>
        },
    };

    html! {
        <div class="page">
            <div class="page-header">
                <h1 class="page-title">{ props.source.heading() }</h1>
                if session.is_admin() {
                    <button class="btn-primary" onclick={open_modal}>{ "+ Add Topic" }</button>
                }
            </div>
            { body }
            if *show_modal {
                <AddTopicModal
                    parent={props.source.parent()}
                    on_close={close_modal}
                    on_created={topics.reload_callback()}
                />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(slug: &str) -> Topic {
        Topic {
            id: 1,
            title: slug.to_uppercase(),
            slug: slug.into(),
            description: None,
            summary: None,
            parent_slug: None,
            category_slug: None,
        }
    }

    #[test]
    fn new_topics_hang_under_the_right_parent() {
        assert_eq!(TopicSource::Dsa.parent(), TopicParent::Category("dsa".into()));
        assert_eq!(TopicSource::Category("web".into()).parent(), TopicParent::Category("web".into()));
        assert_eq!(TopicSource::Children("hld".into()).parent(), TopicParent::Parent("hld".into()));
    }

    #[test]
    fn links_follow_the_listing() {
        let t = topic("graphs");
        assert_eq!(TopicSource::Dsa.route_for(&t).to_path(), "/dsa/graphs");
        assert_eq!(TopicSource::Category("web".into()).route_for(&t).to_path(), "/category/web/graphs");
        assert_eq!(
            TopicSource::Children("hld".into()).route_for(&topic("caching")).to_path(),
            "/system-design/hld/caching"
        );
    }

    #[test]
    fn headings() {
        assert_eq!(TopicSource::Children("lld".into()).heading(), "LLD");
        assert_eq!(TopicSource::Dsa.heading(), "DSA Topics");
    }
}
