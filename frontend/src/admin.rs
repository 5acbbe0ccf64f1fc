//! `/admin`: the standalone creation forms. The listing pages offer the same
//! actions through modals.

use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchState};
use crate::forms::{bind, bind_select, required};
use crate::models::{slugify, NewCategory, NewTopic, TopicParent};
use crate::notice::{Notice, NoticeText};
use crate::session::use_session;

const UNDER_CATEGORY: &str = "category";
const UNDER_TOPIC: &str = "parent";

/// Builds the create-topic body. A custom slug wins over the generated one.
pub fn topic_request(title: &str, custom_slug: &str, under: &str, parent: &str) -> Result<NewTopic, &'static str> {
    let title = required(title).ok_or("Title is required.")?;
    let parent = required(parent).ok_or("Pick where the topic goes.")?;
    let parent = match under {
        UNDER_TOPIC => TopicParent::Parent(parent),
        _ => TopicParent::Category(parent),
    };

    let mut body = NewTopic::new(&title, parent);
    if let Some(custom) = required(custom_slug) {
        body.slug = slugify(&custom);
    }
    if body.slug.is_empty() {
        return Err("The slug needs at least one letter or digit.");
    }
    Ok(body)
}

#[function_component(AdminPage)]
pub fn admin_page() -> Html {
    let session = use_session();
    let notice = use_state(|| None::<NoticeText>);

    let category_name = use_state(String::new);

    let topic_title = use_state(String::new);
    let topic_slug = use_state(String::new);
    let under = use_state(|| UNDER_CATEGORY.to_string());
    let parent = use_state(String::new);

    let categories = {
        let api = ApiClient::new(session.session());
        use_fetch((), move |_, signal| async move { api.categories(signal.as_ref()).await })
    };

    let create_category = {
        let session = session.clone();
        let notice = notice.clone();
        let category_name = category_name.clone();
        let categories = categories.clone();
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(name) = required(&category_name) else {
                notice.set(Some(NoticeText::error("Category name is required.")));
                return;
            };
            let api = ApiClient::new(session.session());
            let notice = notice.clone();
            let category_name = category_name.clone();
            let categories = categories.clone();
            spawn_local(async move {
                match api.create_category(&NewCategory { name: name.clone() }).await {
                    Ok(()) => {
                        info!("category created: {name}");
                        notice.set(Some(NoticeText::success(format!("Category \"{name}\" created."))));
                        category_name.set(String::new());
                        categories.reload();
                    }
                    Err(e) => {
                        error!("create category: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Could not create the category."))));
                    }
                }
            });
        })
    };

    let create_topic = {
        let session = session.clone();
        let notice = notice.clone();
        let topic_title = topic_title.clone();
        let topic_slug = topic_slug.clone();
        let under = under.clone();
        let parent = parent.clone();
        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            let body = match topic_request(&topic_title, &topic_slug, &under, &parent) {
                Ok(body) => body,
                Err(reason) => {
                    notice.set(Some(NoticeText::error(reason)));
                    return;
                }
            };
            let api = ApiClient::new(session.session());
            let notice = notice.clone();
            let topic_title = topic_title.clone();
            let topic_slug = topic_slug.clone();
            spawn_local(async move {
                match api.create_topic(&body).await {
                    Ok(()) => {
                        info!("topic created: {}", body.slug);
                        notice.set(Some(NoticeText::success(format!("Topic \"{}\" created.", body.title))));
                        topic_title.set(String::new());
                        topic_slug.set(String::new());
                    }
                    Err(e) => {
                        error!("create topic: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Could not create the topic."))));
                    }
                }
            });
        })
    };

    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    let slug_hint = match required(&topic_slug) {
        Some(custom) => slugify(&custom),
        None => slugify(&topic_title),
    };

    let parent_field = if *under == UNDER_CATEGORY {
        let options = match categories.state() {
            FetchState::Loaded(list) => list.clone(),
            _ => Vec::new(),
        };
        html! {
            <select onchange={bind_select(&parent)}>
                <option value="" selected={parent.is_empty()}>{ "Choose a category" }</option>
                { for options.iter().map(|c| html! {
                    <option value={c.slug.clone()} selected={*parent == c.slug}>{ &c.name }</option>
                }) }
            </select>
        }
    } else {
        html! {
            <input
                type="text"
                placeholder="Parent topic slug (e.g. hld)"
                value={(*parent).clone()}
                oninput={bind(&parent)}
            />
        }
    };

    let on_under = {
        let parent = parent.clone();
        let pick = bind_select(&under);
        Callback::from(move |e: Event| {
            parent.set(String::new());
            pick.emit(e);
        })
    };

    html! {
        <div class="page admin">
            <h1 class="page-title">{ "Admin" }</h1>
            <Notice notice={(*notice).clone()} on_dismiss={dismiss} />

            <section class="admin-card">
                <h2>{ "New category" }</h2>
                <form onsubmit={create_category}>
                    <input
                        type="text"
                        placeholder="Category name"
                        value={(*category_name).clone()}
                        oninput={bind(&category_name)}
                    />
                    <button type="submit" class="btn-primary">{ "Create category" }</button>
                </form>
            </section>

            <section class="admin-card">
                <h2>{ "New topic" }</h2>
                <form onsubmit={create_topic}>
                    <input
                        type="text"
                        placeholder="Topic title"
                        value={(*topic_title).clone()}
                        oninput={bind(&topic_title)}
                    />
                    <input
                        type="text"
                        placeholder="Custom slug (optional)"
                        value={(*topic_slug).clone()}
                        oninput={bind(&topic_slug)}
                    />
                    <p class="muted">{ format!("Slug: {}", if slug_hint.is_empty() { "-" } else { slug_hint.as_str() }) }</p>
                    <select onchange={on_under}>
                        <option value={UNDER_CATEGORY} selected={*under == UNDER_CATEGORY}>{ "Under a category" }</option>
                        <option value={UNDER_TOPIC} selected={*under == UNDER_TOPIC}>{ "Under a parent topic" }</option>
                    </select>
                    { parent_field }
                    <button type="submit" class="btn-primary">{ "Create topic" }</button>
                </form>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_slug_under_category() {
        let body = topic_request("Binary Search", "", UNDER_CATEGORY, "dsa").unwrap();
        assert_eq!(body.slug, "binary-search");
        assert_eq!(body.parent, TopicParent::Category("dsa".into()));
    }

    #[test]
    fn custom_slug_is_normalised() {
        let body = topic_request("Consistent Hashing", " Hash Ring ", UNDER_TOPIC, "hld").unwrap();
        assert_eq!(body.slug, "hash-ring");
        assert_eq!(body.parent, TopicParent::Parent("hld".into()));
    }

    #[test]
    fn missing_pieces_are_rejected() {
        assert!(topic_request("  ", "", UNDER_CATEGORY, "dsa").is_err());
        assert!(topic_request("Heaps", "", UNDER_CATEGORY, "").is_err());
        assert!(topic_request("Heaps", "!!!", UNDER_CATEGORY, "dsa").is_err());
    }
}
