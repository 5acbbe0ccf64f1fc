//! Overlay forms. Each one validates presence only, posts, then calls
//! `on_created` (the caller re-fetches) and closes. On failure it stays
//! open and shows what went wrong.

use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::forms::{bind, bind_select, required};
use crate::models::{Difficulty, NewCategory, NewProblem, NewTopic, TopicParent};
use crate::session::use_session;

/* -------------------------------------------------------------------------- */
/*                                  frame                                     */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="modal-backdrop" onclick={close}>
            <div class="modal" onclick={stop}>
                <h2 class="modal-title">{ props.title.clone() }</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}

fn inline_error(message: &Option<String>) -> Html {
    match message {
        Some(m) => html!(<p class="form-error">{ m }</p>),
        None => Html::default(),
    }
}

/* -------------------------------------------------------------------------- */
/*                                 category                                   */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct AddCategoryModalProps {
    pub on_close: Callback<()>,
    pub on_created: Callback<()>,
}

#[function_component(AddCategoryModal)]
pub fn add_category_modal(props: &AddCategoryModalProps) -> Html {
    let session = use_session();
    let name = use_state(String::new);
    let failure = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let name = name.clone();
        let failure = failure.clone();
        let busy = busy.clone();
        let on_close = props.on_close.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(name) = required(&name) else {
                failure.set(Some("Category name is required.".into()));
                return;
            };

            let api = ApiClient::new(session.session());
            let failure = failure.clone();
            let busy = busy.clone();
            let on_close = on_close.clone();
            let on_created = on_created.clone();
            busy.set(true);

            spawn_local(async move {
                match api.create_category(&NewCategory { name: name.clone() }).await {
                    Ok(()) => {
                        info!("category created: {name}");
                        on_created.emit(());
                        on_close.emit(());
                    }
                    Err(e) => {
                        error!("create category: {e}");
                        failure.set(Some(e.user_message("Could not create the category.")));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal title="Add Category" on_close={props.on_close.clone()}>
            <form {onsubmit}>
                <input
                    type="text"
                    placeholder="Category name (e.g. DSA)"
                    value={(*name).clone()}
                    oninput={bind(&name)}
                />
                { inline_error(&failure) }
                <div class="modal-actions">
                    <button type="button" onclick={cancel}>{ "Cancel" }</button>
                    <button type="submit" class="btn-primary" disabled={*busy}>{ "Add" }</button>
                </div>
            </form>
        </Modal>
    }
}

/* -------------------------------------------------------------------------- */
/*                                  topic                                     */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct AddTopicModalProps {
    pub parent: TopicParent,
    pub on_close: Callback<()>,
    pub on_created: Callback<()>,
}

#[function_component(AddTopicModal)]
pub fn add_topic_modal(props: &AddTopicModalProps) -> Html {
    let session = use_session();
    let title = use_state(String::new);
    let failure = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let title = title.clone();
        let failure = failure.clone();
        let busy = busy.clone();
        let parent = props.parent.clone();
        let on_close = props.on_close.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(title) = required(&title) else {
                failure.set(Some("Topic title is required.".into()));
                return;
            };
            let body = NewTopic::new(&title, parent.clone());
            if body.slug.is_empty() {
                failure.set(Some("The title needs at least one letter or digit.".into()));
                return;
            }

            let api = ApiClient::new(session.session());
            let failure = failure.clone();
            let busy = busy.clone();
            let on_close = on_close.clone();
            let on_created = on_created.clone();
            busy.set(true);

            spawn_local(async move {
                match api.create_topic(&body).await {
                    Ok(()) => {
                        info!("topic created: {}", body.slug);
                        on_created.emit(());
                        on_close.emit(());
                    }
                    Err(e) => {
                        error!("create topic: {e}");
                        failure.set(Some(e.user_message("Could not create the topic.")));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal title="Add Topic" on_close={props.on_close.clone()}>
            <form {onsubmit}>
                <input
                    type="text"
                    placeholder="Topic name (e.g. Arrays)"
                    value={(*title).clone()}
                    oninput={bind(&title)}
                />
                { inline_error(&failure) }
                <div class="modal-actions">
                    <button type="button" onclick={cancel}>{ "Cancel" }</button>
                    <button type="submit" class="btn-primary" disabled={*busy}>{ "Add" }</button>
                </div>
            </form>
        </Modal>
    }
}

/* -------------------------------------------------------------------------- */
/*                                 problem                                    */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct AddProblemModalProps {
    pub topic_id: i64,
    pub on_close: Callback<()>,
    pub on_created: Callback<()>,
}

#[function_component(AddProblemModal)]
pub fn add_problem_modal(props: &AddProblemModalProps) -> Html {
    let session = use_session();
    let title = use_state(String::new);
    let difficulty = use_state(|| Difficulty::Easy.label().to_string());
    let link = use_state(String::new);
    let failure = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let title = title.clone();
        let difficulty = difficulty.clone();
        let link = link.clone();
        let failure = failure.clone();
        let busy = busy.clone();
        let topic_id = props.topic_id;
        let on_close = props.on_close.clone();
        let on_created = props.on_created.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(title) = required(&title) else {
                failure.set(Some("Problem title is required.".into()));
                return;
            };
            let Some(level) = Difficulty::parse(&difficulty) else {
                failure.set(Some("Pick a difficulty.".into()));
                return;
            };
            let body = NewProblem {
                title,
                difficulty: level,
                leetcode_link: required(&link),
                topic_id,
            };

            let api = ApiClient::new(session.session());
            let failure = failure.clone();
            let busy = busy.clone();
            let on_close = on_close.clone();
            let on_created = on_created.clone();
            busy.set(true);

            spawn_local(async move {
                match api.create_problem(&body).await {
                    Ok(()) => {
                        info!("problem added to topic {topic_id}");
                        on_created.emit(());
                        on_close.emit(());
                    }
                    Err(e) => {
                        error!("create problem: {e}");
                        failure.set(Some(e.user_message("Could not add the problem.")));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal title="Add Problem" on_close={props.on_close.clone()}>
            <form {onsubmit}>
                <input
                    type="text"
                    placeholder="Problem title"
                    value={(*title).clone()}
                    oninput={bind(&title)}
                />
                <select onchange={bind_select(&difficulty)}>
                    { for Difficulty::ALL.into_iter().map(|d| html! {
                        <option value={d.label()} selected={*difficulty == d.label()}>{ d.label() }</option>
                    }) }
                </select>
                <input
                    type="url"
                    placeholder="LeetCode link (optional)"
                    value={(*link).clone()}
                    oninput={bind(&link)}
                />
                { inline_error(&failure) }
                <div class="modal-actions">
                    <button type="button" onclick={cancel}>{ "Cancel" }</button>
                    <button type="submit" class="btn-primary" disabled={*busy}>{ "Add" }</button>
                </div>
            </form>
        </Modal>
    }
}

/* -------------------------------------------------------------------------- */
/*                               confirmation                                 */
/* -------------------------------------------------------------------------- */

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or(AttrValue::from("Confirm"))]
    pub confirm_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub error: Option<String>,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Nothing destructive happens without going through this.
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <Modal title={props.title.clone()} on_close={props.on_cancel.clone()}>
            <p>{ props.message.clone() }</p>
            { inline_error(&props.error) }
            <div class="modal-actions">
                <button type="button" onclick={cancel}>{ "Cancel" }</button>
                <button type="button" class="btn-danger" onclick={confirm} disabled={props.busy}>
                    { props.confirm_label.clone() }
                </button>
            </div>
        </Modal>
    }
}
