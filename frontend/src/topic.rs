//! Topic detail: problems, solved progress and the admin edit/delete flows.
//! Every mutation is followed by a full re-fetch; nothing is patched locally.

use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchHandle, FetchState};
use crate::forms::{bind, required};
use crate::markdown::render_markdown;
use crate::modals::{AddProblemModal, ConfirmModal};
use crate::models::{Problem, TopicDetail, TopicUpdate};
use crate::progress::{ProblemStats, SolveAction, Tally};
use crate::session::{use_session, SessionHandle};
use crate::Route;

pub fn progress_bar(pct: u8) -> Html {
    html! {
        <div class="progress-track">
            <div class="progress-fill" style={format!("width: {pct}%")}></div>
        </div>
    }
}

fn tally_row(label: &str, tally: Tally) -> Html {
    html! {
        <div class="tally-row">
            <span class="tally-label">{ label }</span>
            { progress_bar(tally.percent()) }
            <span class="tally-count">{ format!("{}/{}", tally.solved, tally.total) }</span>
        </div>
    }
}

fn section_toggle(open: &UseStateHandle<bool>) -> Callback<MouseEvent> {
    let open = open.clone();
    Callback::from(move |_| open.set(!*open))
}

fn chevron(open: bool) -> &'static str {
    if open {
        "▾"
    } else {
        "▸"
    }
}

#[derive(Properties, PartialEq)]
pub struct TopicDetailProps {
    pub category_slug: String,
    pub topic_slug: String,
}

#[function_component(TopicDetailPage)]
pub fn topic_detail_page(props: &TopicDetailProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();

    let topic = {
        let api = ApiClient::new(session.session());
        use_fetch(props.topic_slug.clone(), move |slug, signal| async move {
            api.topic_detail(&slug, signal.as_ref()).await
        })
    };

    let show_overview = use_state(|| true);
    let show_problems = use_state(|| true);
    let show_add_problem = use_state(|| false);

    let editing = use_state(|| false);
    let draft_title = use_state(String::new);
    let draft_description = use_state(String::new);
    let draft_summary = use_state(String::new);
    let save_error = use_state(|| None::<String>);

    let confirm_delete = use_state(|| false);
    let deleting = use_state(|| false);
    let delete_error = use_state(|| None::<String>);

    let detail = match topic.state() {
        FetchState::Idle | FetchState::Loading => return html!(<p>{ "Loading..." }</p>),
        FetchState::Failed(_) => return html!(<p>{ "Topic not found." }</p>),
        FetchState::Loaded(detail) => detail.clone(),
    };
    let stats = ProblemStats::of(&detail.problems);
    let admin = session.is_admin();

    /* ------------------------------- edit -------------------------------- */

    let start_edit = {
        let editing = editing.clone();
        let draft_title = draft_title.clone();
        let draft_description = draft_description.clone();
        let draft_summary = draft_summary.clone();
        let save_error = save_error.clone();
        let current = TopicUpdate::from_detail(&detail);
        Callback::from(move |_: MouseEvent| {
            draft_title.set(current.title.clone());
            draft_description.set(current.description.clone());
            draft_summary.set(current.summary.clone());
            save_error.set(None);
            editing.set(true);
        })
    };

    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    let save_edit = {
        let session = session.clone();
        let topic = topic.clone();
        let editing = editing.clone();
        let draft_title = draft_title.clone();
        let draft_description = draft_description.clone();
        let draft_summary = draft_summary.clone();
        let save_error = save_error.clone();
        let id = detail.id;
        Callback::from(move |_: MouseEvent| {
            let Some(title) = required(&draft_title) else {
                save_error.set(Some("Title is required.".into()));
                return;
            };
            let body = TopicUpdate {
                title,
                description: (*draft_description).clone(),
                summary: (*draft_summary).clone(),
            };
            let api = ApiClient::new(session.session());
            let topic = topic.clone();
            let editing = editing.clone();
            let save_error = save_error.clone();
            spawn_local(async move {
                match api.update_topic(id, &body).await {
                    Ok(()) => {
                        info!("topic {id} updated");
                        editing.set(false);
                        topic.reload();
                    }
                    Err(e) => {
                        error!("update topic {id}: {e}");
                        save_error.set(Some(e.user_message("Could not save the topic.")));
                    }
                }
            });
        })
    };

    /* ------------------------------ delete ------------------------------- */

    let ask_delete = {
        let confirm_delete = confirm_delete.clone();
        let delete_error = delete_error.clone();
        Callback::from(move |_: MouseEvent| {
            delete_error.set(None);
            confirm_delete.set(true);
        })
    };

    let cancel_delete = {
        let confirm_delete = confirm_delete.clone();
        Callback::from(move |_| confirm_delete.set(false))
    };

    let do_delete = {
        let session = session.clone();
        let deleting = deleting.clone();
        let delete_error = delete_error.clone();
        let back_to = Route::for_category(&props.category_slug);
        let id = detail.id;
        Callback::from(move |_| {
            let api = ApiClient::new(session.session());
            let navigator = navigator.clone();
            let deleting = deleting.clone();
            let delete_error = delete_error.clone();
            let back_to = back_to.clone();
            deleting.set(true);
            spawn_local(async move {
                match api.delete_topic(id).await {
                    Ok(()) => {
                        info!("topic {id} deleted");
                        if let Some(nav) = navigator {
                            nav.push(&back_to);
                        }
                    }
                    Err(e) => {
                        error!("delete topic {id}: {e}");
                        delete_error.set(Some(e.user_message("Could not delete the topic.")));
                        deleting.set(false);
                    }
                }
            });
        })
    };

    /* ------------------------------ render ------------------------------- */

    let open_add_problem = {
        let show_add_problem = show_add_problem.clone();
        Callback::from(move |_: MouseEvent| show_add_problem.set(true))
    };
    let close_add_problem = {
        let show_add_problem = show_add_problem.clone();
        Callback::from(move |_| show_add_problem.set(false))
    };

    let header = if *editing {
        html! {
            <div class="topic-edit">
                <input type="text" value={(*draft_title).clone()} oninput={bind(&draft_title)} />
                <textarea
                    placeholder="Description (markdown)"
                    value={(*draft_description).clone()}
                    oninput={bind(&draft_description)}
                />
                <textarea
                    placeholder="Summary"
                    value={(*draft_summary).clone()}
                    oninput={bind(&draft_summary)}
                />
                if let Some(msg) = &*save_error {
                    <p class="form-error">{ msg }</p>
                }
                <div class="modal-actions">
                    <button onclick={cancel_edit}>{ "Cancel" }</button>
                    <button class="btn-primary" onclick={save_edit}>{ "Save" }</button>
                </div>
            </div>
        }
    } else {
        html! {
            <div class="page-header">
                <h1 class="page-title">{ &detail.title }</h1>
                if admin {
                    <div class="header-actions">
                        <button onclick={start_edit}>{ "Edit" }</button>
                        <button class="btn-danger" onclick={ask_delete}>{ "Delete" }</button>
                    </div>
                }
            </div>
        }
    };

    let overview = html! {
        <section class="topic-section">
            <h2 class="section-title" onclick={section_toggle(&show_overview)}>
                { chevron(*show_overview) }{ " Concept overview" }
            </h2>
            if *show_overview {
                <div class="section-body">
                    { match detail.description.as_deref().filter(|d| !d.trim().is_empty()) {
                        Some(text) => render_markdown(text),
                        None => html!(<p class="muted">{ "No overview yet." }</p>),
                    } }
                    if let Some(summary) = detail.summary.as_deref().filter(|s| !s.trim().is_empty()) {
                        <div class="summary-box">
                            <h3>{ "Summary" }</h3>
                            <p>{ summary }</p>
                        </div>
                    }
                </div>
            }
        </section>
    };

    let problems = html! {
        <section class="topic-section">
            <div class="section-title-row">
                <h2 class="section-title" onclick={section_toggle(&show_problems)}>
                    { chevron(*show_problems) }{ format!(" Problems ({})", detail.problems.len()) }
                </h2>
                if admin {
                    <button class="btn-primary" onclick={open_add_problem}>{ "+ Add Problem" }</button>
                }
            </div>
            if *show_problems {
                if detail.problems.is_empty() {
                    <p class="muted">{ "No problems yet." }</p>
                } else {
                    <ul class="problem-list">
                        { for detail.problems.iter().map(|p| problem_row(p, &session, &topic)) }
                    </ul>
                }
            }
        </section>
    };

    html! {
        <div class="page topic-detail">
            { header }

            <div class="progress-card">
                <div class="progress-headline">
                    <span>{ "Progress" }</span>
                    <span>{ format!("{}% ({}/{})", stats.overall.percent(), stats.overall.solved, stats.overall.total) }</span>
                </div>
                { progress_bar(stats.overall.percent()) }
                { for stats.by_difficulty.iter().map(|(d, t)| tally_row(d.label(), *t)) }
            </div>

            { overview }
            { problems }

            if *show_add_problem {
                <AddProblemModal
                    topic_id={detail.id}
                    on_close={close_add_problem}
                    on_created={topic.reload_callback()}
                />
            }
            if *confirm_delete {
                <ConfirmModal
                    title="Delete topic"
                    message={format!("Delete \"{}\" and all of its problems?", detail.title)}
                    confirm_label="Delete"
                    busy={*deleting}
                    error={(*delete_error).clone()}
                    on_confirm={do_delete}
                    on_cancel={cancel_delete}
                />
            }
        </div>
    }
}

/// One problem with its solved checkbox. The click is cancelled so the box
/// only changes once the re-fetched topic says so.
fn problem_row(problem: &Problem, session: &SessionHandle, topic: &FetchHandle<TopicDetail>) -> Html {
    let onclick = {
        let session = session.clone();
        let topic = topic.clone();
        let action = SolveAction::for_problem(problem);
        let id = problem.id;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let api = ApiClient::new(session.session());
            let topic = topic.clone();
            spawn_local(async move {
                if let Err(e) = api.toggle_solved(action, id).await {
                    error!("toggle problem {id}: {e}");
                }
                topic.reload();
            });
        })
    };

    let title = match &problem.leetcode_link {
        Some(link) => html!(<a href={link.clone()} target="_blank" rel="noopener noreferrer">{ &problem.title }</a>),
        None => html!(<span>{ &problem.title }</span>),
    };

    html! {
        <li key={problem.id} class={classes!("problem-row", problem.is_solved.then_some("solved"))}>
            <input type="checkbox" checked={problem.is_solved} {onclick} />
            { title }
            <span class={problem.difficulty.badge_class()}>{ problem.difficulty.label() }</span>
        </li>
    }
}
