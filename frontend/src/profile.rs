use log::{error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::fetch::{use_fetch, FetchState};
use crate::forms::{bind, first_missing};
use crate::models::ProfileUpdate;
use crate::notice::{Notice, NoticeText};
use crate::session::use_session;

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_session();
    let editing = use_state(|| false);
    let name = use_state(String::new);
    let email = use_state(String::new);
    let notice = use_state(|| None::<NoticeText>);
    let saving = use_state(|| false);

    let profile = {
        let api = ApiClient::new(session.session());
        use_fetch((), move |_, signal| async move { api.me(signal.as_ref()).await })
    };

    let user = match profile.state() {
        FetchState::Idle | FetchState::Loading => return html!(<p>{ "Loading profile..." }</p>),
        FetchState::Failed(_) => return html!(<p>{ "Could not load your profile." }</p>),
        FetchState::Loaded(user) => user.clone(),
    };

    let start_edit = {
        let editing = editing.clone();
        let name = name.clone();
        let email = email.clone();
        let notice = notice.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            name.set(user.name.clone());
            email.set(user.email.clone());
            notice.set(None);
            editing.set(true);
        })
    };

    let cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(false))
    };

    let onsubmit = {
        let session = session.clone();
        let profile = profile.clone();
        let editing = editing.clone();
        let name = name.clone();
        let email = email.clone();
        let notice = notice.clone();
        let saving = saving.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if let Some(field) = first_missing(&[("Name", name.as_str()), ("Email", email.as_str())]) {
                notice.set(Some(NoticeText::error(format!("{field} is required."))));
                return;
            }
            let body = ProfileUpdate {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
            };

            let api = ApiClient::new(session.session());
            let session = session.clone();
            let profile = profile.clone();
            let editing = editing.clone();
            let notice = notice.clone();
            let saving = saving.clone();
            saving.set(true);

            spawn_local(async move {
                match api.update_me(&body).await {
                    Ok(updated) => {
                        info!("profile updated");
                        session.rename(&updated.name);
                        notice.set(Some(NoticeText::success("Profile updated.")));
                        editing.set(false);
                        profile.reload();
                    }
                    Err(e) => {
                        error!("update profile: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Could not update the profile."))));
                    }
                }
                saving.set(false);
            });
        })
    };

    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    let details = if *editing {
        html! {
            <form class="profile-form" {onsubmit}>
                <label>{ "Name" }</label>
                <input type="text" value={(*name).clone()} oninput={bind(&name)} />
                <label>{ "Email" }</label>
                <input type="email" value={(*email).clone()} oninput={bind(&email)} />
                <div class="modal-actions">
                    <button type="button" onclick={cancel_edit}>{ "Cancel" }</button>
                    <button type="submit" class="btn-primary" disabled={*saving}>{ "Save" }</button>
                </div>
            </form>
        }
    } else {
        html! {
            <dl class="profile-details">
                <dt>{ "Name" }</dt><dd>{ &user.name }</dd>
                <dt>{ "Email" }</dt><dd>{ &user.email }</dd>
                <dt>{ "Role" }</dt><dd>{ &user.role }</dd>
                <dt>{ "Member since" }</dt><dd>{ user.member_since() }</dd>
            </dl>
        }
    };

    html! {
        <div class="page profile">
            <div class="page-header">
                <h1 class="page-title">{ "My Profile" }</h1>
                if !*editing {
                    <button onclick={start_edit}>{ "Edit" }</button>
                }
            </div>
            <Notice notice={(*notice).clone()} on_dismiss={dismiss} />
            <div class="profile-card">{ details }</div>
        </div>
    }
}
