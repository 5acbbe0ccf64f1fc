//! Forgot / reset password screens. Both are public and show the server's
//! reply verbatim.

use log::error;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::forms::{bind, required};
use crate::models::{ForgotPasswordBody, ResetPasswordBody};
use crate::notice::{Notice, NoticeText};
use crate::Route;

#[derive(Deserialize, Default, Debug, PartialEq)]
struct ResetQuery {
    #[serde(default)]
    token: Option<String>,
}

fn reset_token(query: Option<ResetQuery>) -> Option<String> {
    query.and_then(|q| q.token).and_then(|t| required(&t))
}

#[function_component(ForgotPassword)]
pub fn forgot_password() -> Html {
    let email = use_state(String::new);
    let notice = use_state(|| None::<NoticeText>);
    let busy = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let notice = notice.clone();
        let busy = busy.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(address) = required(&email) else {
                notice.set(Some(NoticeText::error("Email is required.")));
                return;
            };

            let notice = notice.clone();
            let busy = busy.clone();
            busy.set(true);

            spawn_local(async move {
                let body = ForgotPasswordBody { email: address };
                match ApiClient::new(None).forgot_password(&body).await {
                    Ok(reply) => notice.set(Some(NoticeText::info(reply.text()))),
                    Err(e) => {
                        error!("forgot password: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Could not send the reset link."))));
                    }
                }
                busy.set(false);
            });
        })
    };

    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <div class="auth-container">
            <h2>{ "Forgot password" }</h2>
            <Notice notice={(*notice).clone()} on_dismiss={dismiss} />
            <form {onsubmit}>
                <input type="email" placeholder="Email" value={(*email).clone()} oninput={bind(&email)} />
                <button type="submit" class="btn-primary" disabled={*busy}>{ "Send reset link" }</button>
            </form>
            <div class="auth-links">
                <Link<Route> to={Route::Login}>{ "Back to sign in" }</Link<Route>>
            </div>
        </div>
    }
}

#[function_component(ResetPassword)]
pub fn reset_password() -> Html {
    let location = use_location();
    let token = reset_token(location.and_then(|l| l.query::<ResetQuery>().ok()));
    let password = use_state(String::new);
    let notice = use_state(|| None::<NoticeText>);
    let busy = use_state(|| false);

    let onsubmit = {
        let token = token.clone();
        let password = password.clone();
        let notice = notice.clone();
        let busy = busy.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(token) = token.clone() else {
                notice.set(Some(NoticeText::error("This reset link is missing its token.")));
                return;
            };
            if required(&password).is_none() {
                notice.set(Some(NoticeText::error("New password is required.")));
                return;
            }

            let body = ResetPasswordBody { token, new_password: (*password).clone() };
            let notice = notice.clone();
            let busy = busy.clone();
            busy.set(true);

            spawn_local(async move {
                match ApiClient::new(None).reset_password(&body).await {
                    Ok(reply) => notice.set(Some(NoticeText::success(reply.text()))),
                    Err(e) => {
                        error!("reset password: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Could not reset the password."))));
                    }
                }
                busy.set(false);
            });
        })
    };

    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <div class="auth-container">
            <h2>{ "Reset password" }</h2>
            <Notice notice={(*notice).clone()} on_dismiss={dismiss} />
            if token.is_none() {
                <p class="muted">{ "Open the link from your reset email to choose a new password." }</p>
            }
            <form {onsubmit}>
                <input
                    type="password"
                    placeholder="New password"
                    value={(*password).clone()}
                    oninput={bind(&password)}
                />
                <button type="submit" class="btn-primary" disabled={*busy || token.is_none()}>
                    { "Reset password" }
                </button>
            </form>
            <div class="auth-links">
                <Link<Route> to={Route::Login}>{ "Back to sign in" }</Link<Route>>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_taken_from_query() {
        let q = ResetQuery { token: Some("abc123".into()) };
        assert_eq!(reset_token(Some(q)), Some("abc123".into()));
    }

    #[test]
    fn blank_or_absent_token_is_none() {
        assert_eq!(reset_token(None), None);
        assert_eq!(reset_token(Some(ResetQuery::default())), None);
        assert_eq!(reset_token(Some(ResetQuery { token: Some("  ".into()) })), None);
    }
}
