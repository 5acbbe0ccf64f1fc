use log::{error, info};
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::forms::{bind, first_missing};
use crate::models::{LoginBody, RegisterBody};
use crate::notice::{Notice, NoticeText};
use crate::session::{use_session, Role, Session};
use crate::Route;

const REGISTERED_TEXT: &str = "Registration successful. Please sign in.";
const UNKNOWN_USER: &str = "Invalid credentials";

/// `/?registered=true`, set after a successful registration so the login
/// screen can greet the new account.
#[derive(Serialize, Deserialize, Default)]
struct JustRegistered {
    #[serde(default)]
    registered: bool,
}

/// The API answers a wrong email and a wrong password the same way; the
/// login screen treats that answer as "no such account" and offers sign-up.
fn suggests_sign_up(err: &ApiError) -> bool {
    matches!(err, ApiError::Status { message: Some(m), .. } if m == UNKNOWN_USER)
}

#[derive(Properties, PartialEq)]
struct PasswordInputProps {
    value: String,
    oninput: Callback<InputEvent>,
    #[prop_or("Password".into())]
    placeholder: AttrValue,
}

/// Password field with a show/hide switch.
#[function_component(PasswordInput)]
fn password_input(props: &PasswordInputProps) -> Html {
    let shown = use_state(|| false);
    let toggle = {
        let shown = shown.clone();
        Callback::from(move |_: MouseEvent| shown.set(!*shown))
    };

    html! {
        <div class="password-field">
            <input
                type={if *shown { "text" } else { "password" }}
                placeholder={props.placeholder.clone()}
                value={props.value.clone()}
                oninput={props.oninput.clone()}
            />
            <button type="button" class="password-toggle" onclick={toggle}>
                { if *shown { "Hide" } else { "Show" } }
            </button>
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                                   login                                    */
/* -------------------------------------------------------------------------- */

#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let location = use_location();
    let email = use_state(String::new);
    let password = use_state(String::new);
    let notice = use_state(|| {
        let greeted = location
            .and_then(|l| l.query::<JustRegistered>().ok())
            .is_some_and(|q| q.registered);
        greeted.then(|| NoticeText::success(REGISTERED_TEXT))
    });
    let busy = use_state(|| false);
    let unknown_user = use_state(|| false);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let notice = notice.clone();
        let busy = busy.clone();
        let unknown_user = unknown_user.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            unknown_user.set(false);

            if let Some(field) = first_missing(&[("Email", email.as_str()), ("Password", password.as_str())]) {
                notice.set(Some(NoticeText::error(format!("{field} is required."))));
                return;
            }
            let body = LoginBody {
                email: email.trim().to_string(),
                password: (*password).clone(),
            };

            let session = session.clone();
            let navigator = navigator.clone();
            let notice = notice.clone();
            let busy = busy.clone();
            let unknown_user = unknown_user.clone();
            busy.set(true);

            spawn_local(async move {
                match ApiClient::new(None).login(&body).await {
                    Ok(reply) => {
                        info!("signed in as {}", reply.user.name);
                        session.sign_in(Session {
                            token: reply.token,
                            role: Role::parse(&reply.user.role),
                            display_name: reply.user.name,
                        });
                        if let Some(nav) = navigator {
                            nav.push(&Route::Dashboard);
                        }
                    }
                    Err(e) if suggests_sign_up(&e) => {
                        info!("login: no account for {}", body.email);
                        notice.set(None);
                        unknown_user.set(true);
                        busy.set(false);
                    }
                    Err(e) => {
                        error!("login: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Login failed"))));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <div class="auth-container">
            <h2>{ "Sign in" }</h2>
            <Notice notice={(*notice).clone()} on_dismiss={dismiss} />
            if *unknown_user {
                <div class="notice notice-info" role="alert">
                    <span class="notice-text">{ "User doesn't exist. " }</span>
                    <Link<Route> to={Route::Register}>{ "Sign up now →" }</Link<Route>>
                </div>
            }

            <form {onsubmit}>
                <input type="email" placeholder="Email" value={(*email).clone()} oninput={bind(&email)} />
                <PasswordInput value={(*password).clone()} oninput={bind(&password)} />
                <button type="submit" class="btn-primary" disabled={*busy}>{ "Login" }</button>
            </form>

            <div class="auth-links">
                <Link<Route> to={Route::ForgotPassword}>{ "Forgot password?" }</Link<Route>>
                <span>
                    { "No account? " }
                    <Link<Route> to={Route::Register}>{ "Register" }</Link<Route>>
                </span>
            </div>
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                                registration                                */
/* -------------------------------------------------------------------------- */

#[function_component(RegisterForm)]
pub fn register_form() -> Html {
    let navigator = use_navigator();
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let notice = use_state(|| None::<NoticeText>);
    let busy = use_state(|| false);

    let onsubmit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let notice = notice.clone();
        let busy = busy.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();

            let fields = [("Name", name.as_str()), ("Email", email.as_str()), ("Password", password.as_str())];
            if let Some(field) = first_missing(&fields) {
                notice.set(Some(NoticeText::error(format!("{field} is required."))));
                return;
            }
            let body = RegisterBody {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                password: (*password).clone(),
            };

            let navigator = navigator.clone();
            let notice = notice.clone();
            let busy = busy.clone();
            busy.set(true);

            spawn_local(async move {
                match ApiClient::new(None).register(&body).await {
                    Ok(()) => {
                        info!("registered {}", body.email);
                        notice.set(Some(NoticeText::success(REGISTERED_TEXT)));
                        if let Some(nav) = navigator {
                            let query = JustRegistered { registered: true };
                            if let Err(e) = nav.push_with_query(&Route::Login, &query) {
                                error!("redirect after register: {e}");
                                nav.push(&Route::Login);
                            }
                        }
                    }
                    Err(e) => {
                        error!("register: {e}");
                        notice.set(Some(NoticeText::error(e.user_message("Registration failed"))));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let dismiss = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <div class="auth-container">
            <h2>{ "Create an account" }</h2>
            <Notice notice={(*notice).clone()} on_dismiss={dismiss} />

            <form {onsubmit}>
                <input type="text" placeholder="Name" value={(*name).clone()} oninput={bind(&name)} />
                <input type="email" placeholder="Email" value={(*email).clone()} oninput={bind(&email)} />
                <PasswordInput value={(*password).clone()} oninput={bind(&password)} />
                <button type="submit" class="btn-primary" disabled={*busy}>{ "Register" }</button>
            </form>

            <div class="auth-links">
                <span>
                    { "Already registered? " }
                    <Link<Route> to={Route::Login}>{ "Sign in" }</Link<Route>>
                </span>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_offer_sign_up() {
        let err = ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#);
        assert!(suggests_sign_up(&err));
    }

    #[test]
    fn other_failures_stay_plain_errors() {
        assert!(!suggests_sign_up(&ApiError::from_response(401, r#"{"message":"Account locked"}"#)));
        assert!(!suggests_sign_up(&ApiError::from_response(500, "")));
        assert!(!suggests_sign_up(&ApiError::Aborted));
    }

    #[test]
    fn registered_flag_defaults_off() {
        let q: JustRegistered = serde_json::from_str("{}").unwrap();
        assert!(!q.registered);
    }
}
