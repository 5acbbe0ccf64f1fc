use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::{use_session, Role, Session};
use crate::Route;

/// What a view requires from the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    AdminOnly,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Allow,
    Redirect(Route),
}

/// Synchronous check against the session: no token sends the visitor to
/// the login view, a non-admin on an admin view goes to the dashboard.
pub fn decide(session: Option<&Session>, access: Access) -> Decision {
    match (session, access) {
        (None, _) => Decision::Redirect(Route::Login),
        (Some(s), Access::AdminOnly) if s.role != Role::Admin => Decision::Redirect(Route::Dashboard),
        _ => Decision::Allow,
    }
}

#[derive(Properties, PartialEq)]
pub struct GuardProps {
    #[prop_or(Access::Authenticated)]
    pub access: Access,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Guard)]
pub fn guard(props: &GuardProps) -> Html {
    let session = use_session();
    match decide(session.session(), props.access) {
        Decision::Allow => html! { <>{ for props.children.iter() }</> },
        Decision::Redirect(to) => html! { <Redirect<Route> {to} /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session { token: "t".into(), role, display_name: "N".into() }
    }

    #[test]
    fn anonymous_visitors_go_to_login() {
        assert_eq!(decide(None, Access::Authenticated), Decision::Redirect(Route::Login));
        assert_eq!(decide(None, Access::AdminOnly), Decision::Redirect(Route::Login));
    }

    #[test]
    fn users_are_kept_out_of_admin_views() {
        let user = session(Role::User);
        assert_eq!(decide(Some(&user), Access::AdminOnly), Decision::Redirect(Route::Dashboard));
        assert_eq!(decide(Some(&user), Access::Authenticated), Decision::Allow);
    }

    #[test]
    fn admins_pass_everywhere() {
        let admin = session(Role::Admin);
        assert_eq!(decide(Some(&admin), Access::AdminOnly), Decision::Allow);
        assert_eq!(decide(Some(&admin), Access::Authenticated), Decision::Allow);
    }

    #[test]
    fn redirect_targets_are_the_expected_paths() {
        assert_eq!(Route::Login.to_path(), "/");
        assert_eq!(Route::Dashboard.to_path(), "/dashboard");
    }
}
