use std::fmt;

use yew::prelude::*;

use crate::config::{NAME_KEY, ROLE_KEY, TOKEN_KEY};
use crate::storage::{BrowserStore, KeyValueStore};

/* ---------------- role / session ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Anything the server sends that is not `ADMIN` is a plain user.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("ADMIN") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub display_name: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/* ---------------- persistence ---------------- */

/// Opaque credential kept across reloads. No expiry: a dead token only
/// shows up as failing API calls.
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn set(&self, token: &str, role: Role, name: &str) {
        self.store.set(TOKEN_KEY, token);
        self.store.set(ROLE_KEY, &role.to_string());
        self.store.set(NAME_KEY, name);
    }

    pub fn get(&self) -> Option<Session> {
        let token = self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            role: self.store.get(ROLE_KEY).map(|r| Role::parse(&r)).unwrap_or_default(),
            display_name: self.store.get(NAME_KEY).unwrap_or_default(),
        })
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(ROLE_KEY);
        self.store.remove(NAME_KEY);
    }
}

fn browser_sessions() -> SessionStore<BrowserStore> {
    SessionStore::new(BrowserStore)
}

/* ---------------- shared context ---------------- */

/// Session shared through yew context. Writes go to storage first, then
/// to the in-memory state so every consumer re-renders.
#[derive(Clone, PartialEq)]
pub struct SessionHandle {
    state: UseStateHandle<Option<Session>>,
}

impl SessionHandle {
    pub fn session(&self) -> Option<&Session> {
        (*self.state).as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_some_and(Session::is_admin)
    }

    pub fn display_name(&self) -> &str {
        self.session().map(|s| s.display_name.as_str()).unwrap_or_default()
    }

    pub fn sign_in(&self, session: Session) {
        browser_sessions().set(&session.token, session.role, &session.display_name);
        self.state.set(Some(session));
    }

    pub fn rename(&self, name: &str) {
        if let Some(current) = self.session() {
            let renamed = Session { display_name: name.to_string(), ..current.clone() };
            self.sign_in(renamed);
        }
    }

    pub fn sign_out(&self) {
        browser_sessions().clear();
        self.state.set(None);
    }
}

#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>().expect("SessionProvider missing")
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_state(|| browser_sessions().get());
    let handle = SessionHandle { state };

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            { for props.children.iter() }
        </ContextProvider<SessionHandle>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn set_then_get_round_trips() {
        let sessions = SessionStore::new(MemoryStore::default());
        sessions.set("abc", Role::Admin, "Ada");
        assert_eq!(
            sessions.get(),
            Some(Session { token: "abc".into(), role: Role::Admin, display_name: "Ada".into() })
        );
    }

    #[test]
    fn missing_or_empty_token_means_no_session() {
        let sessions = SessionStore::new(MemoryStore::with(&[("role", "ADMIN"), ("name", "Ada")]));
        assert_eq!(sessions.get(), None);

        let sessions = SessionStore::new(MemoryStore::with(&[("token", "")]));
        assert_eq!(sessions.get(), None);
    }

    #[test]
    fn missing_role_defaults_to_user() {
        let sessions = SessionStore::new(MemoryStore::with(&[("token", "t")]));
        let session = sessions.get().unwrap();
        assert_eq!(session.role, Role::User);
        assert_eq!(session.display_name, "");
    }

    #[test]
    fn clear_leaves_theme_and_progress() {
        let store = MemoryStore::with(&[("theme", "dark"), ("progress-graphs", "[true]")]);
        let sessions = SessionStore::new(store);
        sessions.set("t", Role::User, "Bo");
        sessions.clear();
        assert_eq!(sessions.get(), None);
        assert_eq!(sessions.store.len(), 2);
        assert_eq!(sessions.store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn role_parsing_is_lenient() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("admin"), Role::Admin);
        assert_eq!(Role::parse("MODERATOR"), Role::User);
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }
}
