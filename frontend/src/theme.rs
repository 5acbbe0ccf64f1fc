use log::warn;
use yew::prelude::*;

use crate::config::THEME_KEY;
use crate::storage::{BrowserStore, KeyValueStore};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        Self::parse(store.get(THEME_KEY).as_deref())
    }

    pub fn save(self, store: &impl KeyValueStore) {
        store.set(THEME_KEY, self.as_str());
    }
}

/// Puts or removes the `dark` class on `<html>`.
fn apply(theme: Theme) {
    let root = gloo::utils::document_element();
    if let Err(e) = root.class_list().toggle_with_force("dark", theme == Theme::Dark) {
        warn!("theme class: {e:?}");
    }
}

/// Persisted light/dark preference, independent of the session.
#[hook]
pub fn use_theme() -> (Theme, Callback<MouseEvent>) {
    let theme = use_state(|| Theme::load(&BrowserStore));

    use_effect_with(*theme, |t| {
        apply(*t);
        || ()
    });

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            next.save(&BrowserStore);
            theme.set(next);
        })
    };

    (*theme, toggle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn unknown_or_missing_theme_is_light() {
        assert_eq!(Theme::parse(None), Theme::Light);
        assert_eq!(Theme::parse(Some("solarized")), Theme::Light);
    }

    #[test]
    fn toggled_theme_persists() {
        let store = MemoryStore::default();
        let next = Theme::load(&store).toggled();
        next.save(&store);
        assert_eq!(Theme::load(&store), Theme::Dark);
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }
}
