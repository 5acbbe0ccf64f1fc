use yew::prelude::*;
use yew_router::prelude::*;

use crate::logout::Logout;
use crate::session::use_session;
use crate::theme::{use_theme, Theme};
use crate::Route;

/// Menu entry is highlighted for its own path and everything below it.
pub fn is_active(current: &str, prefix: &str) -> bool {
    match current.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn menu_class(current: &str, prefix: &str) -> Classes {
    classes!("menu-item", is_active(current, prefix).then_some("active"))
}

#[derive(Properties, PartialEq)]
pub struct MainLayoutProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(MainLayout)]
pub fn main_layout(props: &MainLayoutProps) -> Html {
    let session = use_session();
    let (theme, toggle_theme) = use_theme();
    let current = use_location().map(|l| l.path().to_string()).unwrap_or_default();

    let entries = [
        (Route::Dashboard, "/dashboard", "Dashboard"),
        (Route::Profile, "/profile", "Profile"),
        (Route::Dsa, "/dsa", "DSA Topics"),
        (Route::SystemDesign, "/system-design", "System Design Topics"),
    ];

    let theme_label = match theme {
        Theme::Light => "🌙 Dark mode",
        Theme::Dark => "☀️ Light mode",
    };

    html! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="brand">
                    <Link<Route> to={Route::Dashboard}>{ "DSA Portal" }</Link<Route>>
                </div>
                <div class="sidebar-user">{ session.display_name() }</div>

                <nav class="menu">
                    { for entries.into_iter().map(|(route, prefix, label)| html! {
                        <Link<Route> to={route} classes={menu_class(&current, prefix)}>{ label }</Link<Route>>
                    }) }
                    if session.is_admin() {
                        <Link<Route> to={Route::Admin} classes={menu_class(&current, "/admin")}>{ "Admin" }</Link<Route>>
                    }
                    <button class="menu-item" onclick={toggle_theme}>{ theme_label }</button>
                    <Logout />
                </nav>
            </aside>

            <main class="main-content">
                { for props.children.iter() }
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::is_active;

    #[test]
    fn prefix_matches_whole_segments() {
        assert!(is_active("/dsa", "/dsa"));
        assert!(is_active("/dsa/arrays", "/dsa"));
        assert!(!is_active("/dsa-extra", "/dsa"));
        assert!(!is_active("/dashboard", "/dsa"));
    }

    #[test]
    fn nested_system_design_routes_stay_highlighted() {
        assert!(is_active("/system-design/hld/caching", "/system-design"));
        assert!(!is_active("/profile", "/system-design"));
    }
}
