use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod config;
mod error;
mod fetch;
mod forms;
mod logger;
mod markdown;
mod models;
mod progress;
mod progress_cache;
mod session;
mod storage;
mod theme;

// Shell
mod guard;
mod layout;
mod logout;
mod modals;
mod notice;

// Pages
mod admin;
mod auth;
mod dashboard;
mod password;
mod profile;
mod system_design;
mod theory;
mod topic;
mod topics;

use guard::{Access, Guard};
use topics::{TopicList, TopicSource};

/* -------------------- routing -------------------- */

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Login,
    #[at("/register")]
    Register,
    #[at("/forgot-password")]
    ForgotPassword,
    #[at("/reset-password")]
    ResetPassword,
    #[at("/dashboard")]
    Dashboard,
    #[at("/profile")]
    Profile,
    #[at("/admin")]
    Admin,
    #[at("/category/:category_slug")]
    Category { category_slug: String },
    #[at("/category/:category_slug/:topic_slug")]
    CategoryTopic { category_slug: String, topic_slug: String },
    #[at("/dsa")]
    Dsa,
    #[at("/dsa/:topic_slug")]
    DsaTopic { topic_slug: String },
    #[at("/system-design")]
    SystemDesign,
    #[at("/system-design/:kind")]
    SystemDesignKind { kind: String },
    #[at("/system-design/:kind/:topic_slug")]
    SystemDesignTheory { kind: String, topic_slug: String },
    #[at("/topic/:name")]
    MarkdownTopic { name: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Listing for a category. DSA and system design have their own screens.
    pub fn for_category(slug: &str) -> Route {
        match slug {
            "dsa" => Route::Dsa,
            "system-design" => Route::SystemDesign,
            other => Route::Category { category_slug: other.to_string() },
        }
    }

    pub fn for_topic(category_slug: &str, topic_slug: &str) -> Route {
        match category_slug {
            "dsa" => Route::DsaTopic { topic_slug: topic_slug.to_string() },
            other => Route::CategoryTopic {
                category_slug: other.to_string(),
                topic_slug: topic_slug.to_string(),
            },
        }
    }
}

fn shell(access: Access, page: Html) -> Html {
    html! {
        <Guard {access}>
            <layout::MainLayout>{ page }</layout::MainLayout>
        </Guard>
    }
}

fn switch(route: Route) -> Html {
    let signed_in = |page: Html| shell(Access::Authenticated, page);

    match route {
        Route::Login => html!(<auth::LoginForm />),
        Route::Register => html!(<auth::RegisterForm />),
        Route::ForgotPassword => html!(<password::ForgotPassword />),
        Route::ResetPassword => html!(<password::ResetPassword />),

        Route::Dashboard => signed_in(html!(<dashboard::Dashboard />)),
        Route::Profile => signed_in(html!(<profile::ProfilePage />)),
        Route::Admin => shell(Access::AdminOnly, html!(<admin::AdminPage />)),

        Route::Category { category_slug } => {
            signed_in(html!(<TopicList source={TopicSource::Category(category_slug)} />))
        }
        Route::CategoryTopic { category_slug, topic_slug } => {
            signed_in(html!(<topic::TopicDetailPage {category_slug} {topic_slug} />))
        }
        Route::Dsa => signed_in(html!(<TopicList source={TopicSource::Dsa} />)),
        Route::DsaTopic { topic_slug } => {
            signed_in(html!(<topic::TopicDetailPage category_slug="dsa" {topic_slug} />))
        }

        Route::SystemDesign => signed_in(html!(<system_design::SystemDesign />)),
        Route::SystemDesignKind { kind } => signed_in(html!(<TopicList source={TopicSource::Children(kind)} />)),
        Route::SystemDesignTheory { kind, topic_slug } => {
            signed_in(html!(<system_design::TheoryPage {kind} {topic_slug} />))
        }
        Route::MarkdownTopic { name } => signed_in(html!(<theory::MarkdownTopicPage {name} />)),

        Route::NotFound => html! {
            <div class="not-found">
                <h1>{ "404 – Not Found" }</h1>
                <Link<Route> to={Route::Dashboard}>{ "Back to the dashboard" }</Link<Route>>
            </div>
        },
    }
}

/* -------------------- entry point ---------------- */

#[function_component(App)]
fn app() -> Html {
    html! {
        <session::SessionProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </session::SessionProvider>
    }
}

fn main() {
    logger::init();
    log::info!("api base: {}", config::api_base());
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_with_their_own_screen() {
        assert_eq!(Route::for_category("dsa"), Route::Dsa);
        assert_eq!(Route::for_category("system-design"), Route::SystemDesign);
        assert_eq!(Route::for_category("web").to_path(), "/category/web");
    }

    #[test]
    fn topic_links() {
        assert_eq!(Route::for_topic("dsa", "arrays").to_path(), "/dsa/arrays");
        assert_eq!(Route::for_topic("web", "http").to_path(), "/category/web/http");
    }

    #[test]
    fn nested_paths_resolve_to_their_views() {
        assert_eq!(
            Route::recognize("/system-design/hld/caching"),
            Some(Route::SystemDesignTheory { kind: "hld".into(), topic_slug: "caching".into() })
        );
        assert_eq!(Route::recognize("/topic/graphs"), Some(Route::MarkdownTopic { name: "graphs".into() }));
    }
}
