//! Leptos components. State transitions live in the crate's plain modules;
//! the components here only wire them to signals, fetches and the DOM.

mod course;
mod courses;
mod home;
mod jobs;
mod layout;
mod player;
mod profile;
mod quiz;
mod youtube;

use std::sync::{Arc, Mutex, PoisonError};

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use log::warn;

use self::layout::NotFound;
use crate::{
    api::{ApiClient, CsrfSource, HttpTransport},
    cancel::CancelToken,
    config::{ClientConfig, API_URL_ENV, API_URL_META},
    events::ProgressEvents,
    i18n::{Locale, Text},
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    let api_url = std::env::var(API_URL_ENV).ok().filter(|u| !u.is_empty());

    view! {
        <!DOCTYPE html>
        <html lang="th">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {api_url.map(|url| view! { <meta name=API_URL_META content=url/> })}
                <script src="https://www.youtube.com/iframe_api"></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root component: shared context plus the client routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_browser();
    provide_context(config.clone());
    provide_context(Locale::default());
    provide_context(RwSignal::new(ProgressEvents::default()));

    // Django only sets the csrftoken cookie once something asks for it.
    Effect::new(move |_| {
        let client = use_api_with(config.clone());
        spawn_local(async move {
            if let Err(e) = client.bootstrap_csrf().await {
                warn!("CSRF bootstrap failed: {e}");
            }
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/deafability-web.css"/>
        <Title text="DeafAbility"/>
        <Router>
            <Routes fallback=|| view! { <NotFound/> }>
                <Route path=path!("/") view=home::HomePage/>
                <Route path=path!("/courses") view=courses::CoursesPage/>
                <Route path=path!("/course/:id") view=course::CourseDetailPage/>
                <Route path=path!("/courses/:id") view=course::CourseDetailPage/>
                <Route path=path!("/videoplayer/:course_id/:lesson_id") view=player::PlayerPage/>
                <Route path=path!("/jobs") view=jobs::JobsPage/>
                <Route path=path!("/jobs/:id") view=jobs::JobDetailPage/>
                <Route path=path!("/quiz/:course_id") view=quiz::QuizPage/>
                <Route path=path!("/profile") view=profile::ProfilePage/>
            </Routes>
        </Router>
    }
}

/// Fetch state shared by every page.
#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<T> {
    Loading,
    Failed(Text),
    Loaded(T),
}

pub fn use_locale() -> Locale {
    use_context::<Locale>().unwrap_or_default()
}

pub fn use_progress_events() -> RwSignal<ProgressEvents> {
    use_context::<RwSignal<ProgressEvents>>().unwrap_or_else(|| RwSignal::new(ProgressEvents::default()))
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>().unwrap_or_else(ClientConfig::from_browser)
}

pub fn use_api() -> ApiClient<HttpTransport> {
    use_api_with(use_config())
}

fn use_api_with(config: ClientConfig) -> ApiClient<HttpTransport> {
    ApiClient::http(&config).unwrap_or_else(|e| {
        warn!("Falling back to a default http client: {e}");
        ApiClient::new(HttpTransport::with_client(
            reqwest::Client::new(),
            config,
            CsrfSource::Document,
        ))
    })
}

/// Hands out one [`CancelToken`] per fetch. Starting a new fetch cancels the
/// previous one, and unmounting cancels whatever is in flight.
#[derive(Clone, Default)]
pub struct FetchScope {
    current: Arc<Mutex<CancelToken>>,
}

impl FetchScope {
    pub fn new() -> Self {
        let scope = Self::default();
        let on_unmount = scope.clone();
        on_cleanup(move || on_unmount.token().cancel());
        scope
    }

    pub fn restart(&self) -> CancelToken {
        let next = CancelToken::new();
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = next.clone();
        next
    }

    pub fn token(&self) -> CancelToken {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Blocking notice for write failures.
pub fn alert(message: &str) {
    #[cfg(feature = "hydrate")]
    crate::browser::alert(message);
    #[cfg(not(feature = "hydrate"))]
    log::info!("alert: {message}");
}

/// Reads a numeric route parameter.
pub fn parse_id(raw: Option<String>) -> Option<u64> {
    raw.and_then(|s| s.parse().ok())
}
