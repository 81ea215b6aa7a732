use chrono::{Datelike, Local};
use leptos::prelude::*;
use leptos_router::components::A;

use super::use_locale;
use crate::{i18n::Text, routes::AppRoute};

#[component]
pub fn Header() -> impl IntoView {
    let locale = use_locale();

    view! {
        <header class="site-header">
            <A href=AppRoute::Home.path()>
                <span class="brand">"DeafAbility"</span>
            </A>
            <nav>
                <A href=AppRoute::Home.path()>{Text::Home.get(locale)}</A>
                <A href=AppRoute::Courses.path()>{Text::CoursesTitle.get(locale)}</A>
                <A href=AppRoute::Jobs.path()>{Text::JobsTitle.get(locale)}</A>
                <A href=AppRoute::Profile.path()>{Text::Profile.get(locale)}</A>
            </nav>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = Local::now().year();

    view! {
        <footer class="site-footer">
            <p>{format!("© {year} DeafAbility")}</p>
        </footer>
    }
}

/// Page chrome shared by every route.
#[component]
pub fn Page(children: Children) -> impl IntoView {
    view! {
        <Header/>
        <main class="page">{children()}</main>
        <Footer/>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    let locale = use_locale();

    view! {
        <Page>
            <div class="notice">
                <h2>{Text::NotFound.get(locale)}</h2>
                <A href=AppRoute::Home.path()>{Text::Home.get(locale)}</A>
            </div>
        </Page>
    }
}

pub fn loading_view() -> impl IntoView {
    let locale = use_locale();
    view! { <p class="loading">{Text::Loading.get(locale)}</p> }
}

/// Replaces a page's content when its fetch failed. `retry` re-runs the same
/// fetch.
pub fn error_view(text: Text, retry: impl Fn() + Send + 'static) -> impl IntoView {
    let locale = use_locale();

    view! {
        <div class="error">
            <p>{text.get(locale)}</p>
            <button on:click=move |_| retry()>{Text::TryAgain.get(locale)}</button>
        </div>
    }
}
