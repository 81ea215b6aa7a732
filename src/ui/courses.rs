use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use log::warn;

use super::{
    layout::{error_view, loading_view, Page},
    use_api, use_config, use_locale, FetchScope, Loadable,
};
use crate::{
    catalog::{CourseCatalog, CourseFilter},
    i18n::Text,
    models::{format_seconds, Course},
    routes::AppRoute,
};

#[component]
pub fn CoursesPage() -> impl IntoView {
    let locale = use_locale();
    let client = use_api();
    let scope = FetchScope::new();

    let state = RwSignal::new(Loadable::<CourseCatalog>::Loading);
    let filter = RwSignal::new(CourseFilter::default());

    let load = move || {
        let token = scope.restart();
        let client = client.clone();
        state.set(Loadable::Loading);
        spawn_local(async move {
            match token.guard(CourseCatalog::load(&client)).await {
                Some(Ok(catalog)) => state.set(Loadable::Loaded(catalog)),
                Some(Err(e)) => {
                    warn!("Course catalog failed to load: {e}");
                    state.set(Loadable::Failed(Text::CoursesLoadFailed));
                }
                None => {}
            }
        });
    };

    Effect::new({
        let load = load.clone();
        move |_| load()
    });

    let options = Memo::new(move |_| match &*state.read() {
        Loadable::Loaded(catalog) => (catalog.levels(), catalog.categories()),
        _ => Default::default(),
    });

    view! {
        <Page>
            <h1>{Text::CoursesTitle.get(locale)}</h1>
            <div class="filters">
                <input
                    type="search"
                    placeholder=Text::SearchCourses.get(locale)
                    prop:value=move || filter.read().term.clone()
                    on:input=move |ev| filter.update(|f| f.term = event_target_value(&ev))
                />
                <select on:change=move |ev| filter.update(|f| f.level = event_target_value(&ev))>
                    <option value="">{Text::AllLevels.get(locale)}</option>
                    {move || options.get().0.into_iter().map(select_option).collect_view()}
                </select>
                <select on:change=move |ev| filter.update(|f| f.category = event_target_value(&ev))>
                    <option value="">{Text::AllCategories.get(locale)}</option>
                    {move || options.get().1.into_iter().map(select_option).collect_view()}
                </select>
            </div>
            {move || match state.get() {
                Loadable::Loading => loading_view().into_any(),
                Loadable::Failed(text) => error_view(text, load.clone()).into_any(),
                Loadable::Loaded(catalog) => {
                    let courses = catalog.filtered(&filter.get());
                    if courses.is_empty() {
                        view! { <p class="empty">{Text::NoMatchingCourses.get(locale)}</p> }.into_any()
                    } else {
                        view! {
                            <div class="card-grid">
                                {courses.into_iter().map(course_card).collect_view()}
                            </div>
                        }
                        .into_any()
                    }
                }
            }}
        </Page>
    }
}

fn select_option(value: String) -> impl IntoView {
    let label = value.clone();
    view! { <option value=value>{label}</option> }
}

fn course_card(course: Course) -> impl IntoView {
    let locale = use_locale();
    let cover = course
        .cover_url
        .as_deref()
        .and_then(|url| use_config().media_url(url));
    let duration = format_seconds(course.total_seconds());

    view! {
        <A href=AppRoute::Course(course.id).path()>
            <article class="card">
                {cover.map(|src| view! { <img class="cover" src=src alt=course.name.clone()/> })}
                <h3>{course.name.clone()}</h3>
                <p class="meta">
                    {format!("{}: {} · {}: {}", Text::Level.get(locale), course.level, Text::Category.get(locale), course.category)}
                </p>
                <p class="meta">{duration}</p>
            </article>
        </A>
    }
}
