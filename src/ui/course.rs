use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    components::A,
    hooks::{use_navigate, use_params_map},
};
use log::{info, warn};
use send_wrapper::SendWrapper;

use super::{
    alert,
    layout::{error_view, loading_view, Page},
    parse_id, use_api, use_locale, use_progress_events, FetchScope, Loadable,
};
use crate::{
    detail::{refresh_progress, reset_progress, visit_lesson, CourseOverview},
    error::ApiError,
    i18n::Text,
    models::{format_seconds, preview, CourseId, LessonId},
    routes::AppRoute,
};

const PREVIEW_CHARS: usize = 80;

#[component]
pub fn CourseDetailPage() -> impl IntoView {
    let locale = use_locale();
    let params = use_params_map();
    let client = use_api();
    let events = use_progress_events();
    let navigate = use_navigate();
    let scope = FetchScope::new();

    let course_id = Memo::new(move |_| parse_id(params.read().get("id")));
    let state = RwSignal::new(Loadable::<CourseOverview>::Loading);

    let load = {
        let client = client.clone();
        let scope = scope.clone();
        move || {
            let Some(id) = course_id.get_untracked() else {
                state.set(Loadable::Failed(Text::CourseNotFound));
                return;
            };
            // A fresh load already reflects any pending completion.
            events.update(|e| {
                e.take(id);
            });
            let token = scope.restart();
            let client = client.clone();
            state.set(Loadable::Loading);
            spawn_local(async move {
                match token.guard(CourseOverview::load(&client, id)).await {
                    Some(Ok(overview)) => state.set(Loadable::Loaded(overview)),
                    Some(Err(ApiError::NotFound)) => state.set(Loadable::Failed(Text::CourseNotFound)),
                    Some(Err(e)) => {
                        warn!("Course {id} failed to load: {e}");
                        state.set(Loadable::Failed(Text::CourseLoadFailed));
                    }
                    None => {}
                }
            });
        }
    };

    Effect::new({
        let load = load.clone();
        move |_| {
            course_id.track();
            load();
        }
    });

    let refresh = {
        let client = client.clone();
        let scope = scope.clone();
        move || {
            let Some(id) = course_id.get_untracked() else {
                return;
            };
            if !events.try_update(|e| e.take(id)).unwrap_or(false) {
                return;
            }
            info!("Progress for course {id} changed, refreshing");
            let token = scope.token();
            let client = client.clone();
            spawn_local(async move {
                if let Some(progress) = token.guard(refresh_progress(&client, id)).await {
                    state.update(|s| {
                        if let Loadable::Loaded(overview) = s {
                            overview.set_progress(progress);
                        }
                    });
                }
            });
        }
    };

    Effect::new(move |_| {
        let refresh = refresh.clone();
        let handle = SendWrapper::new(window_event_listener(ev::focus, move |_| refresh()));
        on_cleanup(move || handle.take().remove());
    });

    let enroll = {
        let client = client.clone();
        move || {
            let Loadable::Loaded(mut overview) = state.get_untracked() else {
                return;
            };
            let client = client.clone();
            spawn_local(async move {
                match overview.enroll(&client).await {
                    Ok(()) => {
                        state.update(|s| {
                            if let Loadable::Loaded(current) = s {
                                current.enrolled = overview.enrolled;
                            }
                        });
                        alert(Text::EnrollSucceeded.get(locale));
                    }
                    Err(e) => {
                        warn!("Enrolling in course {} failed: {e}", overview.course.id);
                        alert(Text::EnrollFailed.get(locale));
                    }
                }
            });
        }
    };

    let reset = {
        let client = client.clone();
        let scope = scope.clone();
        move || {
            let Some(id) = course_id.get_untracked() else {
                return;
            };
            let token = scope.token();
            let client = client.clone();
            spawn_local(async move {
                match token.guard(reset_progress(&client, id)).await {
                    Some(Ok(progress)) => state.update(|s| {
                        if let Loadable::Loaded(overview) = s {
                            overview.set_progress(progress);
                        }
                    }),
                    Some(Err(e)) => {
                        warn!("Resetting progress for course {id} failed: {e}");
                        alert(Text::ResetFailed.get(locale));
                    }
                    None => {}
                }
            });
        }
    };

    let open_lesson = move |course: CourseId, lesson: LessonId| {
        let client = client.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let route = visit_lesson(&client, course, lesson).await;
            navigate(&route.path(), Default::default());
        });
    };

    view! {
        <Page>
            <A href=AppRoute::Courses.path()>{Text::BackToCourses.get(locale)}</A>
            {move || match state.get() {
                Loadable::Loading => loading_view().into_any(),
                Loadable::Failed(text) => error_view(text, load.clone()).into_any(),
                Loadable::Loaded(overview) => {
                    overview_view(overview, enroll.clone(), reset.clone(), open_lesson.clone()).into_any()
                }
            }}
        </Page>
    }
}

fn overview_view(
    overview: CourseOverview,
    enroll: impl Fn() + Send + 'static,
    reset: impl Fn() + Send + 'static,
    open_lesson: impl Fn(CourseId, LessonId) + Clone + Send + 'static,
) -> impl IntoView {
    let locale = use_locale();
    let course = overview.course.clone();
    let percent = overview.progress.clamped_percent();
    let quiz_link = overview
        .quiz_available()
        .then(|| view! { <A href=AppRoute::Quiz(course.id).path()>{Text::TakeQuiz.get(locale)}</A> });

    let enroll_button = if overview.enrolled {
        view! { <span class="badge">{Text::Enrolled.get(locale)}</span> }.into_any()
    } else {
        view! { <button on:click=move |_| enroll()>{Text::Enroll.get(locale)}</button> }.into_any()
    };

    let lessons = if course.lessons.is_empty() {
        view! { <p class="empty">{Text::NoLessons.get(locale)}</p> }.into_any()
    } else {
        let course_id = course.id;
        course
            .lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| {
                let open = open_lesson.clone();
                let lesson_id = lesson.id;
                let description = if lesson.description.is_empty() {
                    Text::NoDescription.get(locale).to_string()
                } else {
                    preview(&lesson.description, PREVIEW_CHARS)
                };
                view! {
                    <li class="lesson" on:click=move |_| open(course_id, lesson_id)>
                        <span class="lesson-number">{format!("{} {}", Text::LessonNumber.get(locale), i + 1)}</span>
                        <strong>{lesson.title.clone()}</strong>
                        <p>{description}</p>
                        <span class="meta">{format_seconds(lesson.seconds())}</span>
                        {lesson.completed.then(|| view! { <span class="done">{Text::Done.get(locale)}</span> })}
                    </li>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <section class="course-detail">
            <h1>{course.name.clone()}</h1>
            <p class="meta">
                {format!("{}: {} · {}: {}", Text::Level.get(locale), course.level, Text::Category.get(locale), course.category)}
            </p>
            <p class="meta">
                {format!("{}: {}", Text::CourseTotal.get(locale), format_seconds(course.total_seconds()))}
            </p>
            <h2>{Text::AboutCourse.get(locale)}</h2>
            <p>{course.description.clone()}</p>

            <h2>{Text::Progress.get(locale)}</h2>
            <div class="progress-bar">
                <div class="progress-fill" style=format!("width: {percent}%")></div>
            </div>
            <p class="meta">
                {format!(
                    "{}/{} ({percent:.0}%)",
                    overview.progress.completed_lessons,
                    overview.progress.total(),
                )}
            </p>

            <div class="actions">
                {enroll_button}
                <button class="secondary" on:click=move |_| reset()>{Text::ResetProgress.get(locale)}</button>
                {quiz_link}
            </div>

            <h2>{Text::Lessons.get(locale)}</h2>
            <ul class="lesson-list">{lessons}</ul>
        </section>
    }
}
