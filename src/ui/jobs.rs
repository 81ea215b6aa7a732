use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    components::A,
    hooks::{use_navigate, use_params_map, use_query_map},
    NavigateOptions,
};
use log::warn;

use super::{
    layout::{error_view, loading_view, Page},
    parse_id, use_api, use_locale, FetchScope, Loadable,
};
use crate::{
    api::JobQuery,
    catalog::JobBoard,
    error::ApiError,
    i18n::Text,
    models::{preview, Job, JobId},
    routes::AppRoute,
};

const CARD_PREVIEW_CHARS: usize = 80;

#[component]
pub fn JobsPage() -> impl IntoView {
    let locale = use_locale();
    let client = use_api();
    let navigate = use_navigate();
    let query_map = use_query_map();
    let scope = FetchScope::new();

    let query = RwSignal::new(query_map.with_untracked(|params| JobQuery {
        q: params.get("q").unwrap_or_default(),
        position_type: params.get("position_type").unwrap_or_default(),
    }));
    let board = RwSignal::new(JobBoard::default());
    let status = RwSignal::new(Loadable::<()>::Loading);

    let select = {
        let client = client.clone();
        let scope = scope.clone();
        move |id: JobId| {
            let token = scope.token();
            let client = client.clone();
            spawn_local(async move {
                match token.guard(client.job(id)).await {
                    Some(Ok(job)) => board.update(|b| b.active = Some(job)),
                    Some(Err(e)) => warn!("Job {id} failed to load: {e}"),
                    None => {}
                }
            });
        }
    };

    let load = {
        let select = select.clone();
        move || {
            let current = query.get_untracked();
            navigate(
                &format!("{}{}", AppRoute::Jobs.path(), current.to_query_string()),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );

            let token = scope.restart();
            let client = client.clone();
            let select = select.clone();
            status.set(Loadable::Loading);
            spawn_local(async move {
                match token.guard(JobBoard::load(&client, &current)).await {
                    Some(Ok(jobs)) => {
                        let auto = board.try_update(|b| b.set_jobs(jobs)).flatten();
                        status.set(Loadable::Loaded(()));
                        if let Some(id) = auto {
                            select(id);
                        }
                    }
                    Some(Err(e)) => {
                        warn!("Job list failed to load: {e}");
                        status.set(Loadable::Failed(Text::JobsLoadFailed));
                    }
                    None => {}
                }
            });
        }
    };

    Effect::new({
        let load = load.clone();
        move |_| {
            query.track();
            load();
        }
    });

    let positions = Memo::new(move |_| {
        let mut options = board.with(JobBoard::position_types);
        let chosen = query.with(|q| q.position_type.clone());
        if !chosen.is_empty() && !options.contains(&chosen) {
            options.push(chosen);
        }
        options
    });

    view! {
        <Page>
            <h1>{Text::JobsTitle.get(locale)}</h1>
            <div class="filters">
                <input
                    type="search"
                    placeholder=Text::SearchJobs.get(locale)
                    prop:value=move || query.read().q.clone()
                    on:input=move |ev| query.update(|q| q.q = event_target_value(&ev))
                />
                <select
                    prop:value=move || query.read().position_type.clone()
                    on:change=move |ev| query.update(|q| q.position_type = event_target_value(&ev))
                >
                    <option value="">{Text::AllPositions.get(locale)}</option>
                    {move || {
                        positions
                            .get()
                            .into_iter()
                            .map(|p| {
                                let label = p.clone();
                                view! { <option value=p>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </div>
            {move || match status.get() {
                Loadable::Loading => loading_view().into_any(),
                Loadable::Failed(text) => error_view(text, load.clone()).into_any(),
                Loadable::Loaded(()) => {
                    let select = select.clone();
                    board
                        .with(|b| jobs_view(b, select))
                        .into_any()
                }
            }}
        </Page>
    }
}

fn jobs_view(board: &JobBoard, select: impl Fn(JobId) + Clone + Send + 'static) -> impl IntoView {
    let locale = use_locale();
    let active = board.active.as_ref().map(|j| j.id);

    let cards = board
        .jobs
        .iter()
        .map(|job| {
            let select = select.clone();
            let id = job.id;
            view! {
                <li class="card" class:active={active == Some(id)} on:click=move |_| select(id)>
                    <h3>{job.title.clone()}</h3>
                    <p class="meta">{job.position_type.clone()} " · " {job.location.clone()}</p>
                    <p>{preview(&job.description, CARD_PREVIEW_CHARS)}</p>
                </li>
            }
        })
        .collect_view();

    let detail = board.active.clone().map(|job| {
        let more = AppRoute::Job(job.id).path();
        view! {
            <aside class="job-detail">
                {job_details(job)}
                <A href=more>{Text::More.get(locale)}</A>
            </aside>
        }
    });

    view! {
        <div class="jobs-layout">
            <ul class="job-list">{cards}</ul>
            {detail}
        </div>
    }
}

fn job_details(job: Job) -> impl IntoView {
    let locale = use_locale();

    let courses = job
        .courses
        .clone()
        .into_iter()
        .map(|course| {
            let href = AppRoute::Course(course.id).path();
            view! {
                <li>
                    <A href=href>{course.name}</A>
                </li>
            }
        })
        .collect_view();

    view! {
        <h2>{job.title.clone()}</h2>
        <dl>
            <dt>{Text::Position.get(locale)}</dt>
            <dd>{job.position_type.clone()}</dd>
            <dt>{Text::Location.get(locale)}</dt>
            <dd>{job.location.clone()}</dd>
            <dt>{Text::Salary.get(locale)}</dt>
            <dd>{job.salary.clone().unwrap_or_else(|| "-".to_string())}</dd>
        </dl>
        <p>{job.description.clone()}</p>
        <h3>{Text::RelatedCourses.get(locale)}</h3>
        <ul class="related-courses">{courses}</ul>
    }
}

#[component]
pub fn JobDetailPage() -> impl IntoView {
    let locale = use_locale();
    let params = use_params_map();
    let client = use_api();
    let scope = FetchScope::new();

    let job_id = Memo::new(move |_| parse_id(params.read().get("id")));
    let state = RwSignal::new(Loadable::<Job>::Loading);

    let load = move || {
        let Some(id) = job_id.get_untracked() else {
            state.set(Loadable::Failed(Text::JobLoadFailed));
            return;
        };
        let token = scope.restart();
        let client = client.clone();
        state.set(Loadable::Loading);
        spawn_local(async move {
            match token.guard(client.job(id)).await {
                Some(Ok(job)) => state.set(Loadable::Loaded(job)),
                Some(Err(ApiError::NotFound)) => state.set(Loadable::Failed(Text::NotFound)),
                Some(Err(e)) => {
                    warn!("Job {id} failed to load: {e}");
                    state.set(Loadable::Failed(Text::JobLoadFailed));
                }
                None => {}
            }
        });
    };

    Effect::new({
        let load = load.clone();
        move |_| {
            job_id.track();
            load();
        }
    });

    view! {
        <Page>
            <A href=AppRoute::Jobs.path()>{Text::BackToJobs.get(locale)}</A>
            {move || match state.get() {
                Loadable::Loading => loading_view().into_any(),
                Loadable::Failed(text) => error_view(text, load.clone()).into_any(),
                Loadable::Loaded(job) => view! {
                    <article class="job-detail">{job_details(job)}</article>
                }
                .into_any(),
            }}
        </Page>
    }
}
