use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{components::A, hooks::use_params_map};
use log::warn;

use super::{
    layout::{error_view, loading_view, Page},
    parse_id, use_api, use_locale, FetchScope, Loadable,
};
use crate::{
    i18n::Text,
    models::{QuestionId, QuizQuestion},
    quiz::{check_all, QuizSession, Submission},
    routes::AppRoute,
};

#[component]
pub fn QuizPage() -> impl IntoView {
    let locale = use_locale();
    let params = use_params_map();
    let client = use_api();
    let scope = FetchScope::new();

    let course_id = Memo::new(move |_| parse_id(params.read().get("course_id")));
    let state = RwSignal::new(Loadable::<QuizSession>::Loading);

    let load = {
        let client = client.clone();
        let scope = scope.clone();
        move || {
            let Some(course) = course_id.get_untracked() else {
                state.set(Loadable::Failed(Text::CourseNotFound));
                return;
            };
            let token = scope.restart();
            let client = client.clone();
            state.set(Loadable::Loading);
            spawn_local(async move {
                match token.guard(QuizSession::load(&client, course)).await {
                    Some(Ok(session)) => state.set(Loadable::Loaded(session)),
                    Some(Err(e)) => {
                        warn!("Quiz for course {course} failed to load: {e}");
                        state.set(Loadable::Failed(Text::QuizLoadFailed));
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

    let update = move |f: &dyn Fn(&mut QuizSession)| {
        state.update(|s| {
            if let Loadable::Loaded(session) = s {
                f(session);
            }
        });
    };

    // Checks run against a snapshot of the answers and write their verdicts
    // back into whatever the session looks like by then.
    let check = move |pick: &dyn Fn(&QuizSession) -> Vec<Submission>| {
        let submissions = state.with_untracked(|s| match s {
            Loadable::Loaded(session) => pick(session),
            _ => Vec::new(),
        });
        if submissions.is_empty() {
            return;
        }
        let token = scope.token();
        let client = client.clone();
        spawn_local(async move {
            if let Some(verdicts) = token.guard(check_all(&client, submissions)).await {
                update(&|s| s.record_all(verdicts.iter().copied()));
            }
        });
    };
    let check_one = {
        let check = check.clone();
        move |question: QuestionId| check(&|s| s.submission(question))
    };
    let check_page = move || check(&QuizSession::page_submissions);

    view! {
        <Page>
            {move || {
                course_id
                    .get()
                    .map(|id| view! { <A href=AppRoute::Course(id).path()>{Text::Back.get(locale)}</A> })
            }}
            {move || match state.get() {
                Loadable::Loading => loading_view().into_any(),
                Loadable::Failed(text) => error_view(text, load.clone()).into_any(),
                Loadable::Loaded(session) if session.is_empty() => {
                    view! { <p class="empty">{Text::NoQuestions.get(locale)}</p> }.into_any()
                }
                Loadable::Loaded(session) => {
                    let questions = session
                        .page_items()
                        .iter()
                        .map(|q| question_view(q, &session, update, check_one.clone()))
                        .collect_view();
                    let check_page = check_page.clone();
                    view! {
                        <section class="quiz">
                            {questions}
                            <button on:click=move |_| check_page()>{Text::CheckPage.get(locale)}</button>
                            <nav class="pager">
                                <button
                                    disabled={!session.has_prev()}
                                    on:click=move |_| update(&QuizSession::prev_page)
                                >
                                    {Text::Prev.get(locale)}
                                </button>
                                <span>
                                    {format!("{} {}/{}", Text::Page.get(locale), session.page() + 1, session.page_count())}
                                </span>
                                <button
                                    disabled={!session.has_next()}
                                    on:click=move |_| update(&QuizSession::next_page)
                                >
                                    {Text::Next.get(locale)}
                                </button>
                            </nav>
                        </section>
                    }
                    .into_any()
                }
            }}
        </Page>
    }
}

fn question_view(
    question: &QuizQuestion,
    session: &QuizSession,
    update: impl Fn(&dyn Fn(&mut QuizSession)) + Copy + Send + 'static,
    check_one: impl Fn(QuestionId) + Send + 'static,
) -> impl IntoView {
    let locale = use_locale();
    let id = question.id;
    let answer = session.answer(id).to_vec();

    let words = question
        .words
        .iter()
        .map(|word| {
            let picked = answer.contains(word);
            let value = word.clone();
            view! {
                <button
                    class="word"
                    class:picked=picked
                    on:click=move |_| update(&|s| s.toggle_word(id, &value))
                >
                    {word.clone()}
                </button>
            }
        })
        .collect_view();

    let verdict = session.result(id).map(|correct| {
        let (class, text) = if correct {
            ("verdict correct", Text::Correct)
        } else {
            ("verdict incorrect", Text::Incorrect)
        };
        view! { <p class=class>{text.get(locale)}</p> }
    });

    view! {
        <article class="question">
            <h3>{question.prompt.clone()}</h3>
            <div class="words">{words}</div>
            <p class="answer">{Text::YourSentence.get(locale)} " " {answer.join(" ")}</p>
            <button on:click=move |_| check_one(id)>{Text::Check.get(locale)}</button>
            {verdict}
        </article>
    }
}
