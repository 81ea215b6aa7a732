use std::time::Duration;

use leptos::leptos_dom::helpers::IntervalHandle;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::{
    components::A,
    hooks::{use_navigate, use_params_map},
};
use log::{debug, warn};

use super::{
    layout::{error_view, loading_view, Page},
    parse_id, use_api, use_locale, use_progress_events,
    youtube::{self, YoutubeWidget},
    FetchScope,
};
use crate::{
    embed::{mirror, PlaybackState, VideoWidget, WidgetSlot},
    i18n::Text,
    models::NextStep,
    player::{is_near_end, EndSignal, LessonSession, PlayerPhase, WidgetPlan, POLL_INTERVAL_MS},
    routes::AppRoute,
};

const MAIN_CONTAINER: &str = "yt-player";
const SIGN_CONTAINER: &str = "sign-player";
/// How often to check whether the IFrame API and containers are ready.
const MOUNT_RETRY_MS: u64 = 200;

#[derive(Default)]
struct Timers {
    poll: Option<IntervalHandle>,
    mount: Option<IntervalHandle>,
}

/// The page's widget slots and timers. Lives in local storage because the
/// provider player is a JS object.
#[derive(Clone, Copy)]
struct Widgets {
    main: StoredValue<WidgetSlot<YoutubeWidget>, LocalStorage>,
    sign: StoredValue<WidgetSlot<YoutubeWidget>, LocalStorage>,
    timers: StoredValue<Timers, LocalStorage>,
}

impl Widgets {
    fn new() -> Self {
        Self {
            main: StoredValue::new_local(WidgetSlot::new()),
            sign: StoredValue::new_local(WidgetSlot::new()),
            timers: StoredValue::new_local(Timers::default()),
        }
    }

    fn stop_mount_retry(self) {
        self.timers.try_update_value(|t| {
            if let Some(handle) = t.mount.take() {
                handle.clear();
            }
        });
    }

    fn teardown(self) {
        self.timers.try_update_value(|t| {
            for handle in [t.poll.take(), t.mount.take()].into_iter().flatten() {
                handle.clear();
            }
        });
        self.main.try_update_value(WidgetSlot::clear);
        self.sign.try_update_value(WidgetSlot::clear);
    }

    /// Builds both players for `plan`. Returns `false` while the provider
    /// script or the containers are still missing.
    fn mount(self, plan: &WidgetPlan, complete: impl Fn(EndSignal) + Clone + 'static) -> bool {
        if !youtube::api_ready() || !youtube::container_exists(MAIN_CONTAINER) {
            return false;
        }

        let sign = self.sign;
        let on_ended = complete.clone();
        let main = YoutubeWidget::create(MAIN_CONTAINER, &plan.main, move |state| {
            if state == PlaybackState::Ended {
                on_ended(EndSignal::ProviderEvent);
            }
            sign.try_with_value(|slot| {
                if let Some(widget) = slot.get() {
                    mirror(state, widget);
                }
            });
        });
        let Some(main) = main else {
            return true;
        };
        self.main.update_value(|slot| slot.replace(main));

        if let Some(embed) = &plan.sign {
            match YoutubeWidget::create(SIGN_CONTAINER, embed, |_| {}) {
                Some(widget) => self.sign.update_value(|slot| slot.replace(widget)),
                None => debug!("Sign-language video for lesson {} not mounted", plan.lesson_id),
            }
        }

        let main_slot = self.main;
        let poll = set_interval_with_handle(
            move || {
                let ended = main_slot
                    .try_with_value(|slot| slot.get().map(|w| is_near_end(w.current_time(), w.duration())))
                    .flatten()
                    .unwrap_or(false);
                if ended {
                    complete(EndSignal::Polling);
                }
            },
            Duration::from_millis(POLL_INTERVAL_MS),
        );
        match poll {
            Ok(handle) => self.timers.update_value(|t| t.poll = Some(handle)),
            Err(e) => warn!("Could not start end-of-video polling: {e:?}"),
        }
        true
    }
}

#[component]
pub fn PlayerPage() -> impl IntoView {
    let locale = use_locale();
    let params = use_params_map();
    let client = use_api();
    let events = use_progress_events();
    let navigate = use_navigate();
    let scope = FetchScope::new();
    let widgets = Widgets::new();

    let ids = Memo::new(move |_| {
        let params = params.read();
        parse_id(params.get("course_id")).zip(parse_id(params.get("lesson_id")))
    });
    let session = RwSignal::new(None::<LessonSession>);
    let plan = Memo::new(move |_| session.with(|s| s.as_ref().and_then(LessonSession::widget_plan)));

    let load = {
        let client = client.clone();
        let scope = scope.clone();
        move || {
            let Some((course, lesson)) = ids.get_untracked() else {
                session.set(None);
                return;
            };
            let token = scope.restart();
            let client = client.clone();
            session.set(Some(LessonSession::new(course, lesson)));
            spawn_local(async move {
                if let Some(loaded) = token.guard(LessonSession::load(&client, course, lesson)).await {
                    session.set(Some(loaded));
                }
            });
        }
    };

    Effect::new({
        let load = load.clone();
        move |_| {
            ids.track();
            load();
        }
    });

    let complete = {
        let scope = scope.clone();
        move |signal: EndSignal| {
            // Poll ticks keep arriving after the claim; only the first writes.
            let open = session
                .try_with_untracked(|s| s.as_ref().is_some_and(|s| !s.reported()))
                .unwrap_or(false);
            if !open {
                return;
            }
            let Some(claim) = session
                .try_update(|s| s.as_mut().and_then(|s| s.claim_completion(signal)))
                .flatten()
            else {
                return;
            };
            let token = scope.token();
            let client = client.clone();
            spawn_local(async move {
                if let Err(e) = claim.report(&client).await {
                    warn!("{e}");
                }
                events.update(|ev| claim.settle(ev));
                if !token.is_cancelled() {
                    session.update(|s| {
                        if let Some(s) = s {
                            s.finish_completion();
                        }
                    });
                }
            });
        }
    };

    Effect::new({
        let complete = complete.clone();
        move |_| {
            let plan = plan.get();
            widgets.teardown();
            let Some(plan) = plan else {
                return;
            };
            if widgets.mount(&plan, complete.clone()) {
                return;
            }
            let complete = complete.clone();
            let retry = set_interval_with_handle(
                move || {
                    if widgets.mount(&plan, complete.clone()) {
                        widgets.stop_mount_retry();
                    }
                },
                Duration::from_millis(MOUNT_RETRY_MS),
            );
            match retry {
                Ok(handle) => widgets.timers.update_value(|t| t.mount = Some(handle)),
                Err(e) => warn!("Could not schedule player mount: {e:?}"),
            }
        }
    });

    on_cleanup(move || widgets.teardown());

    let go_next = move |step: NextStep, course| {
        let route = match step {
            NextStep::NextLesson(lesson) => AppRoute::Player { course, lesson },
            NextStep::BackToCourse => AppRoute::Course(course),
        };
        navigate(&route.path(), Default::default());
    };

    view! {
        <Page>
            {move || match ids.get() {
                Some((course, _)) => view! {
                    <A href=AppRoute::Course(course).path()>{Text::Back.get(locale)}</A>
                }
                .into_any(),
                None => ().into_any(),
            }}
            <div
                class="player-frame"
                class:hidden=move || plan.with(Option::is_none)
                id=MAIN_CONTAINER
            ></div>
            <aside
                class="sign-frame"
                class:hidden=move || plan.with(|p| p.as_ref().map_or(true, |p| p.sign.is_none()))
            >
                <h3>{Text::SignLanguage.get(locale)}</h3>
                <div id=SIGN_CONTAINER></div>
            </aside>
            {move || {
                let Some(current) = session.get() else {
                    return view! { <p class="error">{Text::LessonLoadFailed.get(locale)}</p> }.into_any();
                };
                match current.phase.clone() {
                    PlayerPhase::Loading => loading_view().into_any(),
                    PlayerPhase::Error(_) => error_view(Text::LessonLoadFailed, load.clone()).into_any(),
                    PlayerPhase::Empty => view! { <p class="empty">{Text::NoVideo.get(locale)}</p> }.into_any(),
                    PlayerPhase::Ready => {
                        lesson_view(current, session, complete.clone(), go_next.clone()).into_any()
                    }
                }
            }}
        </Page>
    }
}

fn lesson_view(
    current: LessonSession,
    session: RwSignal<Option<LessonSession>>,
    complete: impl Fn(EndSignal) + Send + 'static,
    go_next: impl Fn(NextStep, u64) + Send + 'static,
) -> impl IntoView {
    let locale = use_locale();
    let course = current.course;
    let lesson = current.lesson.clone().unwrap_or_default();
    let active = current.active_index();

    let external = current
        .active_link()
        .filter(|l| !l.is_embeddable())
        .and_then(|l| l.external_href().map(str::to_string))
        .map(|href| {
            let label = href.clone();
            view! {
                <p class="notice">
                    {Text::NotEmbeddable.get(locale)} " "
                    <a href=href target="_blank" rel="noopener noreferrer">{label}</a>
                </p>
            }
        });

    let step = current.next_step();
    let follow_up = if current.show_next() {
        let label = match step {
            NextStep::NextLesson(_) => Text::NextLesson,
            NextStep::BackToCourse => Text::FinishCourse,
        };
        view! { <button on:click=move |_| go_next(step, course)>{label.get(locale)}</button> }.into_any()
    } else if !current.reported() {
        view! {
            <button class="secondary" on:click=move |_| complete(EndSignal::Manual)>
                {Text::MarkComplete.get(locale)}
            </button>
        }
        .into_any()
    } else {
        ().into_any()
    };

    let links = current
        .links()
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let title = if link.title.is_empty() {
                format!("{} {}", Text::LinkList.get(locale), i + 1)
            } else {
                link.title.clone()
            };
            view! {
                <li class:active={i == active}>
                    <button class="link" on:click=move |_| select_link(session, i)>{title}</button>
                </li>
            }
        })
        .collect_view();

    view! {
        <section class="lesson">
            <h1>{lesson.title.clone()}</h1>
            <p>{lesson.description.clone()}</p>
            {external}
            <div class="actions">{follow_up}</div>
            <h2>{Text::LinkList.get(locale)}</h2>
            <ul class="link-list">{links}</ul>
        </section>
    }
}

/// Switching links changes the widget plan, which rebuilds the players.
fn select_link(session: RwSignal<Option<LessonSession>>, index: usize) {
    session.update(|s| {
        if let Some(s) = s {
            s.select_link(index);
        }
    });
}
