//! Playback state for a single lesson view.

use log::{info, warn};
use serde_json::json;
use thiserror::Error;

use crate::{
    api::{ApiClient, ApiRequest, Transport},
    embed::Embed,
    error::ApiError,
    events::ProgressEvents,
    models::{CourseId, Lesson, LessonId, LessonLink, LinkKind, NextStep},
};

/// How often the fallback timer samples the playback position.
pub const POLL_INTERVAL_MS: u64 = 1000;
/// Distance from the end, in seconds, that counts as finished.
pub const END_TOLERANCE_SECS: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerPhase {
    Loading,
    Ready,
    Empty,
    Error(String),
}

/// Which detection path noticed the end of the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSignal {
    ProviderEvent,
    Polling,
    Manual,
}

pub fn is_near_end(position: f64, duration: f64) -> bool {
    duration > 0.0 && position.is_finite() && duration - position <= END_TOLERANCE_SECS
}

/// Main role first, then the embeddable provider, then whatever comes first.
pub fn primary_link_index(links: &[LessonLink]) -> Option<usize> {
    links
        .iter()
        .position(|l| l.has_role("main"))
        .or_else(|| links.iter().position(|l| l.kind == LinkKind::Youtube))
        .or(if links.is_empty() { None } else { Some(0) })
}

/// What the page should have mounted in its widget containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPlan {
    pub lesson_id: LessonId,
    pub main: Embed,
    pub sign: Option<Embed>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LessonSession {
    pub course: CourseId,
    pub lesson_id: LessonId,
    pub phase: PlayerPhase,
    pub lesson: Option<Lesson>,
    active: usize,
    reported: bool,
    show_next: bool,
}

impl LessonSession {
    pub fn new(course: CourseId, lesson_id: LessonId) -> Self {
        Self {
            course,
            lesson_id,
            phase: PlayerPhase::Loading,
            lesson: None,
            active: 0,
            reported: false,
            show_next: false,
        }
    }

    pub async fn load<T: Transport>(client: &ApiClient<T>, course: CourseId, lesson: LessonId) -> Self {
        let mut session = Self::new(course, lesson);
        session.loaded(client.lesson(course, lesson).await);
        session
    }

    pub fn loaded(&mut self, result: Result<Lesson, ApiError>) {
        match result {
            Ok(lesson) => {
                self.phase = if lesson.links.is_empty() {
                    PlayerPhase::Empty
                } else {
                    PlayerPhase::Ready
                };
                self.active = primary_link_index(&lesson.links).unwrap_or(0);
                self.lesson = Some(lesson);
            }
            Err(e) => {
                warn!("Lesson {}/{} failed to load: {e}", self.course, self.lesson_id);
                self.phase = PlayerPhase::Error(e.to_string());
                self.lesson = None;
            }
        }
    }

    pub fn links(&self) -> &[LessonLink] {
        self.lesson.as_ref().map(|l| l.links.as_slice()).unwrap_or_default()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_link(&self) -> Option<&LessonLink> {
        self.links().get(self.active)
    }

    /// Returns whether the selection changed, in which case the widget must
    /// be rebuilt.
    pub fn select_link(&mut self, index: usize) -> bool {
        if index >= self.links().len() || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// The sign-language video to play next to the active one.
    pub fn sign_link(&self) -> Option<&LessonLink> {
        self.links()
            .iter()
            .enumerate()
            .find(|(i, l)| *i != self.active && l.has_role("sign") && l.is_embeddable())
            .map(|(_, l)| l)
    }

    /// `None` unless the active link can be embedded.
    pub fn widget_plan(&self) -> Option<WidgetPlan> {
        if self.phase != PlayerPhase::Ready {
            return None;
        }
        let main = self.active_link()?.embed()?;
        Some(WidgetPlan {
            lesson_id: self.lesson_id,
            main,
            sign: self.sign_link().and_then(LessonLink::embed),
        })
    }

    /// Claims the right to report completion. Only the first caller per
    /// session gets a claim, whichever detection path it came from.
    pub fn claim_completion(&mut self, signal: EndSignal) -> Option<CompletionClaim> {
        if self.reported {
            return None;
        }
        info!(
            "Lesson {}/{} ended ({signal:?})",
            self.course, self.lesson_id
        );
        self.reported = true;
        Some(CompletionClaim {
            course: self.course,
            lesson: self.lesson_id,
        })
    }

    pub fn finish_completion(&mut self) -> NextStep {
        self.show_next = true;
        self.next_step()
    }

    pub fn next_step(&self) -> NextStep {
        self.lesson
            .as_ref()
            .map(Lesson::next_step)
            .unwrap_or(NextStep::BackToCourse)
    }

    pub fn reported(&self) -> bool {
        self.reported
    }

    pub fn show_next(&self) -> bool {
        self.show_next
    }
}

/// The single completion report a session hands out. It is detached from the
/// session so the report can run while the session stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionClaim {
    pub course: CourseId,
    pub lesson: LessonId,
}

impl CompletionClaim {
    pub async fn report<T: Transport>(self, client: &ApiClient<T>) -> Result<CompletionStrategy, CompletionError> {
        report_completion(client, self.course, self.lesson).await
    }

    /// Marks the course for a progress refresh, whether or not the report
    /// went through.
    pub fn settle(self, events: &mut ProgressEvents) {
        events.lesson_completed(self.course);
    }
}

/// Ways of telling the backend a lesson is done, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStrategy {
    CompleteEndpoint,
    ProgressUpdate,
    LessonPatch,
}

impl CompletionStrategy {
    pub const ORDER: [CompletionStrategy; 3] = [
        CompletionStrategy::CompleteEndpoint,
        CompletionStrategy::ProgressUpdate,
        CompletionStrategy::LessonPatch,
    ];

    pub fn request(self, course: CourseId, lesson: LessonId) -> ApiRequest {
        match self {
            CompletionStrategy::CompleteEndpoint => {
                ApiRequest::post(format!("/courses/{course}/lessons/{lesson}/complete/"))
            }
            CompletionStrategy::ProgressUpdate => ApiRequest::post(format!("/courses/{course}/progress/"))
                .json(json!({ "lesson_id": lesson, "completed": true })),
            CompletionStrategy::LessonPatch => {
                ApiRequest::patch(format!("/courses/{course}/lessons/{lesson}/"))
                    .json(json!({ "completed": true }))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("every completion strategy failed for lesson {course}/{lesson}")]
pub struct CompletionError {
    pub course: CourseId,
    pub lesson: LessonId,
    pub attempts: Vec<(CompletionStrategy, ApiError)>,
}

/// Tries each [`CompletionStrategy`] in order until one succeeds.
pub async fn report_completion<T: Transport>(
    client: &ApiClient<T>,
    course: CourseId,
    lesson: LessonId,
) -> Result<CompletionStrategy, CompletionError> {
    let mut attempts = Vec::new();
    for strategy in CompletionStrategy::ORDER {
        match client.call(strategy.request(course, lesson)).await {
            Ok(_) => {
                info!("Lesson {course}/{lesson} marked complete via {strategy:?}");
                return Ok(strategy);
            }
            Err(e) => {
                warn!("Completion via {strategy:?} failed: {e}");
                attempts.push((strategy, e));
            }
        }
    }
    Err(CompletionError {
        course,
        lesson,
        attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(kind: LinkKind, role: Option<&str>) -> LessonLink {
        LessonLink {
            kind,
            role: role.map(str::to_string),
            url: Some("https://youtu.be/v".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn near_end_window() {
        assert!(is_near_end(99.2, 100.0));
        assert!(is_near_end(100.0, 100.0));
        assert!(!is_near_end(98.0, 100.0));
        assert!(!is_near_end(0.0, 0.0));
        assert!(!is_near_end(f64::NAN, 10.0));
    }

    #[test]
    fn primary_link_priority() {
        assert_eq!(primary_link_index(&[]), None);
        let links = [
            link(LinkKind::External, None),
            link(LinkKind::Youtube, None),
            link(LinkKind::Youtube, Some("MAIN")),
        ];
        assert_eq!(primary_link_index(&links), Some(2));
        assert_eq!(primary_link_index(&links[..2]), Some(1));
        assert_eq!(primary_link_index(&links[..1]), Some(0));
    }

    #[test]
    fn phases_follow_load_result() {
        let mut session = LessonSession::new(1, 2);
        assert_eq!(session.phase, PlayerPhase::Loading);

        session.loaded(Ok(Lesson::default()));
        assert_eq!(session.phase, PlayerPhase::Empty);
        assert!(session.active_link().is_none());

        session.loaded(Ok(Lesson {
            links: vec![link(LinkKind::External, None), link(LinkKind::Youtube, None)],
            ..Default::default()
        }));
        assert_eq!(session.phase, PlayerPhase::Ready);
        assert_eq!(session.active_index(), 1);

        session.loaded(Err(ApiError::NotFound));
        assert!(matches!(session.phase, PlayerPhase::Error(_)));
    }

    #[test]
    fn link_selection_and_sign_overlay() {
        let mut session = LessonSession::new(1, 2);
        session.loaded(Ok(Lesson {
            links: vec![link(LinkKind::Youtube, Some("main")), link(LinkKind::Youtube, Some("sign"))],
            ..Default::default()
        }));
        assert_eq!(session.active_index(), 0);
        assert!(session.sign_link().is_some());

        assert!(!session.select_link(0));
        assert!(!session.select_link(5));
        let plan = session.widget_plan().unwrap();
        assert_eq!(plan.main.video_id, "v");
        assert!(plan.sign.is_some());

        assert!(session.select_link(1));
        assert!(session.sign_link().is_none());
        assert!(session.widget_plan().unwrap().sign.is_none());
    }

    #[test]
    fn external_link_has_no_widget() {
        let mut session = LessonSession::new(1, 2);
        session.loaded(Ok(Lesson {
            links: vec![LessonLink {
                href: Some("https://example.org/video.mp4".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        }));
        assert_eq!(session.phase, PlayerPhase::Ready);
        assert_eq!(session.widget_plan(), None);
    }

    #[test]
    fn completion_is_claimed_once() {
        let mut session = LessonSession::new(1, 2);
        assert_eq!(
            session.claim_completion(EndSignal::ProviderEvent),
            Some(CompletionClaim { course: 1, lesson: 2 })
        );
        assert!(session.reported());
        assert_eq!(session.claim_completion(EndSignal::Polling), None);
        assert!(!session.show_next());
        assert_eq!(session.finish_completion(), NextStep::BackToCourse);
        assert!(session.show_next());
    }

    #[test]
    fn fresh_session_resets_flags() {
        let mut first = LessonSession::new(1, 2);
        first.claim_completion(EndSignal::Manual);
        first.finish_completion();
        let second = LessonSession::new(1, 3);
        assert!(!second.reported());
        assert!(!second.show_next());
    }

    #[test]
    fn strategy_requests() {
        let complete = CompletionStrategy::CompleteEndpoint.request(1, 2);
        assert_eq!(complete.path, "/courses/1/lessons/2/complete/");
        assert_eq!(complete.method, http::Method::POST);

        let patch = CompletionStrategy::LessonPatch.request(1, 2);
        assert_eq!(patch.method, http::Method::PATCH);
        assert_eq!(patch.body, Some(json!({"completed": true})));
    }
}
