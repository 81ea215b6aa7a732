mod common;

use deafability_web::{
    detail::{reset_progress, visit_lesson, CourseOverview},
    events::ProgressEvents,
    models::Progress,
    routes::AppRoute,
};
use http::Method;
use serde_json::json;

fn course() -> serde_json::Value {
    json!({
        "id": 4,
        "name": "Office basics",
        "lessons": [
            {"id": 10, "title": "Greeting", "duration_seconds": 90},
            {"id": 11, "title": "Email", "duration_seconds": 30}
        ]
    })
}

#[tokio::test]
async fn failed_progress_read_shows_zero() {
    let (client, fake) = common::client();
    fake.ok(Method::GET, "/courses/4/", course());
    fake.offline(Method::GET, "/courses/4/progress/");

    let overview = CourseOverview::load(&client, 4).await.unwrap();
    assert_eq!(overview.course.name, "Office basics");
    assert_eq!(overview.progress, Progress::default());
    assert!(!overview.enrolled);
    assert_eq!(overview.course.total_seconds(), 120.0);
}

#[tokio::test]
async fn progress_decides_enrollment() {
    let (client, fake) = common::client();
    fake.ok(Method::GET, "/courses/4/", course());
    fake.ok(
        Method::GET,
        "/courses/4/progress/",
        json!({"percent": 50, "completed": 1, "total_lessons": 2}),
    );

    let overview = CourseOverview::load(&client, 4).await.unwrap();
    assert!(overview.enrolled);
    assert_eq!(overview.progress.completed_lessons, 1);
    assert!(!overview.quiz_available());
}

#[tokio::test]
async fn anonymous_progress_is_not_enrollment() {
    let (client, fake) = common::client();
    fake.ok(Method::GET, "/courses/4/", course());
    fake.ok(
        Method::GET,
        "/courses/4/progress/",
        json!({"course_id": 4, "total_videos": 1, "completed": 0, "percent": 0.0}),
    );

    let mut overview = CourseOverview::load(&client, 4).await.unwrap();
    assert!(!overview.enrolled);
    assert_eq!(overview.progress.total(), 1);
    assert_eq!(fake.count(Method::POST, "/courses/4/enroll/"), 0);

    fake.ok(Method::POST, "/courses/4/enroll/", json!({"ok": true}));
    overview.enroll(&client).await.unwrap();
    assert!(overview.enrolled);
}

#[tokio::test]
async fn missing_course_fails_the_view() {
    let (client, _fake) = common::client();
    assert!(CourseOverview::load(&client, 99).await.is_err());
}

#[tokio::test]
async fn enrollment_flips_only_after_success() {
    let (client, fake) = common::client();
    fake.ok(Method::GET, "/courses/4/", course());
    let mut overview = CourseOverview::load(&client, 4).await.unwrap();

    fake.status(Method::POST, "/courses/4/enroll/", 403);
    assert!(overview.enroll(&client).await.is_err());
    assert!(!overview.enrolled);

    let (client, fake) = common::client();
    fake.ok(Method::POST, "/courses/4/enroll/", json!({"ok": true}));
    overview.enroll(&client).await.unwrap();
    assert!(overview.enrolled);
}

#[tokio::test]
async fn reset_refetches_progress() {
    let (client, fake) = common::client();
    fake.ok(Method::POST, "/courses/4/reset_progress/", json!({}));
    fake.ok(
        Method::GET,
        "/courses/4/progress/",
        json!({"percent": 0, "completed_lessons": 0, "total_lessons": 2}),
    );

    let progress = reset_progress(&client, 4).await.unwrap();
    assert_eq!(progress.total_lessons, 2);
    assert_eq!(fake.count(Method::GET, "/courses/4/progress/"), 1);
}

#[tokio::test]
async fn lesson_visit_navigates_even_when_it_fails() {
    let (client, fake) = common::client();
    fake.offline(Method::GET, "/courses/4/lessons/10/");

    let route = visit_lesson(&client, 4, 10).await;
    assert_eq!(route, AppRoute::Player { course: 4, lesson: 10 });
    assert_eq!(route.path(), "/videoplayer/4/10");
    assert_eq!(fake.count(Method::GET, "/courses/4/lessons/10/"), 1);
}

#[test]
fn completion_mark_is_consumed_once() {
    let mut events = ProgressEvents::default();
    events.lesson_completed(4);
    assert!(events.take(4));
    assert!(!events.take(4));
}
