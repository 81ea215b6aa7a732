mod common;

use deafability_web::{
    api::JobQuery,
    catalog::{CourseCatalog, CourseFilter, JobBoard},
    error::ApiError,
};
use http::Method;
use serde_json::json;

fn two_courses() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Intro", "level": "Easy", "category": "Comm"},
        {"id": 2, "name": "Advanced", "level": "Hard", "category": "Tech"}
    ])
}

#[tokio::test]
async fn search_term_narrows_to_matching_course() {
    let (client, fake) = common::client();
    fake.ok(Method::GET, "/courses/", two_courses());

    let catalog = CourseCatalog::load(&client).await.unwrap();
    let filter = CourseFilter {
        term: "intro".to_string(),
        ..Default::default()
    };
    let hits = catalog.filtered(&filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
    assert_eq!(catalog.levels(), vec!["Easy", "Hard"]);
}

#[tokio::test]
async fn every_envelope_shape_loads() {
    for body in [
        two_courses(),
        json!({"results": two_courses()}),
        json!({"data": two_courses()}),
        json!({"items": two_courses()}),
    ] {
        let (client, fake) = common::client();
        fake.ok(Method::GET, "/courses/", body);
        let catalog = CourseCatalog::load(&client).await.unwrap();
        assert_eq!(catalog.courses.len(), 2);
    }

    let (client, fake) = common::client();
    fake.ok(Method::GET, "/courses/", json!({"detail": "nope"}));
    let catalog = CourseCatalog::load(&client).await.unwrap();
    assert!(catalog.courses.is_empty());
    assert!(catalog.filtered(&CourseFilter::default()).is_empty());
}

#[tokio::test]
async fn catalog_failure_is_reported() {
    let (client, fake) = common::client();
    fake.status(Method::GET, "/courses/", 500);
    let err = CourseCatalog::load(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn job_filters_become_query_parameters() {
    let (client, fake) = common::client();
    fake.ok(
        Method::GET,
        "/jobs/",
        json!({"results": [
            {"id": 7, "title": "Clerk", "position_type": "Full time"},
            {"id": 8, "title": "Cashier", "position_type": " Part time "}
        ]}),
    );

    let query = JobQuery {
        q: "clerk".to_string(),
        position_type: String::new(),
    };
    let jobs = JobBoard::load(&client, &query).await.unwrap();

    let sent = fake.requests();
    assert_eq!(sent[0].query, vec![("q".to_string(), "clerk".to_string())]);

    let mut board = JobBoard::default();
    assert_eq!(board.set_jobs(jobs), Some(7));
    assert_eq!(board.position_types(), vec!["Full time", "Part time"]);

    board.active = board.jobs.first().cloned();
    assert_eq!(board.set_jobs(Vec::new()), None);
    assert!(board.active.is_none());
}
