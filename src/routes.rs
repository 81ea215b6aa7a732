use crate::models::{CourseId, JobId, LessonId};

/// Client-side pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    Home,
    Courses,
    Course(CourseId),
    Player { course: CourseId, lesson: LessonId },
    Jobs,
    Job(JobId),
    Quiz(CourseId),
    Profile,
}

impl AppRoute {
    pub fn path(&self) -> String {
        match self {
            AppRoute::Home => "/".to_string(),
            AppRoute::Courses => "/courses".to_string(),
            AppRoute::Course(id) => format!("/course/{id}"),
            AppRoute::Player { course, lesson } => format!("/videoplayer/{course}/{lesson}"),
            AppRoute::Jobs => "/jobs".to_string(),
            AppRoute::Job(id) => format!("/jobs/{id}"),
            AppRoute::Quiz(id) => format!("/quiz/{id}"),
            AppRoute::Profile => "/profile".to_string(),
        }
    }
}
