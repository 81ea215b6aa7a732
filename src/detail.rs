use log::warn;

use crate::{
    api::{ApiClient, Transport},
    error::ApiError,
    models::{Course, CourseId, LessonId, Progress},
    routes::AppRoute,
};

/// Everything the course page renders: the course itself plus the learner's
/// progress snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseOverview {
    pub course: Course,
    pub progress: Progress,
    pub enrolled: bool,
}

impl CourseOverview {
    /// Reads course and progress concurrently. Only the course read can fail
    /// the page; a failed progress read becomes a zero snapshot.
    pub async fn load<T: Transport>(client: &ApiClient<T>, id: CourseId) -> Result<Self, ApiError> {
        let (course, progress) = futures::join!(client.course(id), client.course_progress(id));
        let course = course?;
        let progress = progress.unwrap_or_else(|e| {
            warn!("Progress for course {id} unavailable, showing zero: {e}");
            Progress::default()
        });

        Ok(Self {
            course,
            enrolled: progress.is_enrolled(),
            progress,
        })
    }

    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = progress;
        self.enrolled = self.enrolled || progress.is_enrolled();
    }

    /// Flips to enrolled only once the backend accepted the request.
    pub async fn enroll<T: Transport>(&mut self, client: &ApiClient<T>) -> Result<(), ApiError> {
        client.enroll(self.course.id).await?;
        self.enrolled = true;
        Ok(())
    }

    pub fn quiz_available(&self) -> bool {
        self.enrolled && self.progress.percent >= 100.0
    }
}

/// Fetches a fresh progress snapshot, falling back to zero like the initial
/// load does.
pub async fn refresh_progress<T: Transport>(client: &ApiClient<T>, id: CourseId) -> Progress {
    client.course_progress(id).await.unwrap_or_else(|e| {
        warn!("Progress refresh for course {id} failed: {e}");
        Progress::default()
    })
}

pub async fn reset_progress<T: Transport>(client: &ApiClient<T>, id: CourseId) -> Result<Progress, ApiError> {
    client.reset_progress(id).await?;
    Ok(refresh_progress(client, id).await)
}

/// Records a visit to the lesson and returns the player route. The visit read
/// is best effort; navigation happens whatever it returns.
pub async fn visit_lesson<T: Transport>(client: &ApiClient<T>, course: CourseId, lesson: LessonId) -> AppRoute {
    if let Err(e) = client.lesson(course, lesson).await {
        log::debug!("Lesson visit {course}/{lesson} failed: {e}");
    }
    AppRoute::Player { course, lesson }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_needs_enrollment_and_full_progress() {
        let mut overview = CourseOverview::default();
        overview.progress.percent = 100.0;
        assert!(!overview.quiz_available());
        overview.enrolled = true;
        assert!(overview.quiz_available());
        overview.progress.percent = 99.5;
        assert!(!overview.quiz_available());
    }

    #[test]
    fn refreshed_progress_never_unenrolls() {
        let mut overview = CourseOverview {
            enrolled: true,
            ..Default::default()
        };
        overview.set_progress(Progress::default());
        assert!(overview.enrolled);
    }
}
