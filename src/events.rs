use std::collections::BTreeSet;

use crate::models::CourseId;

/// Courses whose progress changed since the course page last looked.
///
/// The lesson player marks a course when it reports a completion; the course
/// page takes the mark when it mounts or regains focus, so each completion
/// triggers exactly one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressEvents {
    stale: BTreeSet<CourseId>,
}

impl ProgressEvents {
    pub fn lesson_completed(&mut self, course: CourseId) {
        self.stale.insert(course);
    }

    /// Consumes the mark for `course`, returning whether it was set.
    pub fn take(&mut self, course: CourseId) -> bool {
        self.stale.remove(&course)
    }
}
