//! Course and job listings with client-side narrowing.

use log::debug;

use crate::{
    api::{ApiClient, JobQuery, Transport},
    error::ApiError,
    models::{Course, Job, JobId},
};

/// Search box plus the two select boxes on the course catalog. Empty fields
/// do not narrow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub term: String,
    pub level: String,
    pub category: String,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        let term = self.term.trim().to_lowercase();
        (term.is_empty() || course.name.to_lowercase().contains(&term))
            && (self.level.is_empty() || course.level == self.level)
            && (self.category.is_empty() || course.category == self.category)
    }

    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Distinct values in first-seen order, skipping blanks.
pub fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out: Vec<String> = Vec::new();
    for v in values.into_iter().map(str::trim).filter(|v| !v.is_empty()) {
        if !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseCatalog {
    pub courses: Vec<Course>,
}

impl CourseCatalog {
    pub async fn load<T: Transport>(client: &ApiClient<T>) -> Result<Self, ApiError> {
        let courses = client.courses().await?;
        debug!("Loaded {} courses", courses.len());
        Ok(Self { courses })
    }

    pub fn levels(&self) -> Vec<String> {
        distinct(self.courses.iter().map(|c| c.level.as_str()))
    }

    pub fn categories(&self) -> Vec<String> {
        distinct(self.courses.iter().map(|c| c.category.as_str()))
    }

    pub fn filtered(&self, filter: &CourseFilter) -> Vec<Course> {
        filter.apply(&self.courses).into_iter().cloned().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobBoard {
    pub jobs: Vec<Job>,
    pub active: Option<Job>,
}

impl JobBoard {
    pub async fn load<T: Transport>(client: &ApiClient<T>, query: &JobQuery) -> Result<Vec<Job>, ApiError> {
        let jobs = client.jobs(query).await?;
        debug!("Loaded {} jobs for {query:?}", jobs.len());
        Ok(jobs)
    }

    /// Replaces the list. Returns the job whose detail should be fetched when
    /// nothing is selected yet; an empty list clears the selection.
    pub fn set_jobs(&mut self, jobs: Vec<Job>) -> Option<JobId> {
        self.jobs = jobs;
        if self.jobs.is_empty() {
            self.active = None;
            return None;
        }
        match self.active {
            None => self.jobs.first().map(|j| j.id),
            Some(_) => None,
        }
    }

    pub fn position_types(&self) -> Vec<String> {
        distinct(self.jobs.iter().map(|j| j.position_type.as_str()))
    }
}
