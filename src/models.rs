use serde::{Deserialize, Serialize};

pub type CourseId = u64;
pub type LessonId = u64;
pub type JobId = u64;
pub type QuestionId = u64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub level: String,
    pub category: String,
    pub description: String,
    pub cover_url: Option<String>,
    pub total_duration_seconds: Option<f64>,
    pub lessons: Vec<Lesson>,
}

impl Course {
    /// Total running time, preferring the backend total, then lesson
    /// durations, then the sum over every lesson link.
    pub fn total_seconds(&self) -> f64 {
        if let Some(total) = self.total_duration_seconds.filter(|t| *t > 0.0) {
            return total;
        }

        let from_lessons: f64 = self
            .lessons
            .iter()
            .filter_map(|l| l.lesson_duration_seconds.or(l.duration_seconds))
            .filter(|d| d.is_finite())
            .sum();
        if from_lessons > 0.0 {
            return from_lessons;
        }

        self.lessons.iter().map(Lesson::links_seconds).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub links: Vec<LessonLink>,
    pub next_lesson_id: Option<LessonId>,
    pub is_last_lesson: bool,
    pub cover_url: Option<String>,
    pub lesson_duration_seconds: Option<f64>,
    pub duration_seconds: Option<f64>,
}

impl Lesson {
    pub fn seconds(&self) -> f64 {
        self.lesson_duration_seconds
            .or(self.duration_seconds)
            .filter(|d| d.is_finite())
            .unwrap_or_else(|| self.links_seconds())
    }

    fn links_seconds(&self) -> f64 {
        self.links
            .iter()
            .filter_map(|l| l.duration_seconds)
            .filter(|d| d.is_finite())
            .sum()
    }

    /// Where to go once this lesson has been watched.
    pub fn next_step(&self) -> NextStep {
        match self.next_lesson_id {
            Some(next) if !self.is_last_lesson => NextStep::NextLesson(next),
            _ => NextStep::BackToCourse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    NextLesson(LessonId),
    BackToCourse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Youtube,
    #[default]
    External,
    File,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LessonLink {
    pub id: Option<u64>,
    pub title: String,
    pub kind: LinkKind,
    /// `main` for the lesson video, `sign` for the sign-language overlay.
    pub role: Option<String>,
    pub embed_url: Option<String>,
    pub href: Option<String>,
    pub url: Option<String>,
    pub duration_seconds: Option<f64>,
}

impl LessonLink {
    pub fn has_role(&self, role: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(role))
    }

    /// The outbound address for links that cannot be embedded.
    pub fn external_href(&self) -> Option<&str> {
        self.href
            .as_deref()
            .or(self.url.as_deref())
            .filter(|h| !h.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub percent: f64,
    #[serde(alias = "completed")]
    pub completed_lessons: u32,
    /// Only sent once the learner is enrolled.
    pub total_lessons: u32,
    /// Sent to anonymous learners too, so it never implies enrollment.
    pub total_videos: u32,
}

impl Progress {
    pub fn is_enrolled(&self) -> bool {
        self.total_lessons > 0
    }

    /// Lesson count for display.
    pub fn total(&self) -> u32 {
        if self.total_lessons > 0 {
            self.total_lessons
        } else {
            self.total_videos
        }
    }

    pub fn clamped_percent(&self) -> f64 {
        self.percent.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub position_type: String,
    pub location: String,
    pub salary: Option<String>,
    pub description: String,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub prompt: String,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub education: String,
    pub interested_job: String,
    pub email: String,
    pub completed_course: Course,
    pub completed_percent: f64,
}

impl UserProfile {
    /// Demo profile shown until the backend exposes user accounts.
    pub fn demo() -> Self {
        Self {
            name: "สมหญิง".to_string(),
            age: 22,
            education: "อนุปริญญา".to_string(),
            interested_job: "งานธุรการ".to_string(),
            email: "somyi@example.com".to_string(),
            completed_course: Course {
                id: 1,
                name: "การสื่อสารธุรกิจเบื้องต้น".to_string(),
                level: "ง่าย".to_string(),
                category: "การสื่อสาร".to_string(),
                description: "บทเรียนนี้ออกแบบมาสำหรับผู้พิการทางการได้ยิน".to_string(),
                ..Default::default()
            },
            completed_percent: 100.0,
        }
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past the hour.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// Shortens a description for lesson cards.
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
