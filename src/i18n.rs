//! User-facing strings. Thai is the platform language; English is kept for
//! development and tests.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Th,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    Loading,
    TryAgain,
    Back,
    BackToCourses,
    CoursesTitle,
    CoursesLoadFailed,
    SearchCourses,
    AllLevels,
    AllCategories,
    NoMatchingCourses,
    Level,
    Category,
    CourseLoadFailed,
    CourseNotFound,
    CourseTotal,
    AboutCourse,
    Progress,
    Lessons,
    NoLessons,
    NoDescription,
    LessonNumber,
    Done,
    Enroll,
    Enrolled,
    EnrollSucceeded,
    EnrollFailed,
    ResetProgress,
    ResetFailed,
    TakeQuiz,
    LessonLoadFailed,
    NoVideo,
    NotEmbeddable,
    MarkComplete,
    LinkList,
    NextLesson,
    FinishCourse,
    SignLanguage,
    JobsTitle,
    JobsLoadFailed,
    JobLoadFailed,
    SearchJobs,
    AllPositions,
    Position,
    Location,
    Salary,
    RelatedCourses,
    BackToJobs,
    More,
    QuizLoadFailed,
    NoQuestions,
    YourSentence,
    Check,
    CheckPage,
    Correct,
    Incorrect,
    Page,
    Prev,
    Next,
    Home,
    Profile,
    Age,
    Education,
    InterestedJob,
    Contact,
    CompletedCourses,
    NotFound,
}

impl Text {
    pub fn get(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Th => self.th(),
            Locale::En => self.en(),
        }
    }

    fn th(self) -> &'static str {
        match self {
            Text::Loading => "กำลังโหลดข้อมูล…",
            Text::TryAgain => "ลองใหม่",
            Text::Back => "← กลับ",
            Text::BackToCourses => "← กลับหน้ารวมคอร์ส",
            Text::CoursesTitle => "บทเรียน",
            Text::CoursesLoadFailed => "ไม่สามารถโหลดข้อมูลได้ กรุณาลองใหม่",
            Text::SearchCourses => "ค้นหาตามชื่อบทเรียน...",
            Text::AllLevels => "ทุกระดับ",
            Text::AllCategories => "ทุกประเภท",
            Text::NoMatchingCourses => "ไม่พบบทเรียนที่ตรงกับเงื่อนไข",
            Text::Level => "ระดับ",
            Text::Category => "หมวดหมู่",
            Text::CourseLoadFailed => "ไม่สามารถโหลดข้อมูลคอร์สได้",
            Text::CourseNotFound => "ไม่พบคอร์สที่ต้องการ",
            Text::CourseTotal => "รวมเวลาคอร์ส",
            Text::AboutCourse => "เกี่ยวกับคอร์สนี้",
            Text::Progress => "ความคืบหน้า",
            Text::Lessons => "รายการบทเรียน",
            Text::NoLessons => "ยังไม่มีบทเรียนในคอร์สนี้",
            Text::NoDescription => "ไม่มีคำอธิบาย",
            Text::LessonNumber => "บทที่",
            Text::Done => "✔ ทำแล้ว",
            Text::Enroll => "สมัครเรียน",
            Text::Enrolled => "สมัครเรียนแล้ว",
            Text::EnrollSucceeded => "สมัครเรียนสำเร็จ",
            Text::EnrollFailed => "ไม่สามารถสมัครเรียนได้",
            Text::ResetProgress => "เริ่มเรียนใหม่",
            Text::ResetFailed => "ไม่สามารถรีเซ็ตความคืบหน้าได้",
            Text::TakeQuiz => "ทำแบบทดสอบ",
            Text::LessonLoadFailed => "โหลดบทเรียนไม่สำเร็จ",
            Text::NoVideo => "ยังไม่มีลิงก์วิดีโอในบทเรียนนี้",
            Text::NotEmbeddable => "ลิงก์นี้ฝังไม่ได้:",
            Text::MarkComplete => "ทำบทนี้เสร็จ → ไปต่อ",
            Text::LinkList => "รายการลิงก์",
            Text::NextLesson => "ไปบทถัดไป →",
            Text::FinishCourse => "จบคอร์ส → กลับหน้าคอร์ส",
            Text::SignLanguage => "ภาษามือ",
            Text::JobsTitle => "DeafAbility Jobs",
            Text::JobsLoadFailed => "ไม่สามารถโหลดรายการงานได้",
            Text::JobLoadFailed => "ไม่สามารถโหลดข้อมูลงานได้",
            Text::SearchJobs => "ค้นหา (ชื่องาน/รายละเอียด/ชื่อคอร์ส)",
            Text::AllPositions => "ทุกตำแหน่ง",
            Text::Position => "ตำแหน่ง",
            Text::Location => "สถานที่",
            Text::Salary => "เงินเดือน",
            Text::RelatedCourses => "คอร์สที่เกี่ยวข้อง",
            Text::BackToJobs => "← กลับไป Jobs",
            Text::More => "ดูรายละเอียด",
            Text::QuizLoadFailed => "โหลดคำถามไม่สำเร็จ",
            Text::NoQuestions => "ยังไม่มีคำถามในคอร์สนี้",
            Text::YourSentence => "ประโยคของคุณ:",
            Text::Check => "ตรวจคำตอบ",
            Text::CheckPage => "ตรวจคำตอบในหน้านี้",
            Text::Correct => "✅ ถูกต้อง",
            Text::Incorrect => "❌ ยังไม่ถูก ลองใหม่",
            Text::Page => "หน้า",
            Text::Prev => "← ก่อนหน้า",
            Text::Next => "ถัดไป →",
            Text::Home => "หน้าแรก",
            Text::Profile => "โปรไฟล์",
            Text::Age => "อายุ",
            Text::Education => "การศึกษา",
            Text::InterestedJob => "งานที่สนใจ",
            Text::Contact => "ติดต่อ",
            Text::CompletedCourses => "คอร์สที่เรียนจบแล้ว",
            Text::NotFound => "ไม่พบหน้าที่ต้องการ",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Text::Loading => "Loading…",
            Text::TryAgain => "Try again",
            Text::Back => "← Back",
            Text::BackToCourses => "← Back to courses",
            Text::CoursesTitle => "Courses",
            Text::CoursesLoadFailed => "Could not load courses, please try again",
            Text::SearchCourses => "Search by course name...",
            Text::AllLevels => "All levels",
            Text::AllCategories => "All categories",
            Text::NoMatchingCourses => "No courses match these filters",
            Text::Level => "Level",
            Text::Category => "Category",
            Text::CourseLoadFailed => "Could not load this course",
            Text::CourseNotFound => "Course not found",
            Text::CourseTotal => "Course length",
            Text::AboutCourse => "About this course",
            Text::Progress => "Progress",
            Text::Lessons => "Lessons",
            Text::NoLessons => "This course has no lessons yet",
            Text::NoDescription => "No description",
            Text::LessonNumber => "Lesson",
            Text::Done => "✔ Done",
            Text::Enroll => "Enroll",
            Text::Enrolled => "Enrolled",
            Text::EnrollSucceeded => "Enrolled successfully",
            Text::EnrollFailed => "Could not enroll",
            Text::ResetProgress => "Start over",
            Text::ResetFailed => "Could not reset your progress",
            Text::TakeQuiz => "Take the quiz",
            Text::LessonLoadFailed => "Could not load this lesson",
            Text::NoVideo => "This lesson has no video yet",
            Text::NotEmbeddable => "This link cannot be embedded:",
            Text::MarkComplete => "Mark complete → continue",
            Text::LinkList => "Links",
            Text::NextLesson => "Next lesson →",
            Text::FinishCourse => "Finish → back to course",
            Text::SignLanguage => "Sign language",
            Text::JobsTitle => "DeafAbility Jobs",
            Text::JobsLoadFailed => "Could not load jobs",
            Text::JobLoadFailed => "Could not load this job",
            Text::SearchJobs => "Search (title/description/course)",
            Text::AllPositions => "All positions",
            Text::Position => "Position",
            Text::Location => "Location",
            Text::Salary => "Salary",
            Text::RelatedCourses => "Related courses",
            Text::BackToJobs => "← Back to jobs",
            Text::More => "View details",
            Text::QuizLoadFailed => "Could not load questions",
            Text::NoQuestions => "This course has no questions yet",
            Text::YourSentence => "Your sentence:",
            Text::Check => "Check",
            Text::CheckPage => "Check this page",
            Text::Correct => "✅ Correct",
            Text::Incorrect => "❌ Not yet, try again",
            Text::Page => "Page",
            Text::Prev => "← Previous",
            Text::Next => "Next →",
            Text::Home => "Home",
            Text::Profile => "Profile",
            Text::Age => "Age",
            Text::Education => "Education",
            Text::InterestedJob => "Interested in",
            Text::Contact => "Contact",
            Text::CompletedCourses => "Completed courses",
            Text::NotFound => "Page not found",
        }
    }
}
