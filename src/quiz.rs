//! Word-ordering quiz with client-side pagination.

use std::collections::HashMap;

use futures::future::join_all;
use log::warn;

use crate::{
    api::{ApiClient, Transport},
    error::ApiError,
    models::{CourseId, QuestionId, QuizQuestion},
};

pub const PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    page: usize,
    answers: HashMap<QuestionId, Vec<String>>,
    results: HashMap<QuestionId, bool>,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            ..Default::default()
        }
    }

    pub async fn load<T: Transport>(client: &ApiClient<T>, course: CourseId) -> Result<Self, ApiError> {
        Ok(Self::new(client.quiz_questions(course).await?))
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.questions.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn page_items(&self) -> &[QuizQuestion] {
        let start = (self.page * PAGE_SIZE).min(self.questions.len());
        let end = (start + PAGE_SIZE).min(self.questions.len());
        &self.questions[start..end]
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count()
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Adds `word` to the question's answer, or removes it if already picked.
    pub fn toggle_word(&mut self, question: QuestionId, word: &str) {
        let answer = self.answers.entry(question).or_default();
        match answer.iter().position(|w| w == word) {
            Some(i) => {
                answer.remove(i);
            }
            None => answer.push(word.to_string()),
        }
    }

    pub fn answer(&self, question: QuestionId) -> &[String] {
        self.answers.get(&question).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn result(&self, question: QuestionId) -> Option<bool> {
        self.results.get(&question).copied()
    }

    pub fn record(&mut self, question: QuestionId, correct: bool) {
        self.results.insert(question, correct);
    }

    pub fn record_all(&mut self, verdicts: impl IntoIterator<Item = Verdict>) {
        for (question, correct) in verdicts {
            self.record(question, correct);
        }
    }

    /// The current answer to `question`, ready to score.
    pub fn submission(&self, question: QuestionId) -> Vec<Submission> {
        vec![(question, self.answer(question).to_vec())]
    }

    /// Answers to submit for the current page.
    pub fn page_submissions(&self) -> Vec<Submission> {
        self.page_items()
            .iter()
            .map(|q| (q.id, self.answer(q.id).to_vec()))
            .collect()
    }
}

pub type Submission = (QuestionId, Vec<String>);
pub type Verdict = (QuestionId, bool);

async fn check_answer<T: Transport>(client: &ApiClient<T>, question: QuestionId, answer: &[String]) -> bool {
    client.check_answer(question, answer).await.unwrap_or_else(|e| {
        warn!("Checking question {question} failed: {e}");
        false
    })
}

/// Scores submissions concurrently. Any failure counts as incorrect.
pub async fn check_all<T: Transport>(client: &ApiClient<T>, submissions: Vec<Submission>) -> Vec<Verdict> {
    join_all(submissions.into_iter().map(|(question, answer)| async move {
        (question, check_answer(client, question, &answer).await)
    }))
    .await
}
