mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::deserializers::{default_page, deserialize_page};
use crate::db::Question;

pub(crate) const QUESTIONS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u32,
}

/// Listing payload shared by `/questions` and `/categories/{id}/questions`.
#[derive(Serialize)]
pub(crate) struct QuestionsResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: BTreeMap<i64, String>,
    pub current_category: String,
}

/// 1-based page slice over the already-ordered question list. Out-of-range
/// pages yield an empty slice, never an error.
pub(crate) fn paginate(page: u32, questions: Vec<Question>) -> Vec<Question> {
    let start = (page.saturating_sub(1)) as usize * QUESTIONS_PER_PAGE;
    questions
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(count: i64) -> Vec<Question> {
        (1..=count)
            .map(|id| Question {
                id,
                question: format!("Question {id}?"),
                answer: format!("Answer {id}"),
                category: 1,
                difficulty: 1,
            })
            .collect()
    }

    #[test]
    fn first_page_holds_ten() {
        let page = paginate(1, questions(25));
        assert_eq!(page.iter().map(|q| q.id).collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let page = paginate(3, questions(25));
        assert_eq!(page.iter().map(|q| q.id).collect::<Vec<_>>(), vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        assert!(paginate(4, questions(25)).is_empty());
        assert!(paginate(1, questions(0)).is_empty());
    }
}
