use chrono::{Datelike, NaiveDate};
use wellsoulix_storage::{QuizQuestion, UserStats};

use crate::gamification::StatsAccumulator;

/// Built-in question bank
#[must_use]
pub fn daily_quizzes() -> Vec<QuizQuestion> {
    let q = |question: &str, options: [&str; 4], correct_answer: usize| QuizQuestion {
        question: question.to_string(),
        options: options.iter().map(ToString::to_string).collect(),
        correct_answer,
    };
    vec![
        q(
            "What is the Pomodoro technique focus duration?",
            ["15m", "25m", "45m", "60m"],
            1,
        ),
        q(
            "Which mode focuses on emotional validation?",
            ["Cheer", "Calm", "Comfort", "Spirit"],
            2,
        ),
        q(
            "Beneficial short-term stress is called?",
            ["Distress", "Eustress", "Astress", "Hyperstress"],
            1,
        ),
    ]
}

/// Result of submitting an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizOutcome {
    /// Nothing selected; nothing happened
    NoSelection,
    Correct,
    Incorrect { selected: usize, correct: usize },
    /// The quiz was already answered; nothing happened
    AlreadySubmitted,
}

/// One question, answered at most once
#[derive(Debug, Clone)]
pub struct DailyQuiz {
    question: QuizQuestion,
    selected: Option<usize>,
    submitted: bool,
}

impl DailyQuiz {
    #[must_use]
    pub fn new(question: QuizQuestion) -> Self {
        Self {
            question,
            selected: None,
            submitted: false,
        }
    }

    /// Question of the day, rotating through the bank by day of year
    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let mut bank = daily_quizzes();
        let index = date.ordinal0() as usize % bank.len();
        Self::new(bank.swap_remove(index))
    }

    #[must_use]
    pub fn question(&self) -> &QuizQuestion {
        &self.question
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Select an option. Ignored after submission or for out-of-range indices.
    pub fn select(&mut self, index: usize) -> bool {
        if self.submitted || index >= self.question.options.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Submit the current selection, crediting stars for a correct answer
    pub fn submit(&mut self, stats: &mut UserStats) -> QuizOutcome {
        if self.submitted {
            return QuizOutcome::AlreadySubmitted;
        }
        let Some(selected) = self.selected else {
            return QuizOutcome::NoSelection;
        };

        self.submitted = true;
        let correct = self.question.correct_answer;
        if selected == correct {
            stats.award_quiz();
            QuizOutcome::Correct
        } else {
            log::debug!("Quiz answered incorrectly: {selected} (expected {correct})");
            QuizOutcome::Incorrect { selected, correct }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pomodoro() -> DailyQuiz {
        DailyQuiz::new(daily_quizzes().remove(0))
    }

    #[test]
    fn test_correct_answer_adds_twenty_stars() {
        let mut stats = UserStats::default();
        let mut quiz = pomodoro();
        assert!(quiz.select(1));

        assert_eq!(quiz.submit(&mut stats), QuizOutcome::Correct);
        assert_eq!(stats.stars, 25);
    }

    #[test]
    fn test_incorrect_answer_keeps_stars() {
        let mut stats = UserStats::default();
        let mut quiz = pomodoro();
        quiz.select(3);

        assert_eq!(
            quiz.submit(&mut stats),
            QuizOutcome::Incorrect {
                selected: 3,
                correct: 1
            }
        );
        assert_eq!(stats.stars, 5);
        assert!(quiz.is_submitted());
    }

    #[test]
    fn test_submit_without_selection_is_noop() {
        let mut stats = UserStats::default();
        let mut quiz = pomodoro();

        assert_eq!(quiz.submit(&mut stats), QuizOutcome::NoSelection);
        assert!(!quiz.is_submitted());
        assert_eq!(stats, UserStats::default());
    }

    #[test]
    fn test_locked_after_submit() {
        let mut stats = UserStats::default();
        let mut quiz = pomodoro();
        quiz.select(1);
        quiz.submit(&mut stats);

        assert!(!quiz.select(0));
        assert_eq!(quiz.selected(), Some(1));
        assert_eq!(quiz.submit(&mut stats), QuizOutcome::AlreadySubmitted);
        assert_eq!(stats.stars, 25);
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let mut quiz = pomodoro();
        assert!(!quiz.select(4));
        assert_eq!(quiz.selected(), None);
    }

    #[test]
    fn test_question_rotates_by_day() {
        let jan1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let jan4 = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();

        let first = DailyQuiz::for_date(jan1);
        assert_eq!(
            first.question().question,
            "What is the Pomodoro technique focus duration?"
        );
        assert_ne!(DailyQuiz::for_date(jan2).question(), first.question());
        assert_eq!(DailyQuiz::for_date(jan4).question(), first.question());
    }
}
