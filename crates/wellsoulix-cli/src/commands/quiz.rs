use anyhow::Result;
use chrono::Local;
use wellsoulix_core::{DailyQuiz, QuizOutcome, QUIZ_REWARD_STARS};
use wellsoulix_storage::UserStats;

/// Show today's question, and grade `answer` (1-based) if given
pub fn handle_quiz(answer: Option<usize>) -> Result<()> {
    let mut quiz = DailyQuiz::for_date(Local::now().date_naive());
    let question = quiz.question().clone();

    println!("Daily Quiz: {}", question.question);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}. {option}", i + 1);
    }

    let Some(answer) = answer else {
        println!("\nAnswer with `wellsoulix quiz --answer <n>`");
        return Ok(());
    };
    if !answer.checked_sub(1).is_some_and(|i| quiz.select(i)) {
        anyhow::bail!("Answer must be between 1 and {}", question.options.len());
    }

    // Stars only accumulate inside a chat session (`/quiz`)
    let mut scratch = UserStats::default();
    match quiz.submit(&mut scratch) {
        QuizOutcome::Correct => println!(
            "\nCorrect! +{QUIZ_REWARD_STARS} stars. Answer with /quiz in chat to keep them."
        ),
        QuizOutcome::Incorrect { correct, .. } => println!(
            "\nNot quite. The answer was {}. {}",
            correct + 1,
            question.options[correct]
        ),
        QuizOutcome::NoSelection | QuizOutcome::AlreadySubmitted => {}
    }
    Ok(())
}
