//! Interactive chat loop
//!
//! Plain lines are sent to the active mode. Lines starting with `/` are
//! commands, see [`HELP`]. Quiz, focus and task commands credit the
//! session's own stats.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use wellsoulix_core::focus_timer::FocusCompleted;
use wellsoulix_core::{
    attachments, parse_mode, spawn_ticker, AppConfig, CheckIn, DailyQuiz, FocusTimer,
    MessageDispatcher, QuizOutcome, Session, StatsAccumulator, TickerHandle, QUIZ_REWARD_STARS,
};
use wellsoulix_storage::{Database, Mode};

use super::dispatcher_from_config;
use super::helpers::{format_message, rule};

const HELP: &str = "Commands:
  /mode <name>             switch mode (comfort, cheer, calm, study-buddy, career-coach, spirit, ai-mentor)
  /attach <path>           attach an image or file to your next message
  /link <url>              attach a link to your next message
  /clear                   drop the pending attachment
  /checkin <1-10> [note]   mood check-in
  /quiz [n]                show today's question, or answer it
  /focus [minutes|stop]    start or stop a focus session
  /task [add <text>|done <n>]  list, add or tick off micro-tasks
  /nick <name>             change your nickname
  /stats                   show your stats
  /reset                   start over
  /help                    show this help
  /quit                    leave";

enum Flow {
    Continue,
    Quit,
}

/// A focus countdown running alongside the chat
struct FocusRun {
    timer: Arc<Mutex<FocusTimer>>,
    completions: mpsc::UnboundedReceiver<FocusCompleted>,
    _ticker: TickerHandle,
}

/// Widget state that lives as long as the chat
struct Widgets {
    quiz: DailyQuiz,
    focus: Option<FocusRun>,
}

impl Widgets {
    fn new() -> Self {
        Self {
            quiz: DailyQuiz::for_date(Local::now().date_naive()),
            focus: None,
        }
    }
}

pub async fn handle_chat(nickname: &str, mode: Mode, app_config: &AppConfig) -> Result<()> {
    let db = Database::new(None)?;
    let dispatcher = dispatcher_from_config(&db)?;
    let mut session = Session::login(nickname)?;
    let mut widgets = Widgets::new();

    println!("Wellsoulix {}", rule(20));
    println!("Hi {}! Type /help for commands.\n", session.nickname());
    println!("{}", format_message(session.switch_mode(mode)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let flow = if let Some(command) = line.strip_prefix('/') {
                    run_command(&dispatcher, &mut session, &mut widgets, command, app_config).await
                } else {
                    session.set_input(line);
                    send(&dispatcher, &mut session).await;
                    Flow::Continue
                };
                if matches!(flow, Flow::Quit) {
                    break;
                }
            }
            Some(completed) = next_focus_completion(&mut widgets.focus) => {
                widgets.focus = None;
                println!("{}", focus_finished(&mut session, completed));
            }
        }
    }

    println!("Take care, {} \u{1f49c}", session.nickname());
    Ok(())
}

async fn next_focus_completion(focus: &mut Option<FocusRun>) -> Option<FocusCompleted> {
    match focus {
        Some(run) => run.completions.recv().await,
        None => std::future::pending().await,
    }
}

async fn send(dispatcher: &MessageDispatcher, session: &mut Session) {
    let mode = session.active_mode();
    println!("{} ...", mode.config().emoji);
    if let Some(reply) = dispatcher.send_pending(session).await {
        println!("{}", format_message(&reply));
    }
}

async fn run_command(
    dispatcher: &MessageDispatcher,
    session: &mut Session,
    widgets: &mut Widgets,
    command: &str,
    app_config: &AppConfig,
) -> Flow {
    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));

    match name {
        "mode" => match parse_mode(arg) {
            Ok(mode) => println!("{}", format_message(session.switch_mode(mode))),
            Err(e) => println!("{e}"),
        },
        "attach" => match attachments::from_file(Path::new(arg)) {
            Ok(attachment) => {
                println!("Attached: {}", attachment.label());
                session.set_pending_attachment(attachment);
            }
            Err(e) => println!("Could not attach {arg}: {e}"),
        },
        "link" => match attachments::link(arg) {
            Some(attachment) => {
                println!("Attached: {}", attachment.label());
                session.set_pending_attachment(attachment);
            }
            None => println!("Usage: /link <url>"),
        },
        "clear" => {
            if session.clear_pending_attachment().is_some() {
                println!("Attachment removed");
            }
        }
        "checkin" => check_in(dispatcher, session, arg, app_config).await,
        "quiz" => println!("{}", quiz_command(session, &mut widgets.quiz, arg)),
        "focus" => println!("{}", focus_command(widgets, arg, app_config).await),
        "task" => println!("{}", task_command(session, arg)),
        "nick" => match session.set_nickname(arg) {
            Ok(()) => println!("You're now {}", session.nickname()),
            Err(e) => println!("{e}"),
        },
        "stats" => println!("{}", stats_line(session)),
        "reset" => {
            session.full_reset();
            *widgets = Widgets::new();
            println!("{}", format_message(session.switch_mode(Mode::default())));
        }
        "help" => println!("{HELP}"),
        "quit" | "exit" => return Flow::Quit,
        _ => println!("Unknown command /{name}. Type /help for commands."),
    }
    Flow::Continue
}

async fn check_in(
    dispatcher: &MessageDispatcher,
    session: &mut Session,
    arg: &str,
    app_config: &AppConfig,
) {
    let (level, note) = arg
        .split_once(char::is_whitespace)
        .map_or((arg, None), |(l, n)| (l, Some(n.to_string())));

    let check_in = match level.parse::<u8>() {
        Ok(level) => CheckIn::new(level, note),
        Err(_) => {
            println!("Usage: /checkin <1-10> [note]");
            return;
        }
    };
    let check_in = match check_in {
        Ok(check_in) => check_in,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let seeded = session.transcript(check_in.mode()).len();
    dispatcher
        .check_in(session, &check_in, app_config.checkin_reply_delay())
        .await;
    for message in &session.active_transcript()[seeded..] {
        println!("{}", format_message(message));
    }
}

/// `/quiz` shows the question, `/quiz <n>` answers it with option `n`
fn quiz_command(session: &mut Session, quiz: &mut DailyQuiz, arg: &str) -> String {
    let question = quiz.question().clone();
    if arg.is_empty() {
        let options: Vec<String> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("  {}. {o}", i + 1))
            .collect();
        let footer = if quiz.is_submitted() {
            "Already answered today."
        } else {
            "Answer with /quiz <n>"
        };
        return format!("Daily Quiz: {}\n{}\n{footer}", question.question, options.join("\n"));
    }

    if quiz.is_submitted() {
        return "Already answered today.".to_string();
    }
    let selected = arg
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .is_some_and(|i| quiz.select(i));
    if !selected {
        return format!("Answer must be between 1 and {}", question.options.len());
    }

    match quiz.submit(session.stats_mut()) {
        QuizOutcome::Correct => format!(
            "Correct! +{QUIZ_REWARD_STARS} stars ({} total)",
            session.stats().stars
        ),
        QuizOutcome::Incorrect { correct, .. } => format!(
            "Not quite. The answer was {}. {}",
            correct + 1,
            question.options[correct]
        ),
        QuizOutcome::NoSelection | QuizOutcome::AlreadySubmitted => {
            "Already answered today.".to_string()
        }
    }
}

/// `/focus [minutes]` starts a countdown, `/focus stop` abandons it
async fn focus_command(widgets: &mut Widgets, arg: &str, app_config: &AppConfig) -> String {
    if arg == "stop" {
        return match widgets.focus.take() {
            Some(run) => format!(
                "Focus stopped with {} left. No focus time credited.",
                run.timer.lock().await.format()
            ),
            None => "No focus session running.".to_string(),
        };
    }
    if let Some(run) = &widgets.focus {
        return format!("Focus session running, {} left.", run.timer.lock().await.format());
    }

    let minutes = if arg.is_empty() {
        Ok(app_config.default_focus_minutes)
    } else {
        arg.parse::<u32>()
    };
    let Some(mut timer) = minutes.ok().and_then(|m| FocusTimer::new(m).ok()) else {
        return "Usage: /focus [minutes|stop] (presets: 25, 45)".to_string();
    };
    timer.toggle();
    let message = format!("Focus session started: {} min.", timer.minutes());
    let timer = Arc::new(Mutex::new(timer));
    let (ticker, completions) = spawn_ticker(app_config.focus_tick(), Arc::clone(&timer));
    widgets.focus = Some(FocusRun {
        timer,
        completions,
        _ticker: ticker,
    });
    message
}

/// Credit a finished focus session to the session stats
fn focus_finished(session: &mut Session, completed: FocusCompleted) -> String {
    session.stats_mut().record_focus(completed.minutes);
    format!(
        "Focus complete! +{} min ({} min total)",
        completed.minutes,
        session.stats().focus_minutes
    )
}

/// `/task` lists, `/task add <text>` adds, `/task done <n>` toggles task `n`
fn task_command(session: &mut Session, arg: &str) -> String {
    let (action, rest) = arg
        .split_once(char::is_whitespace)
        .map_or((arg, ""), |(a, r)| (a, r.trim()));

    match action {
        "" | "list" => {
            let tasks = session.tasks().tasks();
            if tasks.is_empty() {
                return "No tasks yet. Add one with /task add <text>".to_string();
            }
            tasks
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let mark = if t.completed { "x" } else { " " };
                    format!("  {}. [{mark}] {}", i + 1, t.text)
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        "add" => match session.tasks_mut().add(rest) {
            Some(task) => format!("Added: {}", task.text),
            None => "Usage: /task add <text>".to_string(),
        },
        "done" => {
            let id = rest
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| session.tasks().tasks().get(i))
                .map(|t| t.id);
            match id {
                Some(id) if session.tasks_mut().toggle(id) => format!(
                    "{} of {} tasks done",
                    session.tasks().completed_count(),
                    session.tasks().tasks().len()
                ),
                _ => "Usage: /task done <n>".to_string(),
            }
        }
        _ => "Usage: /task [add <text>|done <n>]".to_string(),
    }
}

fn stats_line(session: &Session) -> String {
    let stats = session.stats();
    format!(
        "Stars: {}  Level: {}  Focus: {} min  Tasks: {}/{}  Quizzes: {}",
        stats.stars,
        stats.level,
        stats.focus_minutes,
        session.tasks().completed_count(),
        session.tasks().tasks().len(),
        stats.quizzes_solved
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellsoulix_core::quiz::daily_quizzes;

    fn pomodoro_quiz() -> DailyQuiz {
        DailyQuiz::new(daily_quizzes().remove(0))
    }

    #[test]
    fn test_quiz_correct_answer_credits_session() {
        let mut session = Session::login("Mina").unwrap();
        let mut quiz = pomodoro_quiz();

        let reply = quiz_command(&mut session, &mut quiz, "2");

        assert_eq!(session.stats().stars, 25);
        assert_eq!(reply, "Correct! +20 stars (25 total)");
        assert_eq!(
            quiz_command(&mut session, &mut quiz, "2"),
            "Already answered today."
        );
        assert_eq!(session.stats().stars, 25);
    }

    #[test]
    fn test_quiz_wrong_or_invalid_answer() {
        let mut session = Session::login("Mina").unwrap();
        let mut quiz = pomodoro_quiz();

        assert!(quiz_command(&mut session, &mut quiz, "9").starts_with("Answer must be"));
        assert!(!quiz.is_submitted());
        assert!(quiz_command(&mut session, &mut quiz, "1").starts_with("Not quite"));
        assert_eq!(session.stats().stars, 5);
    }

    #[test]
    fn test_quiz_shows_question() {
        let mut session = Session::login("Mina").unwrap();
        let mut quiz = pomodoro_quiz();
        let shown = quiz_command(&mut session, &mut quiz, "");
        assert!(shown.contains("Pomodoro"));
        assert!(shown.contains("  2. 25m"));
    }

    #[test]
    fn test_focus_completion_credits_session() {
        let mut session = Session::login("Mina").unwrap();
        let reply = focus_finished(&mut session, FocusCompleted { minutes: 25 });
        assert_eq!(session.stats().focus_minutes, 25);
        assert_eq!(reply, "Focus complete! +25 min (25 min total)");
    }

    #[test]
    fn test_task_commands() {
        let mut session = Session::login("Mina").unwrap();
        assert_eq!(task_command(&mut session, "add  stretch "), "Added: stretch");
        assert_eq!(task_command(&mut session, "add"), "Usage: /task add <text>");
        assert_eq!(task_command(&mut session, "done 1"), "1 of 1 tasks done");
        assert_eq!(task_command(&mut session, "done 7"), "Usage: /task done <n>");
        assert_eq!(task_command(&mut session, ""), "  1. [x] stretch");
        assert_eq!(session.stats().stars, 5);
    }

    #[test]
    fn test_stats_line_reflects_session() {
        let mut session = Session::login("Mina").unwrap();
        quiz_command(&mut session, &mut pomodoro_quiz(), "2");
        task_command(&mut session, "add read");
        assert_eq!(
            stats_line(&session),
            "Stars: 25  Level: 1  Focus: 0 min  Tasks: 0/1  Quizzes: 0"
        );
    }
}
