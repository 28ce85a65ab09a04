use anyhow::Result;
use wellsoulix_core::{AppConfig, CheckIn, Session};
use wellsoulix_storage::Database;

use super::dispatcher_from_config;
use super::helpers::format_message;

/// One-shot mood check-in: prints the seeded transcript and the reply
pub async fn handle_checkin(
    level: u8,
    note: Option<String>,
    nickname: &str,
    app_config: &AppConfig,
) -> Result<()> {
    let check_in = CheckIn::new(level, note)?;
    let db = Database::new(None)?;
    let dispatcher = dispatcher_from_config(&db)?;
    let mut session = Session::login(nickname)?;

    dispatcher
        .check_in(&mut session, &check_in, app_config.checkin_reply_delay())
        .await;

    for message in session.active_transcript() {
        println!("{}", format_message(message));
    }
    Ok(())
}
