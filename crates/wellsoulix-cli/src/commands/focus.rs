use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tokio::time::interval;
use wellsoulix_core::{spawn_ticker, AppConfig, FocusTimer};

/// Run a focus countdown in the foreground until it finishes or Ctrl-C
pub async fn handle_focus(minutes: u32, app_config: &AppConfig) -> Result<()> {
    let mut timer = FocusTimer::new(minutes)?;
    timer.toggle();
    let timer = Arc::new(Mutex::new(timer));

    let (_ticker, mut completions) = spawn_ticker(app_config.focus_tick(), Arc::clone(&timer));
    let mut display = interval(app_config.focus_tick());

    println!("Focus session started: {minutes} min. Press Ctrl-C to stop.");

    loop {
        tokio::select! {
            _ = display.tick() => {
                print!("\r  {} remaining ", timer.lock().await.format());
                std::io::stdout().flush()?;
            }
            completed = completions.recv() => {
                if let Some(completed) = completed {
                    println!("\rFocus complete! {} min focused.", completed.minutes);
                }
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                let remaining = timer.lock().await.format();
                println!("\rStopped with {remaining} left. No focus time credited.");
                break;
            }
        }
    }

    Ok(())
}
