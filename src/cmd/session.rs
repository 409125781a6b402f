//! Session command: an interactive, line-oriented validation session

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use textecho::analytics::{AnalyticsSink, NoopAnalytics, TracingAnalytics};
use textecho::config::Config;
use textecho::orchestrator::TextValidator;
use textecho::resources::{EnglishResources, MessageKey, TextResources};
use textecho::session::SessionHandle;

use crate::cmd::ui::Output;

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Replace the input text, then submit it
    Text(String),
    Clear,
    Reset,
    Quit,
}

pub fn parse_line(line: &str) -> Input {
    match line.trim() {
        ":clear" => Input::Clear,
        ":reset" => Input::Reset,
        ":quit" | ":q" => Input::Quit,
        _ => Input::Text(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Run a session on stdin until `:quit` or end of input.
///
/// At end of input the last submission is allowed to finish; `:quit` stops
/// immediately and cancels anything in flight.
pub async fn cmd_session(config: &Config, out: &Output) -> Result<()> {
    let analytics: Arc<dyn AnalyticsSink> = if config.analytics.enabled {
        Arc::new(TracingAnalytics)
    } else {
        Arc::new(NoopAnalytics)
    };
    let (session, task) = SessionHandle::spawn(
        TextValidator::from_config(config),
        analytics,
        config.session.clone(),
    );

    let mut states = session.subscribe();
    let printer_out = out.clone();
    let printer = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            printer_out.state(&state, &EnglishResources);
        }
    });

    let min_length = config.rules.min_length.to_string();
    out.info(&EnglishResources.resolve(MessageKey::InputHint, &[min_length.as_str()]));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        match parse_line(&line) {
            Input::Quit => {
                quit = true;
                break;
            }
            Input::Clear => session.on_clear()?,
            Input::Reset => session.on_reset()?,
            Input::Text(text) => {
                session.on_text_changed(text)?;
                session.on_submit()?;
            }
        }
    }

    if !quit {
        session.settle().await?;
    }

    session.shutdown();
    task.await.context("Session task failed")?;
    printer.await.context("State printer failed")?;

    Ok(())
}
