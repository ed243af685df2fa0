//! One-shot mode: submit a URL, wait for the job, print the cards.
use std::io::{self, Write};
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use insights_core::{update, AppState, InsightCardView, Msg, PollSettings};
use insights_engine::{EngineEvents, EngineHandle};
use insights_logging::insight_info;

use crate::config::Config;
use crate::effects::EffectRunner;

const BAR_WIDTH: usize = 10;

pub fn run(config: &Config, url: &str) -> Result<()> {
    insights_logging::initialize(&config.log_destination(true), config.log_level)
        .with_context(|| format!("initialize logging ({})", config.log_file.display()))?;

    let (engine, events) =
        EngineHandle::from_settings(&config.api_settings()).context("start engine")?;
    let cards = collect_cards(engine, events, config.poll_settings(), url)?;
    insight_info!("Printing {} insights for {}", cards.len(), url);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_cards(&mut out, &cards)?;
    out.flush()?;
    Ok(())
}

/// Drive one request to completion. Anything short of at least one insight
/// is an error, so the process exits non-zero.
pub(crate) fn collect_cards(
    engine: EngineHandle,
    events: EngineEvents,
    settings: PollSettings,
    url: &str,
) -> Result<Vec<InsightCardView>> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut runner = EffectRunner::new(engine, events, msg_tx);
    let mut state = AppState::with_settings(settings);

    for msg in [Msg::InputChanged(url.to_string()), Msg::SubmitClicked] {
        state = step(state, msg, &mut runner);
    }
    if let Some(hint) = state.view().input_hint {
        bail!("{hint}");
    }

    while state.is_loading() {
        let msg = msg_rx
            .recv()
            .context("engine stopped before the request finished")?;
        state = step(state, msg, &mut runner);
    }

    match state.view().cards {
        None => bail!("no insights were produced; see the log for details"),
        Some(cards) if cards.is_empty() => bail!("the analysis finished without insights"),
        Some(cards) => Ok(cards),
    }
}

fn step(state: AppState, msg: Msg, runner: &mut EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.run(effects);
    state
}

pub(crate) fn write_cards<W: Write>(out: &mut W, cards: &[InsightCardView]) -> io::Result<()> {
    for (index, card) in cards.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        writeln!(out, "#{} {}", card.key, card.title)?;
        if !card.description.is_empty() {
            writeln!(out, "   {}", card.description)?;
        }
        if !card.tags.is_empty() {
            writeln!(out, "   Tags: {}", card.tags.join(", "))?;
        }
        writeln!(
            out,
            "   Impact: [{}] {}",
            impact_bar(card.impact_percent),
            card.impact_label
        )?;
        writeln!(out, "   {}", card.grid_label)?;
    }
    Ok(())
}

fn impact_bar(percent: u16) -> String {
    let filled = (usize::from(percent) * BAR_WIDTH / 100).min(BAR_WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
