use std::io;
use std::panic;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use insights_core::{update, AppState, Msg};
use insights_engine::EngineHandle;
use insights_logging::insight_info;
use ratatui::{backend::CrosstermBackend, Terminal};

use super::ui;
use super::ui::constants::{INPUT_POLL, TICK_INTERVAL};
use crate::config::Config;
use crate::effects::EffectRunner;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run_app(config: &Config) -> Result<()> {
    insights_logging::initialize(&config.log_destination(false), config.log_level)
        .with_context(|| format!("open log file {}", config.log_file.display()))?;
    insight_info!("Starting terminal UI against {}", config.api_base);

    let (engine, events) =
        EngineHandle::from_settings(&config.api_settings()).context("start engine")?;
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, events, msg_tx.clone());

    // Background tick to animate the busy indicator.
    thread::spawn(move || {
        while msg_tx.send(Msg::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });

    install_panic_hook(restore_terminal);
    let mut terminal = enter_terminal()?;
    let mut session = Session {
        state: AppState::with_settings(config.poll_settings()),
        runner,
        msg_rx,
    };
    let result = session.run(&mut terminal);
    leave_terminal(&mut terminal)?;

    insight_info!("Terminal UI closed");
    result
}

fn enter_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn leave_terminal(terminal: &mut Tui) -> Result<()> {
    restore_terminal()?;
    terminal.show_cursor()?;
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableBracketedPaste,
        cursor::Show
    )
}

/// Put the terminal back before the default hook prints, otherwise the
/// panic message lands on the alternate screen and is lost.
fn install_panic_hook(restore: fn() -> io::Result<()>) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

struct Session {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Session {
    fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut needs_redraw = true;
        loop {
            while let Ok(msg) = self.msg_rx.try_recv() {
                self.dispatch(msg);
            }

            if self.state.consume_dirty() || needs_redraw {
                let view = self.state.view();
                let submitted_at = self.runner.last_submitted_at();
                terminal.draw(|f| ui::render::draw(f, &view, submitted_at))?;
                needs_redraw = false;
            }

            if !event::poll(INPUT_POLL)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match map_key(key, self.state.input()) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Send(msg) => self.dispatch(msg),
                        KeyAction::Ignore => {}
                    }
                }
                Event::Paste(text) => {
                    let msg = paste_into(self.state.input(), &text);
                    self.dispatch(msg);
                }
                Event::Resize(..) => needs_redraw = true,
                _ => {}
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Send(Msg),
    Ignore,
}

fn map_key(key: KeyEvent, input: &str) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if ctrl => KeyAction::Quit,
        KeyCode::Char('u') if ctrl => KeyAction::Send(Msg::InputChanged(String::new())),
        KeyCode::Enter => KeyAction::Send(Msg::SubmitClicked),
        KeyCode::Up | KeyCode::PageUp => KeyAction::Send(Msg::SelectPreviousCard),
        KeyCode::Down | KeyCode::PageDown => KeyAction::Send(Msg::SelectNextCard),
        KeyCode::Backspace if !input.is_empty() => {
            let mut text = input.to_string();
            text.pop();
            KeyAction::Send(Msg::InputChanged(text))
        }
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut text = input.to_string();
            text.push(c);
            KeyAction::Send(Msg::InputChanged(text))
        }
        _ => KeyAction::Ignore,
    }
}

/// Pasted text is appended on one line; the input field is single-line.
fn paste_into(input: &str, pasted: &str) -> Msg {
    let mut text = input.to_string();
    text.extend(pasted.chars().filter(|c| !c.is_control()));
    Msg::InputChanged(text)
}
