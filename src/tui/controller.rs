use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too; only presses count as input.
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key.code);
                }
            }
        }
        if app.should_quit() {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key press to an input action for the current scene and overlays.
pub fn handle_key(app: &mut AppState, code: KeyCode) {
    let help_toggle = matches!(code, KeyCode::Char('?'));
    let history_toggle = matches!(code, KeyCode::Char('h') | KeyCode::Char('H'));
    if help_toggle {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return;
    }
    if history_toggle {
        let _ = app.handle_input(InputAction::ToggleHistory);
        return;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return;
    }

    let action = match app.scene {
        Scene::Start => match code {
            KeyCode::Up => Some(InputAction::MenuPrev),
            KeyCode::Down => Some(InputAction::MenuNext),
            KeyCode::Enter => Some(InputAction::MenuApply),
            KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputAction::Quit),
            _ => None,
        },
        Scene::Table => match code {
            KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('d') | KeyCode::Char('D') => {
                Some(InputAction::Draw)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::Restart),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::ToggleAuto),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => {
                Some(InputAction::ToggleMenu)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputAction::Quit),
            _ => None,
        },
    };
    if let Some(action) = action {
        let _ = app.handle_input(action);
    }
}
