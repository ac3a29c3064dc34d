mod app;
mod ui;

use crate::directory::ParseMode;
use crate::registration::{LookupPolicy, StudentForm};
use anyhow::Result;
use app::{App, Mode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Run the interactive registration form.
/// Returns the completed form, or `None` if the user quit.
pub fn run(data_path: PathBuf, parse_mode: ParseMode, policy: LookupPolicy) -> Result<Option<StudentForm>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    // Registry loads in background, the form is usable right away
    let mut app = App::new(data_path, parse_mode, policy);

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map(|()| app.submitted.take())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Check for background load completion (non-blocking)
        app.poll_directory_load();

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        // Only handle key press events, not release or repeat
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Global keybindings
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::CONTROL, KeyCode::Char('q')) => return Ok(()),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                if app.submit() {
                    return Ok(());
                }
                continue;
            }
            _ => {}
        }

        // Any key acknowledges the load warning
        if app.warning.is_some() {
            app.dismiss_warning();
            if key.code == KeyCode::Esc {
                continue;
            }
        }

        match app.mode {
            Mode::Help => {
                // Any key closes help
                app.hide_help();
            }
            Mode::Results => match key.code {
                KeyCode::Down | KeyCode::Tab => app.select_next(),
                KeyCode::Up | KeyCode::BackTab => app.select_prev(),
                KeyCode::Enter => app.confirm_selection(),
                KeyCode::Esc => app.leave_results(),
                KeyCode::F(1) => app.show_help(),
                // Keep typing into the code field from the list
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.leave_results();
                    app.input_char(c);
                }
                KeyCode::Backspace => {
                    app.leave_results();
                    app.backspace();
                }
                _ => {}
            },
            Mode::Form => match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
                (KeyModifiers::CONTROL, KeyCode::Char('h')) => app.backspace(),
                (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                    KeyCode::Esc => return Ok(()),
                    KeyCode::Tab | KeyCode::Enter => app.focus_next(),
                    KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
                    KeyCode::Down => {
                        if !app.enter_results() {
                            app.focus_next();
                        }
                    }
                    KeyCode::Left => app.cycle_choice(false),
                    KeyCode::Right => app.cycle_choice(true),
                    KeyCode::F(1) => app.show_help(),
                    KeyCode::Char(c) => app.input_char(c),
                    KeyCode::Backspace => app.backspace(),
                    _ => {}
                },
                _ => {}
            },
        }
    }
}
