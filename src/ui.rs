// Interactive terminal adapter
// Draws the list and maps key input onto the app entry points; all list
// logic stays behind the App

use crate::app::App;
use crate::view::{ActionControl, ItemView};
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

/// Restores the terminal when dropped
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw terminal mode")?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// What the one-line text input at the bottom is collecting
enum InputIntent {
    NewTask,
    EditTask,
}

enum Mode {
    Browse,
    Input { intent: InputIntent, buffer: String },
}

/// Run the interactive list until the user quits
pub fn run(app: &mut App) -> Result<()> {
    let _guard = TerminalGuard::enter()?;

    let mut cursor_row: usize = 0;
    let mut mode = Mode::Browse;
    sync_selection(app, cursor_row);

    loop {
        draw(app, cursor_row, &mode)?;

        let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match &mut mode {
            Mode::Browse => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    break;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up | KeyCode::Char('k') => {
                        cursor_row = cursor_row.saturating_sub(1);
                        sync_selection(app, cursor_row);
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if cursor_row + 1 < app.view().len() {
                            cursor_row += 1;
                        }
                        sync_selection(app, cursor_row);
                    }
                    KeyCode::Char(' ') => {
                        app.toggle(cursor_row)?;
                    }
                    KeyCode::Enter | KeyCode::Char('e') => {
                        if app.view().item_at(cursor_row).is_some() {
                            mode = Mode::Input {
                                intent: InputIntent::EditTask,
                                buffer: String::new(),
                            };
                        }
                    }
                    KeyCode::Char('n') => {
                        mode = Mode::Input {
                            intent: InputIntent::NewTask,
                            buffer: String::new(),
                        };
                    }
                    KeyCode::Char('d') => {
                        app.remove_task(cursor_row)?;
                        cursor_row = clamp_cursor(app, cursor_row);
                        sync_selection(app, cursor_row);
                    }
                    KeyCode::Char('c') => {
                        if app.clear_enabled() {
                            app.clear_completed()?;
                            cursor_row = clamp_cursor(app, cursor_row);
                            sync_selection(app, cursor_row);
                        }
                    }
                    _ => {}
                }
            }
            Mode::Input { intent, buffer } => match key.code {
                KeyCode::Esc => {
                    mode = Mode::Browse;
                }
                KeyCode::Enter => {
                    match intent {
                        InputIntent::NewTask => {
                            // Empty submissions never reach the collection
                            if !buffer.is_empty() {
                                app.create_task(buffer)?;
                                cursor_row = app.view().len().saturating_sub(1);
                                sync_selection(app, cursor_row);
                            }
                        }
                        InputIntent::EditTask => {
                            app.commit_edit(cursor_row, buffer)?;
                        }
                    }
                    mode = Mode::Browse;
                }
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => {
                    buffer.push(c);
                }
                _ => {}
            },
        }
    }

    Ok(())
}

/// Keep the row cursor on an existing row after structural changes
fn clamp_cursor(app: &App, cursor_row: usize) -> usize {
    cursor_row.min(app.view().len().saturating_sub(1))
}

/// Point the selection state machine at the row under the cursor
fn sync_selection(app: &mut App, cursor_row: usize) {
    if let Some(handle) = app.view().item_at(cursor_row).map(|item| item.handle) {
        app.select(handle);
    }
}

/// One rendered list row: cursor marker, checkbox, text, action control
fn row_line(item: &ItemView, at_cursor: bool) -> String {
    let marker = if at_cursor { ">" } else { " " };
    let checkbox = if item.checked { "[x]" } else { "[ ]" };
    let action = match item.action {
        ActionControl::Handle => "⋮",
        ActionControl::Trash => "✕",
    };
    format!("{} {} {}  {}", marker, checkbox, item.placeholder, action)
}

fn draw(app: &App, cursor_row: usize, mode: &Mode) -> Result<()> {
    let mut stdout = io::stdout();

    queue!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(format!(" to-do ({} tasks)\r\n", app.view().len())),
        SetAttribute(Attribute::Reset),
        Print("\r\n"),
    )?;

    if app.view().is_empty() {
        queue!(stdout, Print("   no tasks yet (press n to add one)\r\n"))?;
    }
    for (position, item) in app.view().items().iter().enumerate() {
        queue!(
            stdout,
            Print(row_line(item, position == cursor_row)),
            Print("\r\n"),
        )?;
    }

    queue!(stdout, Print("\r\n"))?;
    match mode {
        Mode::Browse => {
            let clear_hint = if app.clear_enabled() {
                "c clear done · "
            } else {
                ""
            };
            queue!(
                stdout,
                SetAttribute(Attribute::Dim),
                Print(format!(
                    " n new · enter edit · space toggle · d delete · {}q quit",
                    clear_hint
                )),
                SetAttribute(Attribute::Reset),
            )?;
        }
        Mode::Input { intent, buffer } => {
            let prompt = match intent {
                InputIntent::NewTask => "new task",
                InputIntent::EditTask => "edit task",
            };
            queue!(stdout, Print(format!(" {}: {}_", prompt, buffer)))?;
        }
    }

    stdout.flush().context("Failed to flush terminal output")?;
    Ok(())
}
