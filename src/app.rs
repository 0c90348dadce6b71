use std::io::{self, Stdout};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{
    handlers::{Action, Controller, Overlay},
    service::ServiceError,
    ui,
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Takes over the terminal until the user quits or the store fails.
pub fn run(mut controller: Controller) -> Result<(), AppError> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    tracing::info!("Sticky Notes window opened");

    let result = event_loop(&mut terminal, &mut controller);
    let restored = restore_terminal(&mut terminal);
    tracing::info!("Sticky Notes window closed");

    finish(result, restored)
}

/// The event loop's own failure wins over a failure to restore the terminal.
fn finish(result: Result<(), AppError>, restored: io::Result<()>) -> Result<(), AppError> {
    if let Err(e) = &restored {
        tracing::error!("Failed to restore terminal: {e}");
    }
    result?;
    restored?;
    Ok(())
}

/// Leaves raw mode and the alternate screen before the panic is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show).ok();
        previous(info);
    }));
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
) -> Result<(), AppError> {
    while !controller.should_quit() {
        terminal.draw(|frame| ui::draw(frame, controller))?;

        if let Event::Key(key) = event::read()? {
            handle_key(controller, key)?;
        }
    }

    Ok(())
}

pub fn handle_key(controller: &mut Controller, key: KeyEvent) -> Result<(), ServiceError> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    let action = match controller.overlay() {
        Some(Overlay::Warning(_)) => Some(Action::DismissWarning),
        Some(Overlay::ConfirmDelete(_)) => match key.code {
            KeyCode::Char('y' | 'Y') => Some(Action::ConfirmDelete),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::DeclineDelete),
            _ => None,
        },
        Some(Overlay::Popup(_)) => popup_key(controller, key),
        None => list_key(controller, key),
    };

    match action {
        Some(action) => controller.dispatch(action),
        None => Ok(()),
    }
}

/// Edits the open popup in place, or returns the action that closes it.
fn popup_key(controller: &mut Controller, key: KeyEvent) -> Option<Action> {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    let popup = controller.popup_mut()?;

    match key.code {
        KeyCode::Esc => return Some(Action::Cancel),
        KeyCode::Char('s') if control => return Some(Action::Submit),
        KeyCode::Tab | KeyCode::BackTab => popup.next_field(),
        KeyCode::Enter => popup.newline(),
        KeyCode::Backspace => popup.backspace(),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            popup.insert_char(ch);
        }
        _ => {}
    }

    None
}

fn list_key(controller: &Controller, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('a') => Some(Action::OpenAdd),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrevious),
        KeyCode::Char('e') | KeyCode::Enter => controller.selected_row().map(|row| row.edit_control()),
        KeyCode::Char('d') | KeyCode::Delete => {
            controller.selected_row().map(|row| row.delete_control())
        }
        _ => None,
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    terminal.show_cursor().ok();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}
