//! Keyboard input handling.
//!
//! Navigation moves the cursor through the filtered story list; the event
//! loop re-checks the visibility trigger after every key, so scrolling near
//! the end of the list is what drives page loads.

use crate::app::App;
use crossterm::event::{KeyCode, KeyModifiers};

use super::Action;

/// Rows jumped by PageUp/PageDown (and Ctrl+u/Ctrl+d).
const PAGE_JUMP: usize = 5;

/// Main input dispatch function.
pub(super) fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('c') => return Action::Quit,
            KeyCode::Char('d') => {
                app.select_forward(PAGE_JUMP);
                return Action::Continue;
            }
            KeyCode::Char('u') => {
                app.select_backward(PAGE_JUMP);
                return Action::Continue;
            }
            _ => return Action::Continue,
        }
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            Action::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            Action::Continue
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.select_first();
            Action::Continue
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            Action::Continue
        }
        KeyCode::PageDown => {
            app.select_forward(PAGE_JUMP);
            Action::Continue
        }
        KeyCode::PageUp => {
            app.select_backward(PAGE_JUMP);
            Action::Continue
        }

        // Category selector
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
            app.cycle_category(true);
            Action::Continue
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            app.cycle_category(false);
            Action::Continue
        }

        // Session reset (the terminal equivalent of reloading the page)
        KeyCode::Char('r') => {
            app.reset();
            Action::Continue
        }

        _ => Action::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::feed::CategoryFilter;

    fn test_app() -> App {
        App::new(&Config::default())
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('q'), KeyModifiers::NONE),
            Action::Quit
        ));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Esc, KeyModifiers::NONE),
            Action::Quit
        ));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Action::Quit
        ));
    }

    #[test]
    fn test_j_and_k_move_cursor() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        handle_input(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(app.cursor, 2);
        handle_input(&mut app, KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_tab_cycles_category() {
        let mut app = test_app();
        assert_eq!(app.selection, CategoryFilter::All);
        handle_input(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        assert_ne!(app.selection, CategoryFilter::All);
        handle_input(&mut app, KeyCode::BackTab, KeyModifiers::NONE);
        assert_eq!(app.selection, CategoryFilter::All);
    }

    #[test]
    fn test_reset_key_bumps_generation() {
        let mut app = test_app();
        let before = app.load_generation;
        handle_input(&mut app, KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(app.load_generation, before + 1);
        assert_eq!(app.cursor, 0);
    }
}
