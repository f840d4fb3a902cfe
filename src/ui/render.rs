//! Render dispatch for the TUI.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{header, status, stories};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Braille spinner shown while a page load is in flight.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Number of frames in the loading spinner animation.
pub(super) const SPINNER_FRAMES: usize = SPINNER.len();

/// Main render function.
///
/// Lays the screen out as header / story list / feed footer / status bar,
/// after validating the terminal size.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + category bar
            Constraint::Min(0),    // story list
            Constraint::Length(1), // feed footer (loading / exhausted)
            Constraint::Length(1), // status bar
        ])
        .split(area);

    header::render(f, app, chunks[0]);
    stories::render(f, app, chunks[1]);
    render_feed_footer(f, app, chunks[2]);
    status::render(f, app, chunks[3]);
}

/// The sentinel row below the list: a spinner while loading, the
/// end-of-feed message once exhausted, the last error if a load failed.
fn render_feed_footer(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let controller = &app.controller;
    let line = if controller.is_loading() {
        Line::from(vec![
            Span::styled(
                SPINNER[app.spinner_frame % SPINNER_FRAMES],
                Style::default().fg(Color::Blue),
            ),
            Span::raw(" 불러오는 중..."),
        ])
    } else if !controller.has_more() {
        Line::from(Span::styled(
            "모든 독서 이야기를 불러왔습니다 · 새로운 이야기가 올라오면 알려드릴게요!",
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        ))
    } else if let Some(error) = controller.last_error() {
        Line::from(Span::styled(
            format!("불러오기 실패: {error} · 이동하면 다시 시도합니다"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::default()
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
