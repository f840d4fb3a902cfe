//! Title line and category selector bar.

use crate::app::App;
use crate::feed::{Category, CategoryFilter, ALL_LABEL};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the two header lines: application title and the category pills.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 2 {
        return;
    }

    let title = Line::from(vec![
        Span::styled(
            "bookfeed",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" — 독서 이야기"),
    ]);

    let mut pills: Vec<Span> = Vec::with_capacity(CategoryFilter::COUNT * 2);
    push_pill(&mut pills, ALL_LABEL, app.selection == CategoryFilter::All);
    for category in Category::ALL {
        push_pill(
            &mut pills,
            category.label(),
            app.selection == CategoryFilter::Only(category),
        );
    }

    let lines = vec![title, Line::from(pills)];
    f.render_widget(Paragraph::new(lines), area);
}

fn push_pill(pills: &mut Vec<Span<'static>>, label: &'static str, selected: bool) {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    pills.push(Span::styled(format!(" {label} "), style));
    pills.push(Span::raw(" "));
}
