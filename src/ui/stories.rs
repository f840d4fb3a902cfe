//! Story card list widget.

use crate::app::App;
use crate::feed::Story;
use crate::util::truncate_to_width;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the filtered story list with the cursor highlighted.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let visible = app.visible();
    let total = app.controller.stories().len();

    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} · {}/{} ",
        app.selection.label(),
        visible.len(),
        total
    ));

    if visible.is_empty() {
        let msg = Paragraph::new("해당 카테고리의 독서 이야기가 아직 없습니다.")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Borders (2) plus highlight symbol (2)
    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = visible.iter().map(|s| story_card(s, text_width)).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▌ ");

    let mut state = ListState::default();
    state.select(Some(app.cursor.min(visible.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}

/// One story as a four-line card plus a blank separator.
fn story_card(story: &Story, width: usize) -> ListItem<'static> {
    let title = Line::from(Span::styled(
        truncate_to_width(&story.title, width).into_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    let byline = Line::from(Span::styled(
        truncate_to_width(
            &format!(
                "{} · {} · ♥ {} · 댓글 {}",
                story.author, story.created_at, story.likes, story.comments
            ),
            width,
        )
        .into_owned(),
        Style::default().fg(Color::Gray),
    ));

    let tags = story
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ");
    let tags = Line::from(Span::styled(
        truncate_to_width(&tags, width).into_owned(),
        Style::default().fg(Color::Cyan),
    ));

    let body = Line::from(Span::styled(
        truncate_to_width(&story.body, width).into_owned(),
        Style::default().fg(Color::DarkGray),
    ));

    ListItem::new(Text::from(vec![title, byline, tags, body, Line::default()]))
}
