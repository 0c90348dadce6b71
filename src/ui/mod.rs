mod modal;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use crate::{
    handlers::{Controller, NoteRow, Overlay},
    models::NoteColor,
};

const NOTE_TEXT: Color = Color::Black;
const ACCENT: Color = Color::Yellow;

pub fn draw(frame: &mut Frame, controller: &Controller) {
    let [header, list, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, controller.total());
    draw_notes(frame, list, controller);
    draw_footer(frame, footer);

    match controller.overlay() {
        Some(Overlay::Popup(popup)) => modal::draw_popup(frame, popup),
        Some(Overlay::Warning(popup)) => {
            modal::draw_popup(frame, popup);
            modal::draw_warning(frame);
        }
        Some(Overlay::ConfirmDelete(_)) => modal::draw_confirm_delete(frame),
        None => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, total: i64) {
    let line = Line::from(vec![
        Span::styled("Sticky Notes", Style::new().add_modifier(Modifier::BOLD)),
        Span::raw(format!(" ({total})")),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(line, area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("+ Add Note [a]", Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::raw("   edit [e]   delete [d]   move [j/k]   quit [q]"),
    ]);

    frame.render_widget(line, area);
}

fn draw_notes(frame: &mut Frame, area: Rect, controller: &Controller) {
    let rows = controller.rows();

    if rows.is_empty() {
        let empty = Paragraph::new("No notes yet. Press 'a' to add one.")
            .alignment(Alignment::Center)
            .style(Style::new().add_modifier(Modifier::DIM));
        frame.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let heights: Vec<u16> = rows
        .iter()
        .map(|row| card_height(&row.note().content, inner_width))
        .collect();

    let start = first_visible(&heights, controller.selected(), area.height);
    let mut y = area.y;

    for (index, (row, height)) in rows.iter().zip(&heights).enumerate().skip(start) {
        let remaining = area.bottom().saturating_sub(y);
        if remaining == 0 {
            break;
        }

        let card = Rect::new(area.x, y, area.width, (*height).min(remaining));
        draw_card(frame, card, row, index == controller.selected());
        y = y.saturating_add(*height);
    }
}

fn draw_card(frame: &mut Frame, area: Rect, row: &NoteRow, selected: bool) {
    let note = row.note();
    let background = to_color(note.color);

    let mut block = Block::bordered()
        .style(Style::new().bg(background).fg(NOTE_TEXT))
        .border_style(Style::new().fg(Color::DarkGray));
    if selected {
        block = block
            .border_type(BorderType::Thick)
            .border_style(Style::new().fg(NOTE_TEXT).add_modifier(Modifier::BOLD));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title, content, timestamp] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Line::styled(note.title.as_str(), Style::new().add_modifier(Modifier::BOLD)),
        title,
    );
    frame.render_widget(
        content_paragraph(&note.content),
        content,
    );
    frame.render_widget(
        Line::styled(note.timestamp.as_str(), Style::new().add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Right),
        timestamp,
    );
}

const fn to_color(color: NoteColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

fn content_paragraph(content: &str) -> Paragraph<'_> {
    Paragraph::new(content).wrap(Wrap { trim: false })
}

/// Borders, title and timestamp lines, plus the content wrapped exactly
/// as `draw_card` will render it.
fn card_height(content: &str, width: u16) -> u16 {
    let lines = content_paragraph(content).line_count(width.max(1));

    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(4)
}

/// Earliest card index from which everything up to `selected` still fits.
fn first_visible(heights: &[u16], selected: usize, available: u16) -> usize {
    let Some(&selected_height) = heights.get(selected) else {
        return 0;
    };

    let mut start = selected;
    let mut used = selected_height;
    while start > 0 {
        let next = used.saturating_add(heights[start - 1]);
        if next > available {
            break;
        }
        used = next;
        start -= 1;
    }
    start
}
