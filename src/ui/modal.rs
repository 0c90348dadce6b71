use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use super::ACCENT;
use crate::{
    dto::ValidationError,
    handlers::{Field, Popup},
};

const DELETE_QUESTION: &str = "Are you sure you want to delete this note?";

pub fn draw_popup(frame: &mut Frame, popup: &Popup) {
    let area = centered(frame.area(), 56, 20);
    let block = Block::bordered()
        .title(Line::from(popup.heading()).alignment(Alignment::Center))
        .border_style(Style::new().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [title_label, title_area, content_label, content_area, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(Line::from("Title:"), title_label);
    let title_cursor = draw_input(frame, title_area, popup.title(), popup.focus() == Field::Title);

    frame.render_widget(Line::from("Content:"), content_label);
    let content_cursor = draw_input(
        frame,
        content_area,
        popup.content(),
        popup.focus() == Field::Content,
    );

    frame.render_widget(
        Line::from("save [Ctrl-S]   cancel [Esc]   switch field [Tab]")
            .alignment(Alignment::Center)
            .style(Style::new().add_modifier(Modifier::DIM)),
        help,
    );

    frame.set_cursor_position(match popup.focus() {
        Field::Title => title_cursor,
        Field::Content => content_cursor,
    });
}

pub fn draw_warning(frame: &mut Frame) {
    draw_message_box(
        frame,
        "Warning",
        vec![
            Line::from(ValidationError.to_string()),
            Line::default(),
            Line::from("press any key").style(Style::new().add_modifier(Modifier::DIM)),
        ],
    );
}

pub fn draw_confirm_delete(frame: &mut Frame) {
    draw_message_box(
        frame,
        "Confirm Delete",
        vec![
            Line::from(DELETE_QUESTION),
            Line::default(),
            Line::from("[y] Yes   [n] No").style(Style::new().add_modifier(Modifier::BOLD)),
        ],
    );
}

fn draw_message_box(frame: &mut Frame, title: &str, lines: Vec<Line<'_>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 50, height);
    let block = Block::bordered()
        .title(Line::from(title).alignment(Alignment::Center))
        .border_style(Style::new().fg(ACCENT));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

/// Renders a bordered text field scrolled so the end of the text stays
/// visible, and returns where the cursor belongs.
fn draw_input(frame: &mut Frame, area: Rect, text: &str, focused: bool) -> Position {
    let border = if focused {
        Style::new().fg(ACCENT)
    } else {
        Style::new().add_modifier(Modifier::DIM)
    };
    let block = Block::bordered().border_style(border);
    let view = layout_field(text, block.inner(area));

    let lines: Vec<Line<'_>> = view.rows.into_iter().map(Line::from).collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);

    view.cursor
}

/// The rows of a field that fit on screen, and the cursor after the text.
#[derive(Debug, PartialEq, Eq)]
struct FieldView {
    rows: Vec<String>,
    cursor: Position,
}

fn layout_field(text: &str, area: Rect) -> FieldView {
    let width = usize::from(area.width.max(1));
    let height = usize::from(area.height.max(1));

    let mut rows = wrap_rows(text, width);
    if rows.last().is_some_and(|row| display_width(row) >= width) {
        rows.push(String::new());
    }

    let cursor_row = rows.len() - 1;
    let scroll = cursor_row.saturating_sub(height - 1);
    let column = display_width(&rows[cursor_row]);

    FieldView {
        rows: rows.split_off(scroll),
        cursor: Position::new(
            area.x.saturating_add(to_u16(column)),
            area.y.saturating_add(to_u16(cursor_row - scroll)),
        ),
    }
}

/// Breaks text into rows of at most `width` display columns. Explicit
/// newlines always start a row; long runs are cut anywhere.
fn wrap_rows(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;

        for ch in line.chars() {
            let mut buf = [0; 4];
            let ch_width = display_width(ch.encode_utf8(&mut buf));
            if used + ch_width > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += ch_width;
        }

        rows.push(row);
    }

    rows
}

fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn render(popup: &Popup) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|frame| draw_popup(frame, popup)).unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn typed(title: &str, content: &str) -> Popup {
        let mut popup = Popup::blank();
        title.chars().for_each(|ch| popup.insert_char(ch));
        popup.next_field();
        for ch in content.chars() {
            match ch {
                '\n' => popup.newline(),
                ch => popup.insert_char(ch),
            }
        }
        popup
    }

    #[test]
    fn cursor_follows_the_last_line() {
        let area = Rect::new(10, 5, 20, 4);

        assert_eq!(layout_field("", area).cursor, Position::new(10, 5));
        assert_eq!(layout_field("Gym", area).cursor, Position::new(13, 5));
        assert_eq!(layout_field("Leg\nday", area).cursor, Position::new(13, 6));
        assert_eq!(layout_field("\n\n\n\n\n", area).cursor, Position::new(10, 8));
    }

    #[test]
    fn long_single_row_field_shows_its_tail() {
        let area = Rect::new(0, 0, 10, 1);

        let view = layout_field("0123456789abcdefghijTAIL", area);

        assert_eq!(view.rows, vec!["TAIL"]);
        assert_eq!(view.cursor, Position::new(4, 0));
    }

    #[test]
    fn full_row_moves_the_cursor_to_a_fresh_row() {
        let view = layout_field("abcd", Rect::new(0, 0, 4, 2));

        assert_eq!(view.rows, vec!["abcd", ""]);
        assert_eq!(view.cursor, Position::new(0, 1));
    }

    #[test]
    fn rows_respect_display_width() {
        assert_eq!(wrap_rows("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_rows("ab\n\ncd", 4), vec!["ab", "", "cd"]);
        assert_eq!(wrap_rows("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn long_title_keeps_its_end_on_screen() {
        let title = format!("{}TAILEND", "x".repeat(73));

        let screen = render(&typed(&title, "body"));

        assert!(screen.contains("TAILEND"));
    }

    #[test]
    fn long_content_scrolls_to_the_last_line() {
        let mut content = String::from("FIRSTLINE");
        for i in 0..30 {
            content.push_str(&format!("\nline {i}"));
        }
        content.push_str("\nLASTLINE");

        let screen = render(&typed("Title", &content));

        assert!(screen.contains("LASTLINE"));
        assert!(!screen.contains("FIRSTLINE"));
        assert!(screen.contains("Title"));
    }

    #[test]
    fn centered_rect_fits_inside_the_frame() {
        let frame = Rect::new(0, 0, 80, 24);
        let area = centered(frame, 50, 5);

        assert_eq!(area.width, 50);
        assert_eq!(area.height, 5);
        assert_eq!(area.x, 15);
    }
}
