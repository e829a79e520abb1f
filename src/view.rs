//! Terminal rendering of a [`DocumentView`].

use crate::document::DocumentView;
use crate::prompt::FilenamePrompt;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const TAB_WIDTH: usize = 4;

/// First visible line of the text area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    top: usize,
}

impl Viewport {
    pub fn top(&self) -> usize {
        self.top
    }

    /// Scroll the minimum amount needed to show `line` in `height` rows
    pub fn scroll_to(&mut self, line: usize, height: usize) {
        if height == 0 {
            return;
        }
        if line < self.top {
            self.top = line;
        } else if line >= self.top + height {
            self.top = line + 1 - height;
        }
    }
}

/// Everything drawn in one frame
pub struct Screen<'a> {
    pub view: DocumentView<'a>,
    pub status_message: Option<&'a str>,
    pub prompt: Option<&'a FilenamePrompt>,
}

/// Expand tabs to spaces so the text occupies the cells the cursor math expects
fn display_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut width = 0;
    for grapheme in text.graphemes(true) {
        if grapheme == "\t" {
            let spaces = TAB_WIDTH - width % TAB_WIDTH;
            out.extend(std::iter::repeat(' ').take(spaces));
            width += spaces;
        } else {
            out.push_str(grapheme);
            width += grapheme.width();
        }
    }
    out
}

/// Screen column of grapheme `column` in `text`
fn display_column(text: &str, column: usize) -> usize {
    text.graphemes(true).take(column).fold(0, |width, grapheme| {
        if grapheme == "\t" {
            width + TAB_WIDTH - width % TAB_WIDTH
        } else {
            width + grapheme.width()
        }
    })
}

fn status_line(screen: &Screen<'_>) -> Line<'static> {
    let view = &screen.view;
    let name = view.file_name.as_deref().unwrap_or("[No Name]");
    let mut spans = vec![
        Span::styled(
            format!(" {} ", view.mode.label()),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(format!(" {name}")),
    ];
    if view.dirty {
        spans.push(Span::raw(" [+]"));
    }
    spans.push(Span::raw(format!(
        "  {}:{}",
        view.cursor.line + 1,
        view.cursor.column + 1
    )));
    if let Some(message) = screen.status_message {
        spans.push(Span::raw(format!("  {message}")));
    }
    Line::from(spans)
}

fn clamp_to(area: Rect, x: usize, y: usize) -> Position {
    let x = (area.x as usize + x).min(area.right().saturating_sub(1) as usize);
    let y = (area.y as usize + y).min(area.bottom().saturating_sub(1) as usize);
    Position::new(x as u16, y as u16)
}

/// Draw the text area and the status line, and place the terminal cursor
pub fn render(frame: &mut Frame, viewport: &mut Viewport, screen: &Screen<'_>) {
    let [text_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let view = &screen.view;
    let height = text_area.height as usize;
    viewport.scroll_to(view.cursor.line, height);

    let lines: Vec<Line> = view
        .lines_from(viewport.top())
        .take(height)
        .map(|text| Line::raw(display_text(text)))
        .collect();
    frame.render_widget(Paragraph::new(lines), text_area);

    if let Some(prompt) = screen.prompt {
        let text = format!("{}{}", prompt.label(), prompt.input());
        let x = text.width();
        frame.render_widget(Paragraph::new(text), status_area);
        frame.set_cursor_position(clamp_to(status_area, x, 0));
        return;
    }

    frame.render_widget(Paragraph::new(status_line(screen)), status_area);

    if height > 0 {
        let line_text = view
            .lines_from(view.cursor.line)
            .next()
            .unwrap_or_default();
        let x = display_column(line_text, view.cursor.column);
        let y = view.cursor.line - viewport.top();
        frame.set_cursor_position(clamp_to(text_area, x, y));
    }
}
