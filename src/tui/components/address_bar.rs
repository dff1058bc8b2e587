//! # Address Bar Component
//!
//! A one-line prompt overlay (opened with `g`) for typing a path to visit,
//! e.g. `/blogs/3` or `/create`. Enter goes, Esc dismisses.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PROMPT: &str = "Go to: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressEvent {
    Go(String),
    Dismiss,
}

pub struct AddressBarState {
    pub buffer: String,
}

impl AddressBarState {
    /// Opens pre-filled with the current path.
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
        }
    }
}

impl EventHandler for AddressBarState {
    type Event = AddressEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<AddressEvent> {
        match event {
            TuiEvent::Escape => Some(AddressEvent::Dismiss),
            TuiEvent::Submit => {
                let path = self.buffer.trim();
                if path.is_empty() {
                    Some(AddressEvent::Dismiss)
                } else {
                    Some(AddressEvent::Go(path.to_string()))
                }
            }
            TuiEvent::InputChar(c) if *c != '\n' => {
                self.buffer.push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                self.buffer.extend(text.chars().filter(|c| !c.is_control()));
                None
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                None
            }
            _ => None,
        }
    }
}

pub struct AddressBar<'a> {
    state: &'a AddressBarState,
}

impl<'a> AddressBar<'a> {
    pub fn new(state: &'a AddressBarState) -> Self {
        Self { state }
    }

    /// Columns from the start of the line to the cursor, clamped to u16.
    fn cursor_offset(&self) -> u16 {
        u16::try_from(PROMPT.width() + self.state.buffer.width()).unwrap_or(u16::MAX)
    }
}

impl Component for AddressBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, bar_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Fill(2),
        ])
        .areas(area);
        let [_, bar_area, _] = Layout::horizontal([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ])
        .areas(bar_area);

        frame.render_widget(Clear, bar_area);

        let block = Block::bordered()
            .title(" Address ")
            .title_bottom(Line::from(" Enter Go  Esc Cancel ").centered())
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(bar_area);

        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::DarkGray)),
            Span::raw(self.state.buffer.as_str()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), bar_area);

        let cursor_x = inner.x.saturating_add(self.cursor_offset());
        if inner.width > 0 && cursor_x < inner.right() {
            frame.set_cursor_position(Position::new(cursor_x, inner.y));
        }
    }
}
