//! Placeholder shown in place of content: loading, error, or a note.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::components::spinner;

pub struct StatusPanel<'a> {
    block: Block<'a>,
    line: Line<'a>,
}

impl<'a> StatusPanel<'a> {
    pub fn loading(block: Block<'a>, spinner_frame: usize) -> Self {
        let line = Line::from(vec![
            Span::styled(spinner(spinner_frame), Style::default().fg(Color::Magenta)),
            Span::raw(" Loading..."),
        ]);
        Self { block, line }
    }

    pub fn error(block: Block<'a>, message: &'a str) -> Self {
        Self {
            block,
            line: Line::styled(message, Style::default().fg(Color::Red)),
        }
    }

    pub fn note(block: Block<'a>, message: &'a str) -> Self {
        Self {
            block,
            line: Line::styled(message, Style::default().fg(Color::DarkGray)),
        }
    }
}

impl Component for StatusPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(vec![Line::default(), self.line.clone()])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(self.block.clone());
        frame.render_widget(paragraph, area);
    }
}
