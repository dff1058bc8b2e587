//! # Not Found Component
//!
//! Rendered for any path the router has no page for.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub struct NotFound<'a> {
    pub path: &'a str,
}

impl<'a> NotFound<'a> {
    pub fn new(path: &'a str) -> Self {
        Self { path }
    }
}

impl Component for NotFound<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, content_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(5),
            Constraint::Fill(1),
        ])
        .areas(area);

        let lines = vec![
            Line::styled(
                "Sorry",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::raw("That page cannot be found"),
            Line::styled(self.path.to_string(), Style::default().fg(Color::DarkGray)),
            Line::raw(""),
            Line::styled(
                "Press h to go back to the homepage",
                Style::default().fg(Color::Gray),
            ),
        ];
        frame.render_widget(Paragraph::new(lines).centered(), content_area);
    }
}
