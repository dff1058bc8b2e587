//! # Navbar Component
//!
//! Single-line bar at the top of every page: the brand on the left, links
//! to Home and New Blog on the right, status text in between.
//!
//! Stateless: every field is a prop, filled from `App` each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::page::Page;
use crate::tui::component::Component;
use crate::tui::components::spinner;

pub const BRAND: &str = "The Dojo Blog";

pub struct Navbar {
    pub active: Page,
    pub status_message: String,
    /// A request is in flight; show the spinner.
    pub busy: bool,
    pub spinner_frame: usize,
}

impl Navbar {
    pub fn new(active: Page, status_message: String, busy: bool, spinner_frame: usize) -> Self {
        Self {
            active,
            status_message,
            busy,
            spinner_frame,
        }
    }

    fn link(&self, page: Page) -> Span<'static> {
        let label = page.label();
        if self.active == page {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    }
}

impl Component for Navbar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [brand_area, status_area, links_area] = Layout::horizontal([
            Constraint::Length(BRAND.len() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(16),
        ])
        .areas(area);

        let brand = Span::styled(
            BRAND,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(brand, brand_area);

        let status = if self.busy {
            format!("{} {}", spinner(self.spinner_frame), self.status_message)
        } else {
            self.status_message.clone()
        };
        frame.render_widget(
            Span::styled(status, Style::default().fg(Color::DarkGray)),
            status_area,
        );

        let links = Line::from(vec![
            self.link(Page::Home),
            Span::raw("  "),
            self.link(Page::Create),
        ])
        .right_aligned();
        frame.render_widget(links, links_area);
    }
}
