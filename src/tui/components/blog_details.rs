//! # Blog Details Component
//!
//! A single post: title, author, and a scrollable body.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Blog;
use crate::fetch::{FetchState, FetchStatus};
use crate::tui::component::Component;
use crate::tui::components::{StatusPanel, spinner};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct BlogDetailsState {
    pub scroll_state: ScrollViewState,
}

impl BlogDetailsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    /// Scrolls the body. Returns true if the event was used.
    pub fn scroll(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::CursorUp => self.scroll_state.scroll_up(),
            TuiEvent::CursorDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return false,
        }
        true
    }
}

pub struct BlogDetails<'a> {
    state: &'a mut BlogDetailsState,
    blog: &'a FetchState<Blog>,
    spinner_frame: usize,
    /// A delete request for this blog is in flight.
    deleting: bool,
}

impl<'a> BlogDetails<'a> {
    pub fn new(
        state: &'a mut BlogDetailsState,
        blog: &'a FetchState<Blog>,
        spinner_frame: usize,
        deleting: bool,
    ) -> Self {
        Self {
            state,
            blog,
            spinner_frame,
            deleting,
        }
    }
}

/// Wraps the body to `width` columns, keeping blank lines between paragraphs.
fn body_lines(body: &str, width: u16) -> Vec<Line<'static>> {
    if width == 0 {
        return Vec::new();
    }
    body.lines()
        .flat_map(|paragraph| {
            if paragraph.trim().is_empty() {
                vec![Line::default()]
            } else {
                textwrap::wrap(paragraph, width as usize)
                    .into_iter()
                    .map(|line| Line::raw(line.into_owned()))
                    .collect()
            }
        })
        .collect()
}

/// Line count as a scroll height; bodies past u16::MAX lines are cut off.
fn content_height(lines: &[Line]) -> u16 {
    u16::try_from(lines.len()).unwrap_or(u16::MAX)
}

impl Component for BlogDetails<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().border_style(Style::default().fg(Color::DarkGray));

        let blog = match self.blog.status() {
            FetchStatus::Pending => {
                StatusPanel::loading(block, self.spinner_frame).render(frame, area);
                return;
            }
            FetchStatus::Failed(message) => {
                StatusPanel::error(block, message).render(frame, area);
                return;
            }
            FetchStatus::Idle => {
                StatusPanel::note(block, "Nothing loaded. Press r to retry.").render(frame, area);
                return;
            }
            FetchStatus::Ready(blog) => blog,
        };

        let footer = if self.deleting {
            Line::from(format!(" {} Deleting... ", spinner(self.spinner_frame)))
        } else {
            Line::from(" d Delete  Esc Back ")
        };
        let block = block.title_bottom(footer.centered());

        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let header = Paragraph::new(vec![
            Line::styled(
                format!(" {}", blog.title),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                format!(" Written by {}", blog.author),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(header, header_area);

        let inner = block.inner(body_area);
        frame.render_widget(block, body_area);

        // Leave one column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = body_lines(&blog.body, content_width);
        let height = content_height(&lines);

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines),
            Rect::new(0, 0, content_width, height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
