//! # Blog List Component
//!
//! The Home page: every blog's title and author, one selectable entry each.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `BlogListState` lives in `TuiState`
//! - `BlogList` is created each frame with borrowed state and the list's
//!   `FetchState`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::api::Blog;
use crate::fetch::{FetchState, FetchStatus};
use crate::tui::component::Component;
use crate::tui::components::{StatusPanel, truncate_to_width};
use crate::tui::event::TuiEvent;

#[derive(Default)]
pub struct BlogListState {
    pub list_state: ListState,
}

impl BlogListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.list_state = ListState::default();
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Moves the selection for Up/Down. Returns true if the event was used.
    pub fn handle_event(&mut self, event: &TuiEvent, len: usize) -> bool {
        if len == 0 {
            self.list_state.select(None);
            return matches!(event, TuiEvent::CursorUp | TuiEvent::CursorDown);
        }
        let current = self.list_state.selected();
        let next = match event {
            TuiEvent::CursorUp => current.map(|i| i.saturating_sub(1)).unwrap_or(len - 1),
            TuiEvent::CursorDown => current.map(|i| (i + 1).min(len - 1)).unwrap_or(0),
            _ => return false,
        };
        self.list_state.select(Some(next));
        true
    }

    /// The selected blog, if the list has loaded.
    pub fn selected_blog<'a>(&self, blogs: &'a [Blog]) -> Option<&'a Blog> {
        blogs.get(self.list_state.selected()?)
    }

    /// Keeps the selection inside a list that may have shrunk.
    fn clamp(&mut self, len: usize) {
        match (self.list_state.selected(), len) {
            (_, 0) => self.list_state.select(None),
            (None, _) => self.list_state.select(Some(0)),
            (Some(i), len) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

pub struct BlogList<'a> {
    state: &'a mut BlogListState,
    blogs: &'a FetchState<Vec<Blog>>,
    spinner_frame: usize,
}

impl<'a> BlogList<'a> {
    pub fn new(
        state: &'a mut BlogListState,
        blogs: &'a FetchState<Vec<Blog>>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            blogs,
            spinner_frame,
        }
    }
}

impl Component for BlogList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(" All Blogs ")
            .border_style(Style::default().fg(Color::DarkGray));

        let blogs = match self.blogs.status() {
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
            FetchStatus::Ready(blogs) if blogs.is_empty() => {
                StatusPanel::note(block, "No blogs yet. Press n to write one.")
                    .render(frame, area);
                return;
            }
            FetchStatus::Ready(blogs) => blogs,
        };

        self.state.clamp(blogs.len());
        let inner_width = area.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = blogs
            .iter()
            .map(|blog| {
                let title = Line::styled(
                    truncate_to_width(&blog.title, inner_width),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                );
                let author = Line::styled(
                    truncate_to_width(&format!("Written by {}", blog.author), inner_width),
                    Style::default().fg(Color::DarkGray),
                );
                ListItem::new(Text::from(vec![title, author, Line::default()]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_symbol("▌ ")
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn blogs() -> Vec<Blog> {
        vec![
            Blog {
                id: "1".to_string(),
                title: "My new website".to_string(),
                body: "lorem".to_string(),
                author: "mario".to_string(),
            },
            Blog {
                id: "2".to_string(),
                title: "Welcome party!".to_string(),
                body: "ipsum".to_string(),
                author: "yoshi".to_string(),
            },
        ]
    }

    fn render(state: &mut BlogListState, blogs: &FetchState<Vec<Blog>>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|f| BlogList::new(state, blogs, 0).render(f, f.area()))
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_renders_titles_and_authors() {
        let mut state = BlogListState::new();
        let text = render(&mut state, &FetchState::resolved(blogs()));
        assert!(text.contains("My new website"));
        assert!(text.contains("Written by yoshi"));
        // First entry is selected once data shows up
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_renders_loading() {
        let mut state = BlogListState::new();
        let text = render(&mut state, &FetchState::started());
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn test_renders_error() {
        let mut state = BlogListState::new();
        let text = render(
            &mut state,
            &FetchState::failed("could not fetch the data for that resource"),
        );
        assert!(text.contains("could not fetch the data"));
    }

    #[test]
    fn test_renders_empty_note() {
        let mut state = BlogListState::new();
        let text = render(&mut state, &FetchState::resolved(vec![]));
        assert!(text.contains("No blogs yet"));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_navigation_clamps() {
        let blogs = blogs();
        let mut state = BlogListState::new();

        assert!(state.handle_event(&TuiEvent::CursorDown, blogs.len()));
        assert_eq!(state.selected_blog(&blogs).map(|b| b.id.as_str()), Some("1"));
        state.handle_event(&TuiEvent::CursorDown, blogs.len());
        state.handle_event(&TuiEvent::CursorDown, blogs.len());
        assert_eq!(state.selected(), Some(1));
        state.handle_event(&TuiEvent::CursorUp, blogs.len());
        state.handle_event(&TuiEvent::CursorUp, blogs.len());
        assert_eq!(state.selected(), Some(0));
        assert!(!state.handle_event(&TuiEvent::Submit, blogs.len()));
    }

    #[test]
    fn test_up_from_nothing_selects_last() {
        let mut state = BlogListState::new();
        state.handle_event(&TuiEvent::CursorUp, 3);
        assert_eq!(state.selected(), Some(2));
    }
}
