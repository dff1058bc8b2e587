//! # Create Form Component
//!
//! The New Blog page: title, body, author picker, and an Add Blog button.
//!
//! ## Keys
//!
//! - Tab / BackTab, Up / Down: move focus
//! - Enter: next field (title), newline (body), submit (button)
//! - Left / Right: cycle authors
//! - Esc: leave the form
//!
//! The buffers live in `BlogFormState` (in `TuiState`); whether a submission
//! is in flight and its error come from `App` as props.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::api::NewBlog;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::spinner;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
    Author,
    Submit,
}

impl Field {
    fn next(self) -> Field {
        match self {
            Field::Title => Field::Body,
            Field::Body => Field::Author,
            Field::Author => Field::Submit,
            Field::Submit => Field::Title,
        }
    }

    fn prev(self) -> Field {
        match self {
            Field::Title => Field::Submit,
            Field::Body => Field::Title,
            Field::Author => Field::Body,
            Field::Submit => Field::Author,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit(NewBlog),
    Cancel,
}

pub struct BlogFormState {
    pub title: String,
    pub body: String,
    pub author_index: usize,
    pub focus: Field,
    authors: Vec<String>,
}

impl BlogFormState {
    pub fn new(authors: Vec<String>) -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            author_index: 0,
            focus: Field::Title,
            authors,
        }
    }

    pub fn reset(&mut self) {
        self.title.clear();
        self.body.clear();
        self.author_index = 0;
        self.focus = Field::Title;
    }

    pub fn author(&self) -> &str {
        self.authors
            .get(self.author_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn to_new_blog(&self) -> NewBlog {
        NewBlog {
            title: self.title.trim().to_string(),
            body: self.body.clone(),
            author: self.author().to_string(),
        }
    }

    fn cycle_author(&mut self, forward: bool) {
        let len = self.authors.len();
        if len == 0 {
            return;
        }
        self.author_index = if forward {
            (self.author_index + 1) % len
        } else {
            (self.author_index + len - 1) % len
        };
    }

    fn insert(&mut self, text: &str) {
        match self.focus {
            // Titles are single-line
            Field::Title => self.title.extend(text.chars().filter(|c| *c != '\n')),
            Field::Body => self.body.push_str(text),
            Field::Author | Field::Submit => {}
        }
    }
}

impl EventHandler for BlogFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Tab | TuiEvent::CursorDown => self.focus = self.focus.next(),
            TuiEvent::BackTab | TuiEvent::CursorUp => self.focus = self.focus.prev(),
            TuiEvent::Submit => match self.focus {
                Field::Title | Field::Author => self.focus = self.focus.next(),
                Field::Body => self.body.push('\n'),
                Field::Submit => return Some(FormEvent::Submit(self.to_new_blog())),
            },
            TuiEvent::InputChar(c) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf));
            }
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => match self.focus {
                Field::Title => {
                    self.title.pop();
                }
                Field::Body => {
                    self.body.pop();
                }
                Field::Author | Field::Submit => {}
            },
            TuiEvent::CursorLeft if self.focus == Field::Author => self.cycle_author(false),
            TuiEvent::CursorRight if self.focus == Field::Author => self.cycle_author(true),
            _ => {}
        }
        None
    }
}

pub struct CreateForm<'a> {
    state: &'a BlogFormState,
    is_submitting: bool,
    error: Option<&'a str>,
    spinner_frame: usize,
}

impl<'a> CreateForm<'a> {
    pub fn new(
        state: &'a BlogFormState,
        is_submitting: bool,
        error: Option<&'a str>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            is_submitting,
            error,
            spinner_frame,
        }
    }

    fn field_block(&self, title: &'static str, field: Field) -> Block<'static> {
        let style = if self.state.focus == field {
            Style::default().fg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Block::bordered()
            .title(title)
            .border_style(style)
            .title_style(style)
    }
}

impl Component for CreateForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [heading_area, title_area, body_area, author_area, button_area, error_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        frame.render_widget(
            Paragraph::new(Line::styled(
                "Add a New Blog",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
            heading_area,
        );

        frame.render_widget(
            Paragraph::new(self.state.title.as_str())
                .block(self.field_block(" Blog title ", Field::Title)),
            title_area,
        );

        frame.render_widget(
            Paragraph::new(self.state.body.as_str())
                .wrap(Wrap { trim: false })
                .block(self.field_block(" Blog body ", Field::Body)),
            body_area,
        );

        let author = Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.state.author().to_string()),
            Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(
            Paragraph::new(author).block(self.field_block(" Blog author ", Field::Author)),
            author_area,
        );

        let button = if self.is_submitting {
            format!("{} Adding blog...", spinner(self.spinner_frame))
        } else {
            "[ Add Blog ]".to_string()
        };
        let button_style = if self.state.focus == Field::Submit {
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(button, button_style)).centered(),
            button_area,
        );

        if let Some(error) = self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))).centered(),
                error_area,
            );
        }
    }
}
