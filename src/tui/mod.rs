//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the current
//! page, and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a fetch or mutation in flight): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on input, on a hook state
//!   change, or on a background action.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{self, NewBlog};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::page::Page;
use crate::core::state::App;
use crate::fetch::{HttpClient, ReqwestClient};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AddressBarState, AddressEvent, BlogDetailsState, BlogFormState, BlogListState, FormEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub blog_list: BlogListState,
    pub details: BlogDetailsState,
    pub form: BlogFormState,
    // Go-to-path overlay (None = hidden)
    pub address_bar: Option<AddressBarState>,
}

impl TuiState {
    pub fn new(authors: Vec<String>) -> Self {
        Self {
            blog_list: BlogListState::new(),
            details: BlogDetailsState::new(),
            form: BlogFormState::new(authors),
            address_bar: None,
        }
    }

    /// Fresh presentation state for a page that was just mounted.
    pub fn on_mount(&mut self, page: Page) {
        match page {
            Page::Home => self.blog_list.reset(),
            Page::BlogDetails => self.details.reset(),
            Page::Create => self.form.reset(),
            Page::NotFound => {}
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let reqwest_client = ReqwestClient::new(config.base_url.clone());
    info!("Using {} at {}", reqwest_client.name(), reqwest_client.base_url());
    let client: Arc<dyn HttpClient> = Arc::new(reqwest_client);

    let mut app = App::from_config(client, &config);
    let mut tui = TuiState::new(app.authors.clone());
    app.mount();
    tui.on_mount(app.page());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let animating = app.is_busy();
        if animating || app.fetch_state_changed() {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, event)
                && apply(&mut app, &mut tui, action, &tx)
            {
                break 'main;
            }
        }

        // Handle background task actions (create/delete results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply(&mut app, &mut tui, action, &tx) {
                break 'main;
            }
        }
    }

    app.unmount();
    ratatui::restore();
    Ok(())
}

/// Translates a terminal event into an action for the visible page.
/// Presentation-only events (selection, scrolling, typing) are handled
/// in place and yield `None`.
fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    // Ctrl+C always quits
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    // Resize just needs a redraw
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    // When the address bar is open, route all events to it
    if let Some(address_bar) = tui.address_bar.as_mut() {
        let address_event = address_bar.handle_event(&event)?;
        tui.address_bar = None;
        return match address_event {
            AddressEvent::Go(path) => Some(Action::Navigate(path)),
            AddressEvent::Dismiss => None,
        };
    }

    match app.page() {
        Page::Home => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('n') => Some(Action::Navigate("/create".to_string())),
            TuiEvent::InputChar('r') => Some(Action::Refresh),
            TuiEvent::InputChar('g') => open_address_bar(app, tui),
            TuiEvent::Submit => {
                let blogs = app.blogs.borrow();
                let blog = tui
                    .blog_list
                    .selected_blog(blogs.data.as_deref().unwrap_or_default())?;
                Some(Action::Navigate(api::blog_locator(&blog.id)))
            }
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                let len = app.blogs.borrow().data.as_ref().map_or(0, Vec::len);
                tui.blog_list.handle_event(&event, len);
                None
            }
            _ => None,
        },
        Page::BlogDetails => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('h') => Some(Action::Navigate("/".to_string())),
            TuiEvent::InputChar('n') => Some(Action::Navigate("/create".to_string())),
            TuiEvent::InputChar('r') => Some(Action::Refresh),
            TuiEvent::InputChar('g') => open_address_bar(app, tui),
            TuiEvent::InputChar('d') => {
                // Only a loaded blog can be deleted
                app.blog.borrow().data.as_ref()?;
                app.location
                    .blog_id()
                    .map(|id| Action::DeleteBlog(id.to_string()))
            }
            TuiEvent::Escape | TuiEvent::Backspace => Some(back_or_home(app)),
            _ => {
                tui.details.scroll(&event);
                None
            }
        },
        Page::Create => match tui.form.handle_event(&event)? {
            FormEvent::Submit(blog) => Some(Action::SubmitBlog(blog)),
            FormEvent::Cancel => Some(back_or_home(app)),
        },
        Page::NotFound => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('h') | TuiEvent::Submit => Some(Action::Navigate("/".to_string())),
            TuiEvent::InputChar('g') => open_address_bar(app, tui),
            TuiEvent::Escape => Some(back_or_home(app)),
            _ => None,
        },
    }
}

fn open_address_bar(app: &App, tui: &mut TuiState) -> Option<Action> {
    tui.address_bar = Some(AddressBarState::new(&app.location.path));
    None
}

fn back_or_home(app: &App) -> Action {
    if app.history.is_empty() {
        Action::Navigate("/".to_string())
    } else {
        Action::Back
    }
}

/// Runs an action through `update()` and performs the resulting effect.
/// Returns true when the app should exit.
fn apply(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => {}
        Effect::Quit => return true,
        Effect::Mount => {
            app.mount();
            tui.on_mount(app.page());
        }
        Effect::CreateBlog(blog) => spawn_create(app.client.clone(), blog, tx.clone()),
        Effect::DeleteBlog(id) => spawn_delete(app.client.clone(), id, tx.clone()),
    }
    false
}

fn spawn_create(client: Arc<dyn HttpClient>, blog: NewBlog, tx: mpsc::Sender<Action>) {
    info!("Spawning create for {:?}", blog.title);
    tokio::spawn(async move {
        let result = api::create_blog(&*client, &blog)
            .await
            .map_err(|e| e.to_string());
        if tx.send(Action::BlogCreated(result)).is_err() {
            warn!("Failed to send create result: receiver dropped");
        }
    });
}

fn spawn_delete(client: Arc<dyn HttpClient>, id: String, tx: mpsc::Sender<Action>) {
    info!("Spawning delete for blog {}", id);
    tokio::spawn(async move {
        let result = api::delete_blog(&*client, &id)
            .await
            .map_err(|e| e.to_string());
        if tx.send(Action::BlogDeleted { id: id.clone(), result }).is_err() {
            warn!("Failed to send delete result for {}: receiver dropped", id);
        }
    });
}
