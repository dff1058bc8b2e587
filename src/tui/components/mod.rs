//! # TUI Components
//!
//! All UI components for the terminal interface. Each page of the router
//! has one component; the navbar and address bar wrap around them.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `Navbar`: brand, links, status and spinner
//! - `NotFound`: the catch-all page
//! - `StatusPanel`: loading / error / empty placeholder
//!
//! ### Stateful Components (persistent state + transient wrapper)
//!
//! The state struct lives in `TuiState`; the render wrapper is created each
//! frame with borrowed state and props:
//! - `BlogListState` / `BlogList`: Home
//! - `BlogDetailsState` / `BlogDetails`: a single post
//! - `BlogFormState` / `CreateForm`: New Blog
//! - `AddressBarState` / `AddressBar`: go-to-path prompt
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file, shared helpers)
//! ├── navbar.rs
//! ├── status_panel.rs
//! ├── blog_list.rs
//! ├── blog_details.rs
//! ├── create_form.rs
//! ├── not_found.rs
//! └── address_bar.rs
//! ```

pub mod address_bar;
pub mod blog_details;
pub mod blog_list;
pub mod create_form;
pub mod navbar;
pub mod not_found;
pub mod status_panel;

pub use address_bar::{AddressBar, AddressBarState, AddressEvent};
pub use blog_details::{BlogDetails, BlogDetailsState};
pub use blog_list::{BlogList, BlogListState};
pub use create_form::{BlogFormState, CreateForm, FormEvent};
pub use navbar::Navbar;
pub use not_found::NotFound;
pub use status_panel::StatusPanel;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame_index: usize) -> &'static str {
    SPINNER_FRAMES[frame_index % SPINNER_FRAMES.len()]
}

/// Truncate to `max_width` terminal columns, ending in "…" when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_untouched() {
        assert_eq!(truncate_to_width("Hello", 10), "Hello");
        assert_eq!(truncate_to_width("Hello", 5), "Hello");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("Hello world", 6), "Hello…");
        assert_eq!(truncate_to_width("Hello", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(truncate_to_width("日本語です", 5), "日本…");
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner(0), spinner(SPINNER_FRAMES.len()));
    }
}
