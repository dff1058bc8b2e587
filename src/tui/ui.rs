use crate::core::page::Page;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{AddressBar, BlogDetails, BlogList, CreateForm, Navbar, NotFound};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [nav_area, main_area, help_area] = layout.areas(frame.area());

    Navbar::new(
        app.page(),
        app.status_message.clone(),
        app.is_busy(),
        spinner_frame,
    )
    .render(frame, nav_area);

    draw_page(frame, main_area, app, tui, spinner_frame);

    frame.render_widget(
        Span::styled(help_text(app.page()), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlay last so it draws over the page
    if let Some(address_bar) = &tui.address_bar {
        AddressBar::new(address_bar).render(frame, frame.area());
    }
}

fn draw_page(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    match app.page() {
        Page::Home => {
            let blogs = app.blogs.borrow();
            BlogList::new(&mut tui.blog_list, &blogs, spinner_frame).render(frame, area);
        }
        Page::BlogDetails => {
            let blog = app.blog.borrow();
            BlogDetails::new(&mut tui.details, &blog, spinner_frame, app.is_submitting)
                .render(frame, area);
        }
        Page::Create => {
            CreateForm::new(
                &tui.form,
                app.is_submitting,
                app.submit_error.as_deref(),
                spinner_frame,
            )
            .render(frame, area);
        }
        Page::NotFound => NotFound::new(&app.location.path).render(frame, area),
    }
}

fn help_text(page: Page) -> &'static str {
    match page {
        Page::Home => " ↑↓ Select  Enter Open  n New  r Reload  g Go to  q Quit",
        Page::BlogDetails => " ↑↓ Scroll  d Delete  Esc Back  h Home  r Reload  g Go to  q Quit",
        Page::Create => " Tab Next field  ←→ Author  Enter Submit  Esc Cancel",
        Page::NotFound => " h Home  Esc Back  g Go to  q Quit",
    }
}
