//! Top-level UI layout: entry form over the two order tables, status bar below.

pub mod entry_form;
pub mod orders_table;
pub mod overlays;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use orderdesk_core::OrderKind;

use crate::app::{AppState, Overlay};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(entry_form::HEIGHT),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let tables = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    entry_form::render(f, chunks[0], app);
    orders_table::render(f, tables[0], app, OrderKind::Pending);
    orders_table::render(f, tables[1], app, OrderKind::Executed);
    status_bar::render(f, chunks[2], app);

    let main_area = Rect {
        height: chunks[0].height + chunks[1].height,
        ..f.area()
    };
    match &app.overlay {
        Overlay::Welcome => overlays::render_welcome(f, main_area),
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::Alert { title, message } => overlays::render_alert(f, main_area, title, message),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::commands;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(app: &AppState) -> String {
        let backend = TestBackend::new(200, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_form_and_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        let screen = render_to_string(&app);

        assert!(screen.contains("New Order"));
        assert!(screen.contains("Pending Orders (0)"));
        assert!(screen.contains("Executed Orders (0)"));
        assert!(screen.contains("No pending orders"));
    }

    #[test]
    fn saved_order_appears_in_pending_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let catalog = app.catalog.clone();
        app.form.cycle_party(&catalog, true);
        app.form.cycle_item(&catalog, true);
        app.form.qty = "3".into();
        commands::save_order(&mut app);

        let screen = render_to_string(&app);
        assert!(screen.contains("Pending Orders (1)"));
        assert!(screen.contains("Order Id"));
        assert!(screen.contains("ORD1"));
        assert!(screen.contains("Saved ORD1"));
    }

    #[test]
    fn alert_overlay_renders_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.overlay = Overlay::Alert {
            title: "Order store error".into(),
            message: "disk full".into(),
        };
        let screen = render_to_string(&app);
        assert!(screen.contains("Order store error"));
        assert!(screen.contains("disk full"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.overlay = Overlay::Help;
        let backend = TestBackend::new(20, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
