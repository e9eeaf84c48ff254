//! Bottom status bar: focus hints, last status message.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = match app.focus {
        Focus::Form => " [Tab]tables [?]help [e]rrors [q]uit",
        Focus::Pending => " [j/k]select [Enter/x]execute [Tab]next [?]help [q]uit",
        Focus::Executed => " [j/k]scroll [Tab]form [?]help [q]uit",
    };
    spans.push(Span::styled(hints, theme::muted()));

    if app.store.is_none() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("store closed, [r] to retry", theme::negative()));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::positive(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
