//! Entry form: party and item pickers, quantity and price fields, live total.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus, FormField};
use crate::theme;

/// Four field rows, a spacer, the total row, and the border.
pub const HEIGHT: u16 = 8;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let focused = app.focus == Focus::Form;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ", Focus::Form.label()))
        .title_style(theme::panel_title(focused));

    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::ALL {
        let value = match field {
            FormField::Party => form.party(&app.catalog).unwrap_or("(choose)").to_string(),
            FormField::Item => form.item(&app.catalog).unwrap_or("(choose)").to_string(),
            FormField::Qty => form.qty.clone(),
            FormField::Price => form.price.clone(),
        };
        let active = focused && form.field == field;
        let display = match (field.is_text(), active) {
            (false, _) => format!("< {value} >"),
            (true, true) => format!("{value}_"),
            (true, false) => value,
        };
        let style = if active {
            theme::selected()
        } else if field.is_text() {
            theme::text()
        } else {
            theme::accent()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:>6}: ", field.label()), theme::muted()),
            Span::styled(display, style),
        ]));
    }

    lines.push(Line::from(""));

    let total = match form.preview_total() {
        Some(total) => Span::styled(total.normalize().to_string(), theme::positive()),
        None => Span::styled("-", theme::muted()),
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>6}: ", "Total"), theme::muted()),
        total,
        Span::styled(
            "    [j/k]field [h/l]choose [0-9.]type [Enter]save",
            theme::muted(),
        ),
    ]));

    let para = Paragraph::new(lines).block(block);
    f.render_widget(para, area);
}
