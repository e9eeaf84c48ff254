//! Pending and executed order tables.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use orderdesk_core::store::row::order_to_cells;
use orderdesk_core::{Order, OrderKind};

use crate::app::{AppState, Focus};
use crate::theme;

const HEADER: [&str; 8] = [
    "Order Id", "Party", "Item", "Qty", "Price", "Total", "Date", "Time",
];

const WIDTHS: [Constraint; 8] = [
    Constraint::Length(8),
    Constraint::Min(12),
    Constraint::Length(10),
    Constraint::Length(5),
    Constraint::Length(7),
    Constraint::Length(9),
    Constraint::Length(10),
    Constraint::Length(8),
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState, kind: OrderKind) {
    let focus = match kind {
        OrderKind::Pending => Focus::Pending,
        OrderKind::Executed => Focus::Executed,
    };
    let focused = app.focus == focus;
    let orders = app.orders(kind);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(focused))
        .title(format!(" {} ({}) ", focus.label(), orders.len()))
        .title_style(theme::panel_title(focused));

    if orders.is_empty() {
        let hint = match kind {
            OrderKind::Pending => "No pending orders. Fill in the form and press Enter.",
            OrderKind::Executed => "No executed orders yet.",
        };
        let para = Paragraph::new(Line::styled(hint, theme::muted())).block(block);
        f.render_widget(para, area);
        return;
    }

    // Border (2) + header (1).
    let visible = area.height.saturating_sub(3).max(1) as usize;
    let cursor = app.cursor(kind).min(orders.len() - 1);
    let start = cursor.saturating_sub(visible - 1);
    let end = (start + visible).min(orders.len());

    let rows = orders[start..end].iter().enumerate().map(|(i, order)| {
        let style = if focused && start + i == cursor {
            theme::selected()
        } else {
            theme::text()
        };
        Row::new(cells(order)).style(style)
    });

    let header = Row::new(HEADER.map(Cell::from)).style(theme::accent_bold());
    let table = Table::new(rows, WIDTHS).header(header).block(block);
    f.render_widget(table, area);
}

/// Same text as the sheet cells, so blanks loaded from disk stay blank.
fn cells(order: &Order) -> Vec<Cell<'static>> {
    order_to_cells(order).into_iter().map(Cell::from).collect()
}
