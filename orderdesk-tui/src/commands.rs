//! Command handlers behind the form's actions.
//!
//! Each handler runs one workflow operation against the store and turns
//! the outcome into UI feedback. None of them panic or propagate errors.

use tracing::info;

use orderdesk_core::store::row::order_to_cells;
use orderdesk_core::{create_order, execute_order, OrderKind, OrderStore};

use crate::app::{AppState, Overlay};

fn store_closed(app: &mut AppState) {
    app.overlay = Overlay::Alert {
        title: "Order store unavailable".into(),
        message: format!(
            "The order sheets in {} could not be opened. Press r to retry.",
            app.sheets.data_dir().display()
        ),
    };
}

/// Enter in the form: validate, append to pending, persist.
pub fn save_order(app: &mut AppState) {
    let input = app.form.to_input(&app.catalog);
    let Some(store) = app.store.as_mut() else {
        store_closed(app);
        return;
    };

    match create_order(store, &app.catalog, app.clock.as_ref(), &input) {
        Ok(order) => {
            app.form.clear_qty();
            app.pending_cursor = app.orders(OrderKind::Pending).len().saturating_sub(1);
            let cells = order_to_cells(&order);
            app.set_status(format!(
                "Saved {}: {} x {} = {}",
                order.order_id, cells[3], order.item, cells[5]
            ));
        }
        Err(e) => app.report(&e, "save order"),
    }
}

/// Enter / x in the pending table: move the selected order to executed.
pub fn execute_selected(app: &mut AppState) {
    let selection = app.selected_pending_id();
    let Some(store) = app.store.as_mut() else {
        store_closed(app);
        return;
    };

    match execute_order(store, selection.as_ref()) {
        Ok(order) => {
            app.clamp_cursors();
            app.executed_cursor = app.orders(OrderKind::Executed).len().saturating_sub(1);
            app.set_status(format!("Executed {}", order.order_id));
        }
        Err(e) => app.report(&e, "execute order"),
    }
}

/// (Re)open both sheets from disk. Failures leave the previous store, if
/// any, in place.
pub fn reload_store(app: &mut AppState) {
    match OrderStore::open(app.sheets.clone()) {
        Ok(store) => {
            let (pending, executed) = (store.pending().len(), store.executed().len());
            app.store = Some(store);
            app.clamp_cursors();
            if matches!(app.overlay, Overlay::Alert { .. }) {
                app.overlay = Overlay::None;
            }
            info!(pending, executed, "order sheets loaded");
            app.set_status(format!("Loaded {pending} pending, {executed} executed"));
        }
        Err(e) => app.report(&e, "open order sheets"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::app::{ErrorCategory, FormField, StatusLevel};
    use orderdesk_core::{Catalog, FixedClock, OrderId, SheetStore, StoreFormat};
    use rust_decimal::Decimal;

    fn fill_corn(app: &mut AppState) {
        let catalog = app.catalog.clone();
        app.form.cycle_party(&catalog, true);
        app.form.cycle_item(&catalog, true);
        app.form.field = FormField::Qty;
        app.form.push_char('3');
    }

    #[test]
    fn save_then_execute() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        fill_corn(&mut app);

        save_order(&mut app);
        let pending = app.orders(OrderKind::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].order_id, OrderId::new("ORD1"));
        assert_eq!(pending[0].total, Some(Decimal::from(15)));
        assert!(app.form.qty.is_empty());
        assert_eq!(app.form.party(&app.catalog), Some("Aman Traders"));
        assert_eq!(
            app.status_message.as_ref().map(|(_, l)| *l),
            Some(StatusLevel::Info)
        );

        execute_selected(&mut app);
        assert!(app.orders(OrderKind::Pending).is_empty());
        assert_eq!(app.orders(OrderKind::Executed).len(), 1);
        assert_eq!(app.status_message.as_ref().unwrap().0, "Executed ORD1");
    }

    #[test]
    fn invalid_form_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.form.field = FormField::Qty;
        app.form.push_char('3');

        save_order(&mut app);
        assert!(app.orders(OrderKind::Pending).is_empty());
        assert_eq!(app.form.qty, "3");
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);
        assert_eq!(
            app.status_message,
            Some((
                "Please enter valid order details".into(),
                StatusLevel::Error
            ))
        );
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn execute_with_empty_table_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        execute_selected(&mut app);
        assert_eq!(
            app.status_message,
            Some(("Please select a pending order".into(), StatusLevel::Warning))
        );
    }

    #[test]
    fn reload_failure_opens_alert_and_retry_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let sheets = SheetStore::new(dir.path(), StoreFormat::Csv);
        std::fs::write(sheets.path(OrderKind::Pending), "garbage\n").unwrap();
        let mut app = AppState::new(
            Catalog::builtin(),
            sheets.clone(),
            Box::new(FixedClock(chrono::NaiveDateTime::default())),
        );

        reload_store(&mut app);
        assert!(app.store.is_none());
        assert!(matches!(app.overlay, Overlay::Alert { .. }));

        // Saving without a store explains instead of failing silently.
        save_order(&mut app);
        assert!(matches!(app.overlay, Overlay::Alert { .. }));

        std::fs::remove_file(sheets.path(OrderKind::Pending)).unwrap();
        reload_store(&mut app);
        assert!(app.store.is_some());
        assert_eq!(app.overlay, Overlay::None);
    }
}
