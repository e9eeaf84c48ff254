//! Keyboard input dispatch: overlays → global keys → focus-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use orderdesk_core::OrderKind;

use crate::app::{AppState, Focus, FormField, Overlay};
use crate::commands;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            app.welcome_dismissed = true;
            return;
        }
        Overlay::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::Alert { .. } => {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => app.overlay = Overlay::None,
                KeyCode::Char('r') => commands::reload_store(app),
                _ => {}
            }
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('r') => {
            commands::reload_store(app);
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus = app.focus.prev();
            } else {
                app.focus = app.focus.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    // 3. Focus-specific keys.
    match app.focus {
        Focus::Form => handle_form_key(app, key),
        Focus::Pending => handle_pending_key(app, key),
        Focus::Executed => handle_executed_key(app, key),
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut AppState, key: KeyEvent) {
    let catalog = &app.catalog;
    let form = &mut app.form;
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => form.field = form.field.next(),
        KeyCode::Char('k') | KeyCode::Up => form.field = form.field.prev(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
            let forward = matches!(key.code, KeyCode::Char('l') | KeyCode::Right);
            match form.field {
                FormField::Party => form.cycle_party(catalog, forward),
                FormField::Item => form.cycle_item(catalog, forward),
                FormField::Qty | FormField::Price => {}
            }
        }
        KeyCode::Char(c) => form.push_char(c),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter => commands::save_order(app),
        _ => {}
    }
}

fn handle_pending_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(OrderKind::Pending, true),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(OrderKind::Pending, false),
        KeyCode::Enter | KeyCode::Char('x') => commands::execute_selected(app),
        _ => {}
    }
}

fn handle_executed_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(OrderKind::Executed, true),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(OrderKind::Executed, false),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::KeyEventState;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_keys(app: &mut AppState, keys: &[KeyCode]) {
        for code in keys {
            handle_key(app, press(*code));
        }
    }

    #[test]
    fn full_keyboard_flow() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());

        // Party: Aman Traders, Item: KURKURE, Qty: 2
        type_keys(
            &mut app,
            &[
                KeyCode::Char('l'),
                KeyCode::Char('j'),
                KeyCode::Char('l'),
                KeyCode::Char('l'),
                KeyCode::Char('j'),
                KeyCode::Char('2'),
                KeyCode::Enter,
            ],
        );
        let pending = app.orders(OrderKind::Pending);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].item, "KURKURE");
        assert_eq!(pending[0].total, Some(Decimal::from(40)));

        type_keys(&mut app, &[KeyCode::Tab, KeyCode::Char('x')]);
        assert!(app.orders(OrderKind::Pending).is_empty());
        assert_eq!(app.orders(OrderKind::Executed).len(), 1);
    }

    #[test]
    fn welcome_swallows_first_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.overlay = Overlay::Welcome;

        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(app.running);
        assert!(app.welcome_dismissed);
        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn ctrl_c_quits_from_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        app.overlay = Overlay::Help;

        let mut key = press(KeyCode::Char('c'));
        key.modifiers = KeyModifiers::CONTROL;
        handle_key(&mut app, key);
        assert!(!app.running);
    }

    #[test]
    fn tab_cycles_focus() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        type_keys(&mut app, &[KeyCode::Tab, KeyCode::Tab]);
        assert_eq!(app.focus, Focus::Executed);
        type_keys(&mut app, &[KeyCode::BackTab]);
        assert_eq!(app.focus, Focus::Pending);
    }

    #[test]
    fn release_events_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    fn arb_key() -> impl Strategy<Value = KeyCode> {
        prop_oneof![
            Just(KeyCode::Tab),
            Just(KeyCode::BackTab),
            Just(KeyCode::Enter),
            Just(KeyCode::Backspace),
            Just(KeyCode::Esc),
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Left),
            Just(KeyCode::Right),
            prop::sample::select(vec!['j', 'k', 'h', 'l', 'x', 'e', '?', '.', '0', '1', '7'])
                .prop_map(KeyCode::Char),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Arbitrary key sequences keep cursors in range and every order
        /// in exactly one table.
        #[test]
        fn random_keys_keep_state_consistent(keys in prop::collection::vec(arb_key(), 1..60)) {
            let dir = tempfile::tempdir().unwrap();
            let mut app = test_app(dir.path());
            type_keys(&mut app, &keys);

            let pending = app.orders(OrderKind::Pending).len();
            let executed = app.orders(OrderKind::Executed).len();
            prop_assert!(pending == 0 || app.pending_cursor < pending);
            prop_assert!(executed == 0 || app.executed_cursor < executed);
            prop_assert!(app.running);
            for order in app.orders(OrderKind::Executed) {
                prop_assert!(!app
                    .orders(OrderKind::Pending)
                    .iter()
                    .any(|o| o.order_id == order.order_id));
            }
        }
    }

    #[test]
    fn error_overlay_opens_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path());
        type_keys(&mut app, &[KeyCode::Char('e')]);
        assert_eq!(app.overlay, Overlay::ErrorHistory);
        type_keys(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.overlay, Overlay::None);
    }
}
