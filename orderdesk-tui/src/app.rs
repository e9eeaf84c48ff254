//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The order store is the only thing that touches
//! disk; the UI reads its collections and writes through `commands`.

use std::collections::VecDeque;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{
    line_total, Catalog, Clock, DeskError, Order, OrderId, OrderInput, OrderKind, OrderStore,
    Severity, SheetStore,
};

/// Error history is capped at this many entries.
pub const ERROR_HISTORY_CAP: usize = 50;

/// Which area has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    Form,
    Pending,
    Executed,
}

impl Focus {
    const COUNT: usize = 3;

    pub fn index(self) -> usize {
        match self {
            Focus::Form => 0,
            Focus::Pending => 1,
            Focus::Executed => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Focus::Form),
            1 => Some(Focus::Pending),
            2 => Some(Focus::Executed),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Focus::Form => "New Order",
            Focus::Pending => "Pending Orders",
            Focus::Executed => "Executed Orders",
        }
    }

    pub fn next(self) -> Focus {
        Focus::from_index((self.index() + 1) % Self::COUNT).unwrap_or(Focus::Form)
    }

    pub fn prev(self) -> Focus {
        Focus::from_index((self.index() + Self::COUNT - 1) % Self::COUNT).unwrap_or(Focus::Form)
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Selection,
    Store,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Selection => "SEL",
            ErrorCategory::Store => "STORE",
        }
    }
}

impl From<Severity> for ErrorCategory {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Input => ErrorCategory::Input,
            Severity::Warning => ErrorCategory::Selection,
            Severity::Fatal => ErrorCategory::Store,
        }
    }
}

/// Entry form field with the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Party,
    Item,
    Qty,
    Price,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Party,
        FormField::Item,
        FormField::Qty,
        FormField::Price,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Party => "Party",
            FormField::Item => "Item",
            FormField::Qty => "Qty",
            FormField::Price => "Price",
        }
    }

    pub fn next(self) -> FormField {
        match self {
            FormField::Party => FormField::Item,
            FormField::Item => FormField::Qty,
            FormField::Qty => FormField::Price,
            FormField::Price => FormField::Party,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Party => FormField::Price,
            FormField::Item => FormField::Party,
            FormField::Qty => FormField::Item,
            FormField::Price => FormField::Qty,
        }
    }

    /// Free-text fields accept typed characters; the others are pick lists.
    pub fn is_text(self) -> bool {
        matches!(self, FormField::Qty | FormField::Price)
    }
}

/// Entry form state. Party and item start unselected.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub party_idx: Option<usize>,
    pub item_idx: Option<usize>,
    pub qty: String,
    pub price: String,
    pub field: FormField,
}

impl EntryForm {
    pub fn party<'a>(&self, catalog: &'a Catalog) -> Option<&'a str> {
        self.party_idx
            .and_then(|i| catalog.parties.get(i))
            .map(String::as_str)
    }

    pub fn item<'a>(&self, catalog: &'a Catalog) -> Option<&'a str> {
        self.item_idx
            .and_then(|i| catalog.items.get(i))
            .map(|item| item.name.as_str())
    }

    pub fn cycle_party(&mut self, catalog: &Catalog, forward: bool) {
        self.party_idx = cycle(self.party_idx, catalog.parties.len(), forward);
    }

    /// Picking an item fills the price field with its catalog price.
    pub fn cycle_item(&mut self, catalog: &Catalog, forward: bool) {
        self.item_idx = cycle(self.item_idx, catalog.items.len(), forward);
        self.fill_price(catalog);
    }

    pub fn select_item(&mut self, catalog: &Catalog, idx: usize) {
        if idx < catalog.items.len() {
            self.item_idx = Some(idx);
            self.fill_price(catalog);
        }
    }

    fn fill_price(&mut self, catalog: &Catalog) {
        if let Some(item) = self.item_idx.and_then(|i| catalog.items.get(i)) {
            self.price = item.price.normalize().to_string();
        }
    }

    /// Append a typed character to the active text field.
    pub fn push_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.') {
            return;
        }
        match self.field {
            FormField::Qty => self.qty.push(c),
            FormField::Price => self.price.push(c),
            FormField::Party | FormField::Item => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.field {
            FormField::Qty => {
                self.qty.pop();
            }
            FormField::Price => {
                self.price.pop();
            }
            FormField::Party | FormField::Item => {}
        }
    }

    pub fn to_input(&self, catalog: &Catalog) -> OrderInput {
        let input = OrderInput::new(
            self.party(catalog).unwrap_or_default(),
            self.item(catalog).unwrap_or_default(),
            self.qty.clone(),
        );
        input.with_price(self.price.clone())
    }

    /// Live `qty * price` preview, when both fields currently parse.
    pub fn preview_total(&self) -> Option<Decimal> {
        let qty: u32 = self.qty.trim().parse().ok().filter(|q| *q > 0)?;
        let price = Decimal::from_str(self.price.trim()).ok()?;
        line_total(qty, price)
    }

    /// After a successful save only the quantity is cleared.
    pub fn clear_qty(&mut self) {
        self.qty.clear();
        self.field = FormField::Qty;
    }
}

fn cycle(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
    Alert { title: String, message: String },
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub focus: Focus,
    pub running: bool,

    // Orders
    pub catalog: Catalog,
    pub sheets: SheetStore,
    /// `None` until the store opens successfully.
    pub store: Option<OrderStore>,
    pub clock: Box<dyn Clock>,

    // Widgets
    pub form: EntryForm,
    pub pending_cursor: usize,
    pub executed_cursor: usize,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub welcome_dismissed: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, sheets: SheetStore, clock: Box<dyn Clock>) -> Self {
        Self {
            focus: Focus::Form,
            running: true,
            catalog,
            sheets,
            store: None,
            clock,
            form: EntryForm::default(),
            pending_cursor: 0,
            executed_cursor: 0,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            welcome_dismissed: false,
        }
    }

    pub fn orders(&self, kind: OrderKind) -> &[Order] {
        self.store.as_ref().map(|s| s.orders(kind)).unwrap_or(&[])
    }

    pub fn cursor(&self, kind: OrderKind) -> usize {
        match kind {
            OrderKind::Pending => self.pending_cursor,
            OrderKind::Executed => self.executed_cursor,
        }
    }

    pub fn move_cursor(&mut self, kind: OrderKind, down: bool) {
        let len = self.orders(kind).len();
        let cursor = match kind {
            OrderKind::Pending => &mut self.pending_cursor,
            OrderKind::Executed => &mut self.executed_cursor,
        };
        if down {
            if *cursor + 1 < len {
                *cursor += 1;
            }
        } else {
            *cursor = cursor.saturating_sub(1);
        }
    }

    /// Keep both cursors inside their tables after the collections change.
    pub fn clamp_cursors(&mut self) {
        let pending = self.orders(OrderKind::Pending).len();
        let executed = self.orders(OrderKind::Executed).len();
        self.pending_cursor = self.pending_cursor.min(pending.saturating_sub(1));
        self.executed_cursor = self.executed_cursor.min(executed.saturating_sub(1));
    }

    /// Id under the pending-table cursor, if the table has any rows.
    pub fn selected_pending_id(&self) -> Option<OrderId> {
        self.orders(OrderKind::Pending)
            .get(self.pending_cursor)
            .map(|o| o.order_id.clone())
    }

    /// Push an error to the history, capping at [`ERROR_HISTORY_CAP`].
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Route a workflow error to the status bar, history and (for store
    /// failures) a modal alert.
    pub fn report(&mut self, err: &DeskError, context: &str) {
        let severity = err.severity();
        let message = err.to_string();
        self.push_error(severity.into(), message.clone(), context.to_string());
        match severity {
            Severity::Input => {}
            Severity::Warning => self.set_warning(message),
            Severity::Fatal => {
                self.overlay = Overlay::Alert {
                    title: "Order store error".into(),
                    message,
                };
            }
        }
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
