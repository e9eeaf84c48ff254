//! In-memory owner of the pending and executed collections.
//!
//! Mutations build the new collection first, persist it, and only then swap
//! it in, so a failed save leaves memory exactly as it was.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::domain::{Order, OrderId, OrderKind};
use crate::error::DeskError;

use super::counter::{self, OrderSequence};
use super::journal::{self, ExecuteJournal};
use super::SheetStore;

#[derive(Debug)]
pub struct OrderStore {
    sheets: SheetStore,
    pending: Vec<Order>,
    executed: Vec<Order>,
    next_seq: u64,
}

impl OrderStore {
    /// Load both collections, roll forward an interrupted execute, and
    /// reconcile the id counter.
    pub fn open(sheets: SheetStore) -> Result<Self, DeskError> {
        let mut pending = sheets.load(OrderKind::Pending)?;
        let mut executed = sheets.load(OrderKind::Executed)?;

        let journal_path = sheets.journal_path();
        if let Some(entry) = journal::read(&journal_path)? {
            roll_forward(&sheets, &entry, &mut pending, &mut executed)?;
            if let Err(e) = journal::clear(&journal_path) {
                warn!(error = %e, "failed to remove execute journal after recovery");
            }
        }

        warn_on_duplicates(&pending, &executed);

        let persisted = counter::load(&sheets.counter_path());
        let next_seq = counter::reconcile(persisted.next_seq, pending.iter().chain(&executed));

        info!(
            pending = pending.len(),
            executed = executed.len(),
            next_seq,
            "order store opened"
        );

        Ok(Self {
            sheets,
            pending,
            executed,
            next_seq,
        })
    }

    pub fn sheets(&self) -> &SheetStore {
        &self.sheets
    }

    pub fn pending(&self) -> &[Order] {
        &self.pending
    }

    pub fn executed(&self) -> &[Order] {
        &self.executed
    }

    pub fn orders(&self, kind: OrderKind) -> &[Order] {
        match kind {
            OrderKind::Pending => &self.pending,
            OrderKind::Executed => &self.executed,
        }
    }

    pub fn find_pending(&self, id: &OrderId) -> Option<&Order> {
        self.pending.iter().find(|o| &o.order_id == id)
    }

    /// Id the next created order will receive. Not reserved until that
    /// order is saved.
    pub fn next_order_id(&self) -> OrderId {
        OrderId::from_seq(self.next_seq)
    }

    /// Append `order` to Pending and persist Pending.
    pub fn append_pending(&mut self, order: Order) -> Result<(), DeskError> {
        let mut pending = self.pending.clone();
        let seq = order.order_id.seq();
        pending.push(order);

        self.sheets.save(OrderKind::Pending, &pending)?;
        self.pending = pending;

        if let Some(seq) = seq {
            self.advance_counter(seq.saturating_add(1));
        }
        Ok(())
    }

    /// Move the pending order `id` to Executed and persist both sheets.
    pub fn move_to_executed(&mut self, id: &OrderId) -> Result<Order, DeskError> {
        let idx = self
            .pending
            .iter()
            .position(|o| &o.order_id == id)
            .ok_or_else(|| DeskError::OrderNotFound(id.clone()))?;

        let mut pending = self.pending.clone();
        let order = pending.remove(idx);
        let mut executed = self.executed.clone();
        executed.push(order.clone());

        let journal_path = self.sheets.journal_path();
        journal::write(&journal_path, &ExecuteJournal::new(order.clone()))?;

        if let Err(e) = self.sheets.save(OrderKind::Executed, &executed) {
            // Executed sheet untouched on disk: the move never happened.
            self.discard_journal();
            return Err(e);
        }

        if let Err(e) = self.sheets.save(OrderKind::Pending, &pending) {
            // Undo the executed write so disk matches memory again. If that
            // fails too, the journal stays and the next open rolls forward.
            match self.sheets.save(OrderKind::Executed, &self.executed) {
                Ok(()) => self.discard_journal(),
                Err(rollback) => warn!(
                    order_id = %order.order_id,
                    error = %rollback,
                    "rollback of executed sheet failed; journal kept for recovery"
                ),
            }
            return Err(e);
        }

        self.discard_journal();
        self.pending = pending;
        self.executed = executed;
        Ok(order)
    }

    fn discard_journal(&self) {
        if let Err(e) = journal::clear(&self.sheets.journal_path()) {
            warn!(error = %e, "failed to remove execute journal");
        }
    }

    fn advance_counter(&mut self, next: u64) {
        if next <= self.next_seq {
            return;
        }
        self.next_seq = next;
        let seq = OrderSequence { next_seq: next };
        if let Err(e) = counter::save(&self.sheets.counter_path(), seq) {
            // Not fatal: reconcile() recovers the value from the sheets.
            warn!(error = %e, next_seq = next, "failed to persist order counter");
        }
    }
}

fn roll_forward(
    sheets: &SheetStore,
    entry: &ExecuteJournal,
    pending: &mut Vec<Order>,
    executed: &mut Vec<Order>,
) -> Result<(), DeskError> {
    let id = &entry.order.order_id;
    pending.retain(|o| &o.order_id != id);
    if !executed.iter().any(|o| &o.order_id == id) {
        executed.push(entry.order.clone());
    }
    sheets.save(OrderKind::Executed, executed)?;
    sheets.save(OrderKind::Pending, pending)?;
    info!(order_id = %id, "rolled forward interrupted execute");
    Ok(())
}

fn warn_on_duplicates(pending: &[Order], executed: &[Order]) {
    let mut seen = HashSet::new();
    for order in pending.iter().chain(executed) {
        if !seen.insert(order.order_id.as_str()) {
            warn!(order_id = %order.order_id, "duplicate order id in sheets");
        }
    }
}
