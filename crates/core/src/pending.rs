//! Pending-transaction tracker.
//!
//! Records asynchronously-submitted operations so the user can list them
//! later. The tracker only stores and renders; state transitions are driven
//! from outside by whoever polls the node for transaction status. Entries
//! are append-only and live for the process lifetime.

use chrono::{DateTime, Utc};

/// Lifecycle state of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    /// Submitted, terminal status not yet known.
    Processing,
    /// Accepted by the network.
    Accepted,
    /// Rejected by the network.
    Rejected,
    /// Node could not resolve the id.
    Unknown,
}

impl TxState {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            TxState::Processing => "Processing",
            TxState::Accepted => "Accepted",
            TxState::Rejected => "Rejected",
            TxState::Unknown => "Unknown",
        }
    }
}

/// One tracked submission.
#[derive(Debug, Clone)]
pub struct PendingTx {
    /// Transaction id as returned by the node.
    pub id: String,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
    /// Current lifecycle state.
    pub state: TxState,
}

/// Insertion-ordered store of pending transactions.
///
/// No dedup: submitting the same id twice produces two entries. That is
/// documented behavior, not hardened against.
#[derive(Debug, Default)]
pub struct PendingTracker {
    entries: Vec<PendingTx>,
}

impl PendingTracker {
    /// An empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly submitted transaction as `Processing`.
    pub fn add(&mut self, id: &str) {
        self.entries.push(PendingTx {
            id: id.to_string(),
            submitted_at: Utc::now(),
            state: TxState::Processing,
        });
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[PendingTx] {
        &self.entries
    }

    /// Ids of entries still `Processing`, for the status poller.
    pub fn processing_ids(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.state == TxState::Processing)
            .map(|e| e.id.clone())
            .collect()
    }

    /// Move every entry with this id to `state`.
    pub fn update(&mut self, id: &str, state: TxState) {
        for entry in self.entries.iter_mut().filter(|e| e.id == id) {
            entry.state = state;
        }
    }

    /// Render all entries, one line each: id, elapsed seconds, state.
    pub fn render_list(&self) -> String {
        if self.entries.is_empty() {
            return "no pending transactions".to_string();
        }
        let now = Utc::now();
        let mut out = String::new();
        for entry in &self.entries {
            let elapsed = (now - entry.submitted_at).num_seconds().max(0);
            out.push_str(&format!(
                "{}  submitted {}s ago  {}\n",
                entry.id,
                elapsed,
                entry.state.as_str()
            ));
        }
        out.pop();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_records_processing_entry() {
        let mut tracker = PendingTracker::new();
        tracker.add("tx123");
        let entries = tracker.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "tx123");
        assert_eq!(entries[0].state, TxState::Processing);
    }

    #[test]
    fn duplicate_ids_produce_duplicate_entries() {
        let mut tracker = PendingTracker::new();
        tracker.add("tx1");
        tracker.add("tx1");
        assert_eq!(tracker.entries().len(), 2);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut tracker = PendingTracker::new();
        tracker.add("a");
        tracker.add("b");
        tracker.add("c");
        let ids: Vec<&str> = tracker.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn update_moves_all_matching_entries() {
        let mut tracker = PendingTracker::new();
        tracker.add("tx1");
        tracker.add("tx2");
        tracker.add("tx1");
        tracker.update("tx1", TxState::Accepted);
        let states: Vec<TxState> = tracker.entries().iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            vec![TxState::Accepted, TxState::Processing, TxState::Accepted]
        );
        assert_eq!(tracker.processing_ids(), vec!["tx2".to_string()]);
    }

    #[test]
    fn render_lists_id_elapsed_and_state() {
        let mut tracker = PendingTracker::new();
        tracker.add("tx123");
        let listing = tracker.render_list();
        assert!(listing.contains("tx123"));
        assert!(listing.contains("Processing"));
    }

    #[test]
    fn render_of_empty_tracker_says_so() {
        let tracker = PendingTracker::new();
        assert_eq!(tracker.render_list(), "no pending transactions");
    }
}
