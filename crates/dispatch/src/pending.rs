//! Status polling for tracked transactions.
//!
//! The tracker itself only stores entries; this module is the collaborator
//! that drives their state transitions by asking the node. Polling runs on
//! the session's own scheduler (inside the in-flight command), so it never
//! races with dispatch.

use snowshell_client::TxStatus;
use snowshell_core::{Result, TxState};

use crate::handler::{client_err, HandlerCtx};

/// Map a node-reported status onto the tracker's state machine.
pub fn to_tx_state(status: TxStatus) -> TxState {
    match status {
        TxStatus::Processing => TxState::Processing,
        TxStatus::Accepted => TxState::Accepted,
        TxStatus::Rejected => TxState::Rejected,
        TxStatus::Unknown => TxState::Unknown,
    }
}

/// Look up every still-processing entry and record its current status.
/// Returns how many entries were polled.
pub async fn poll(ctx: &HandlerCtx) -> Result<usize> {
    let ids = ctx.tracker.lock().processing_ids();
    let polled = ids.len();
    for id in ids {
        let status = ctx.client.tx_status(&id).await.map_err(client_err)?;
        ctx.tracker.lock().update(&id, to_tx_state(status));
    }
    Ok(polled)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use snowshell_client::{MockNodeClient, TxStatus};
    use snowshell_core::pending::PendingTracker;

    use super::*;

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(fut)
    }

    #[test]
    fn poll_updates_only_processing_entries() {
        let mock = Arc::new(MockNodeClient::new());
        mock.set_tx_status("tx1", TxStatus::Accepted);
        let tracker = Arc::new(Mutex::new(PendingTracker::new()));
        tracker.lock().add("tx1");
        tracker.lock().add("tx2");
        tracker.lock().update("tx2", TxState::Rejected);

        let client: Arc<dyn snowshell_client::NodeClient> = mock.clone();
        let ctx = HandlerCtx {
            client,
            tracker: tracker.clone(),
        };
        let polled = block_on(poll(&ctx)).unwrap();

        // tx2 was already terminal, so only tx1 was looked up
        assert_eq!(polled, 1);
        assert_eq!(mock.calls("tx_status"), 1);
        assert_eq!(tracker.lock().entries()[0].state, TxState::Accepted);
        assert_eq!(tracker.lock().entries()[1].state, TxState::Rejected);
    }
}
