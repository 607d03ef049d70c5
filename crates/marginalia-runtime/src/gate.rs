//! # Document-Ready Gate
//!
//! A one-shot asynchronous gate that defers coordinator startup until the
//! hosting document has finished its initial parse.

use crate::ports::Document;
use tracing::debug;

/// Wait until the document's readiness leaves the `Loading` phase.
///
/// Resolves immediately when the document is already past `Loading`,
/// otherwise on the first readiness change that leaves it. The underlying
/// signal may fire more times afterwards; this future has resolved by then,
/// so they are ignored. Fire-once by construction, not a stream.
///
/// There are no error conditions and no cancellation: the bootstrap this
/// gate guards always eventually runs once the document loads. If the
/// document is dropped while still loading the gate resolves too, since the
/// frame it guards no longer exists.
pub async fn document_ready(document: &dyn Document) {
    let mut ready_rx = document.watch_ready_state();

    if !ready_rx.borrow().is_loading() {
        return;
    }

    debug!("Document still loading, waiting for readiness change");
    while ready_rx.changed().await.is_ok() {
        if !ready_rx.borrow().is_loading() {
            debug!(state = %*ready_rx.borrow(), "Document ready");
            return;
        }
    }
}
