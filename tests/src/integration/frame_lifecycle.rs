//! # Frame Lifecycle Tests
//!
//! End-to-end coverage of the bootstrap flow:
//!
//! ```text
//! [Ready Gate] ──resolves──► [FrameCoordinator]
//!                                  │ role from config
//!                  ┌───────────────┼────────────────┐
//!                  ▼               ▼                ▼
//!               [Guest]       [Sidebar]        [Notebook]
//!               (always)      (host only)      (host only)
//!                                  │
//!             anchor link ──destroy──► teardown + asset removal
//! ```

#[cfg(test)]
use marginalia_bus::{topics, EventBus, EventPublisher};

#[cfg(test)]
use marginalia_runtime::adapters::{DefaultCollaboratorFactory, InMemoryDocument};

#[cfg(test)]
use marginalia_runtime::{ClientConfig, Document, FrameCoordinator, FramePhase};

#[cfg(test)]
use marginalia_types::{FrameRole, ReadyState};

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use std::time::Duration;

/// Build a document the way the boot script leaves it: readiness past
/// loading, the sidebar anchor link, and `asset_count` marked assets.
#[cfg(test)]
fn booted_document(asset_count: usize) -> Arc<InMemoryDocument> {
    let document =
        InMemoryDocument::new().with_sidebar_link("https://marginalia.example/app/sidebar.html");
    for _ in 0..asset_count {
        document.insert_asset("script");
    }
    document.set_ready_state(ReadyState::Complete);
    Arc::new(document)
}

#[cfg(test)]
fn coordinator_for(
    document: &Arc<InMemoryDocument>,
    config: ClientConfig,
) -> Arc<FrameCoordinator> {
    Arc::new(FrameCoordinator::new(
        Arc::clone(document) as Arc<dyn Document>,
        Arc::new(EventBus::new()),
        Arc::new(DefaultCollaboratorFactory),
        config,
    ))
}

#[cfg(test)]
async fn wait_for_phase(coordinator: &FrameCoordinator, phase: FramePhase) {
    for _ in 0..50 {
        if coordinator.phase() == phase {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("coordinator never reached {phase:?} phase");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario A: no sub-frame identifier means the frame hosts all three
    /// collaborators.
    #[tokio::test]
    async fn host_frame_constructs_guest_sidebar_and_notebook() {
        let document = booted_document(0);
        let coordinator = coordinator_for(&document, ClientConfig::default());

        Arc::clone(&coordinator)
            .run()
            .await
            .expect("bootstrap should succeed");

        assert_eq!(coordinator.role(), Some(FrameRole::Host));
        assert!(coordinator.has_live_guest());
        assert!(coordinator.has_live_sidebar());
        assert!(coordinator.has_live_notebook());
    }

    /// Scenario B: a sub-frame identifier makes the frame guest-only.
    #[tokio::test]
    async fn sub_frame_constructs_guest_only() {
        let document = booted_document(0);
        let mut config = ClientConfig::default();
        config.annotator.sub_frame_identifier = Some("frame-42".into());
        let coordinator = coordinator_for(&document, config);

        Arc::clone(&coordinator)
            .run()
            .await
            .expect("bootstrap should succeed");

        assert_eq!(coordinator.role(), Some(FrameRole::Guest));
        assert!(coordinator.has_live_guest());
        assert!(!coordinator.has_live_sidebar());
        assert!(!coordinator.has_live_notebook());
    }

    /// Scenario C: the gate defers bootstrap until the document leaves
    /// `Loading`, and later readiness changes do not re-run it.
    #[tokio::test]
    async fn bootstrap_waits_for_document_readiness() {
        let document = Arc::new(
            InMemoryDocument::new()
                .with_sidebar_link("https://marginalia.example/app/sidebar.html"),
        );
        let coordinator = coordinator_for(&document, ClientConfig::default());

        let runner = Arc::clone(&coordinator);
        let bootstrap = tokio::spawn(async move { runner.run().await });

        // Still parsing: nothing may assemble yet.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(coordinator.phase(), FramePhase::Uninitialized);

        document.set_ready_state(ReadyState::Interactive);
        bootstrap
            .await
            .expect("bootstrap task should not panic")
            .expect("bootstrap should succeed");
        assert_eq!(coordinator.phase(), FramePhase::Active);

        // A second readiness change must not restart the lifecycle.
        document.set_ready_state(ReadyState::Complete);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(coordinator.phase(), FramePhase::Active);
    }

    /// Scenario D: one destroy signal removes every marked asset; a second
    /// signal finds nothing left to do.
    #[tokio::test]
    async fn destroy_signal_tears_down_and_is_idempotent() {
        let document = booted_document(3);
        let coordinator = coordinator_for(&document, ClientConfig::default());

        let link = Arc::clone(&coordinator)
            .run()
            .await
            .expect("bootstrap should succeed");
        assert_eq!(document.injected_asset_count(), 3);

        link.fire_destroy();
        wait_for_phase(&coordinator, FramePhase::Destroyed).await;

        assert!(!coordinator.has_live_guest());
        assert!(!coordinator.has_live_sidebar());
        assert!(!coordinator.has_live_notebook());
        assert_eq!(document.injected_asset_count(), 0);

        // Second emission: no panic, nothing re-removed, phase stays put.
        link.fire_destroy();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(coordinator.phase(), FramePhase::Destroyed);
        assert_eq!(document.injected_asset_count(), 0);
    }

    /// The anchor link survives teardown; only marked assets are removed.
    #[tokio::test]
    async fn teardown_only_removes_marked_nodes() {
        let document = booted_document(2);
        let coordinator = coordinator_for(&document, ClientConfig::default());

        let link = Arc::clone(&coordinator)
            .run()
            .await
            .expect("bootstrap should succeed");
        link.fire_destroy();
        wait_for_phase(&coordinator, FramePhase::Destroyed).await;

        assert!(document.sidebar_link().is_some());
    }

    /// Collaborator lifecycle breadcrumbs flow over the injected bus.
    #[tokio::test]
    async fn lifecycle_events_reach_bus_subscribers() {
        let document = booted_document(1);
        let bus = Arc::new(EventBus::new());
        let trace = Arc::new(std::sync::Mutex::new(Vec::new()));

        // Keep the subscriptions alive for the whole test.
        let mut subscriptions = Vec::new();
        for topic in [
            topics::GUEST_READY,
            topics::SIDEBAR_OPENED,
            topics::NOTEBOOK_OPENED,
            topics::FRAME_DESTROYED,
        ] {
            let trace_clone = Arc::clone(&trace);
            subscriptions.push(bus.subscribe(topic, move |_| {
                trace_clone.lock().unwrap().push(topic);
            }));
        }

        let coordinator = Arc::new(FrameCoordinator::new(
            Arc::clone(&document) as Arc<dyn Document>,
            Arc::clone(&bus),
            Arc::new(DefaultCollaboratorFactory),
            ClientConfig::default(),
        ));

        let link = Arc::clone(&coordinator)
            .run()
            .await
            .expect("bootstrap should succeed");
        link.fire_destroy();
        wait_for_phase(&coordinator, FramePhase::Destroyed).await;

        assert_eq!(
            *trace.lock().unwrap(),
            vec![
                topics::GUEST_READY,
                topics::SIDEBAR_OPENED,
                topics::NOTEBOOK_OPENED,
                topics::FRAME_DESTROYED,
            ]
        );
    }

    /// A document without the anchor link fails bootstrap outright.
    #[tokio::test]
    async fn missing_anchor_is_a_fatal_bootstrap_error() {
        let document = Arc::new(InMemoryDocument::new());
        document.set_ready_state(ReadyState::Complete);
        let coordinator = coordinator_for(&document, ClientConfig::default());

        let err = Arc::clone(&coordinator)
            .run()
            .await
            .expect_err("bootstrap should fail");
        assert_eq!(
            err,
            marginalia_types::BootstrapError::SidebarLinkMissing
        );
        assert_eq!(coordinator.phase(), FramePhase::Destroyed);
    }
}
