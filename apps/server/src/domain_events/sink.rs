//! Web domain event sink implementation.

use pledgewall_core::events::{DomainEvent, DomainEventSink};
use tokio::sync::mpsc;

use crate::events::{EventBus, ServerEvent, PLEDGE_SUBMITTED};

/// Domain event sink for the web server runtime.
///
/// `emit` only enqueues; the worker started by [`WebDomainEventSink::new`]
/// publishes to the [`EventBus`]. Must be created inside a tokio runtime.
pub struct WebDomainEventSink {
    tx: mpsc::UnboundedSender<DomainEvent>,
}

impl WebDomainEventSink {
    pub fn new(event_bus: EventBus) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(event_worker(rx, event_bus));
        Self { tx }
    }
}

impl DomainEventSink for WebDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        if self.tx.send(event).is_err() {
            tracing::warn!("Domain event worker stopped; event dropped");
        }
    }
}

async fn event_worker(mut rx: mpsc::UnboundedReceiver<DomainEvent>, event_bus: EventBus) {
    while let Some(event) = rx.recv().await {
        match to_server_event(&event) {
            Ok(server_event) => event_bus.publish(server_event),
            Err(err) => tracing::error!("Failed to serialize domain event: {}", err),
        }
    }
    tracing::debug!("Domain event worker finished");
}

fn to_server_event(event: &DomainEvent) -> serde_json::Result<ServerEvent> {
    let name = match event {
        DomainEvent::PledgeSubmitted(_) => PLEDGE_SUBMITTED,
    };
    Ok(ServerEvent::with_payload(name, serde_json::to_value(event)?))
}
