//! Where core services send their domain events.

use std::sync::{Arc, Mutex};

use super::DomainEvent;

/// Receiver of domain events.
///
/// `emit` is called after the store has accepted a mutation. It must not
/// block or fail the operation that produced the event; the server sink only
/// enqueues and fans out on a worker task.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);
}

/// Sink that records events in memory, for tests of services and routers.
#[derive(Clone, Default)]
pub struct MockDomainEventSink {
    events: Arc<Mutex<Vec<DomainEvent>>>,
}

impl MockDomainEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<DomainEvent>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.recorded().clone()
    }

    /// Pledge numbers of the recorded events, in emission order.
    pub fn pledge_numbers(&self) -> Vec<i64> {
        self.recorded().iter().map(DomainEvent::pledge_number).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded().is_empty()
    }
}

impl DomainEventSink for MockDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        self.recorded().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pledges::{ProfileType, PublicPledge};
    use chrono::Utc;

    fn submitted(pledge_number: i64) -> DomainEvent {
        DomainEvent::PledgeSubmitted(PublicPledge {
            pledge_number,
            name: format!("Pledger {}", pledge_number),
            state: "Assam".to_string(),
            profile_type: ProfileType::Student,
            hearts_rating: 3,
            created_at: Utc::now(),
        })
    }

    #[test]
    fn test_mock_sink_records_in_order() {
        let sink = MockDomainEventSink::new();
        assert!(sink.is_empty());

        sink.emit(submitted(4));
        sink.clone().emit(submitted(5));

        assert_eq!(sink.pledge_numbers(), vec![4, 5]);
        match &sink.events()[1] {
            DomainEvent::PledgeSubmitted(pledge) => assert_eq!(pledge.name, "Pledger 5"),
        }
    }
}
