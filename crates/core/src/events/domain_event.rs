//! Domain event types.

use serde::{Deserialize, Serialize};

use crate::pledges::{Pledge, PublicPledge};

/// Domain events emitted by core services after successful mutations.
///
/// Events carry only the public projection of a pledge; contact details
/// never leave the service through this channel.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// A pledge was accepted by the store.
    PledgeSubmitted(PublicPledge),
}

impl DomainEvent {
    pub fn pledge_submitted(pledge: &Pledge) -> Self {
        Self::PledgeSubmitted(PublicPledge::from(pledge))
    }

    pub fn pledge_number(&self) -> i64 {
        match self {
            DomainEvent::PledgeSubmitted(pledge) => pledge.pledge_number,
        }
    }
}
