use crate::errors::Result;
use crate::pledges::pledges_model::{
    NewPledge, NewPledgeRecord, Pledge, PledgeStats, ProfileType, PublicPledge,
};
use async_trait::async_trait;

/// Trait for pledge repository operations against the remote store
#[async_trait]
pub trait PledgeRepositoryTrait: Send + Sync {
    /// Inserts one record. The store assigns `id`, `pledge_number` and `created_at`.
    async fn insert_pledge(&self, record: NewPledgeRecord) -> Result<Pledge>;
    /// Loads only the `profile_type` column of every pledge.
    async fn load_profile_types(&self) -> Result<Vec<ProfileType>>;
    /// Loads the public projection, newest first, at most `limit` rows.
    async fn load_public_pledges(&self, limit: usize) -> Result<Vec<PublicPledge>>;
}

/// Trait for pledge service operations
#[async_trait]
pub trait PledgeServiceTrait: Send + Sync {
    async fn submit_pledge(&self, new_pledge: NewPledge) -> Result<Pledge>;
    async fn fetch_stats(&self) -> Result<PledgeStats>;
    async fn fetch_recent_pledges(&self, limit: usize) -> Result<Vec<PublicPledge>>;
}
