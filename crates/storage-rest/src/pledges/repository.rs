use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;

use pledgewall_core::constants::PLEDGES_TABLE;
use pledgewall_core::pledges::{
    NewPledgeRecord, Pledge, PledgeRepositoryTrait, ProfileType, PublicPledge,
};
use pledgewall_core::{Error, Result};

use super::model::{NewPledgeRow, PledgeRow, ProfileTypeRow, PublicPledgeRow};
use crate::client::RemoteStore;
use crate::errors::StoreError;
use crate::query::{Direction, SelectQuery};

/// Rows requested per page when reading a whole column. Matches the default
/// `max-rows` cap of hosted PostgREST, which truncates larger responses.
const PROFILE_PAGE_SIZE: usize = 1000;

pub struct PledgeRepository {
    store: Arc<dyn RemoteStore>,
}

impl PledgeRepository {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        PledgeRepository { store }
    }

    fn decode_rows<T: serde::de::DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(|e| Error::from(StoreError::Json(e))))
            .collect()
    }
}

#[async_trait]
impl PledgeRepositoryTrait for PledgeRepository {
    async fn insert_pledge(&self, record: NewPledgeRecord) -> Result<Pledge> {
        let row = NewPledgeRow::from(record);
        let payload = serde_json::to_value(&row).map_err(StoreError::from)?;

        let inserted = self.store.insert(PLEDGES_TABLE, payload).await?;
        let pledge_row: PledgeRow = serde_json::from_value(inserted).map_err(StoreError::from)?;
        debug!("Stored pledge #{}", pledge_row.pledge_number);
        Ok(Pledge::from(pledge_row))
    }

    async fn load_profile_types(&self) -> Result<Vec<ProfileType>> {
        let mut profile_types = Vec::new();
        loop {
            let query = SelectQuery::new()
                .columns(["profile_type"])
                .order_by("pledge_number", Direction::Ascending)
                .limit(PROFILE_PAGE_SIZE)
                .offset(profile_types.len());
            let rows = self.store.select(PLEDGES_TABLE, &query).await?;
            // The server may cap a page below the requested size, so only an
            // empty page ends the scan.
            if rows.is_empty() {
                break;
            }
            let decoded: Vec<ProfileTypeRow> = Self::decode_rows(rows)?;
            profile_types.extend(decoded.into_iter().map(|row| row.profile_type));
        }
        debug!("Loaded {} profile types", profile_types.len());
        Ok(profile_types)
    }

    async fn load_public_pledges(&self, limit: usize) -> Result<Vec<PublicPledge>> {
        let query = SelectQuery::new()
            .columns(PublicPledge::COLUMNS.iter().copied())
            .order_by("created_at", Direction::Descending)
            .limit(limit);
        let rows = self.store.select(PLEDGES_TABLE, &query).await?;
        let decoded: Vec<PublicPledgeRow> = Self::decode_rows(rows)?;
        Ok(decoded.into_iter().map(PublicPledge::from).collect())
    }
}
