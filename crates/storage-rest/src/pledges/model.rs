//! Row models for the `pledges` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pledgewall_core::pledges::{NewPledgeRecord, Pledge, ProfileType, PublicPledge};

/// Full row as returned by an insert with `return=representation`.
#[derive(Deserialize, Debug, Clone)]
pub struct PledgeRow {
    pub id: String,
    pub pledge_number: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    #[serde(default)]
    pub commitments: Vec<String>,
    pub commitment_count: i32,
    pub hearts_rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. `id`, `pledge_number` and `created_at` are left to the store.
#[derive(Serialize, Debug, Clone)]
pub struct NewPledgeRow {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<String>,
    pub commitment_count: i32,
    pub hearts_rating: i16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProfileTypeRow {
    pub profile_type: ProfileType,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PublicPledgeRow {
    pub pledge_number: i64,
    pub name: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub hearts_rating: i16,
    pub created_at: DateTime<Utc>,
}

// Conversion to domain models
impl From<PledgeRow> for Pledge {
    fn from(row: PledgeRow) -> Self {
        Self {
            id: row.id,
            pledge_number: row.pledge_number,
            name: row.name,
            email: row.email,
            mobile: row.mobile,
            state: row.state,
            profile_type: row.profile_type,
            commitments: row.commitments,
            commitment_count: row.commitment_count.max(0) as u32,
            hearts_rating: row.hearts_rating.clamp(0, u8::MAX as i16) as u8,
            created_at: row.created_at,
        }
    }
}

impl From<PublicPledgeRow> for PublicPledge {
    fn from(row: PublicPledgeRow) -> Self {
        Self {
            pledge_number: row.pledge_number,
            name: row.name,
            state: row.state,
            profile_type: row.profile_type,
            hearts_rating: row.hearts_rating.clamp(0, u8::MAX as i16) as u8,
            created_at: row.created_at,
        }
    }
}

impl From<NewPledgeRecord> for NewPledgeRow {
    fn from(record: NewPledgeRecord) -> Self {
        Self {
            name: record.name,
            email: record.email,
            mobile: record.mobile,
            state: record.state,
            profile_type: record.profile_type,
            commitments: record.commitments,
            commitment_count: record.commitment_count as i32,
            hearts_rating: record.hearts_rating as i16,
        }
    }
}
