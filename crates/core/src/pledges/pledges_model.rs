//! Pledge domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::{MAX_HEARTS, MIN_HEARTS};
use crate::errors::ValidationError;

/// Closed set of pledger profiles.
///
/// Wire names match the values stored in the `profile_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileType {
    #[serde(rename = "Student")]
    Student,
    #[serde(rename = "Working Professional")]
    WorkingProfessional,
    #[serde(rename = "Other")]
    Other,
}

impl ProfileType {
    pub const ALL: [ProfileType; 3] = [
        ProfileType::Student,
        ProfileType::WorkingProfessional,
        ProfileType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Student => "Student",
            ProfileType::WorkingProfessional => "Working Professional",
            ProfileType::Other => "Other",
        }
    }
}

impl std::fmt::Display for ProfileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computes the hearts rating for a number of selected commitments.
///
/// Step function: up to 3 commitments earn 3 hearts, 4 to 6 earn 4,
/// 7 or more earn 5. The rating is fixed when the pledge is created.
pub fn hearts_rating(commitment_count: usize) -> u8 {
    match commitment_count {
        0..=3 => MIN_HEARTS,
        4..=6 => 4,
        _ => MAX_HEARTS,
    }
}

/// A persisted pledge, as returned by the store.
///
/// `email` and `mobile` are confidential. Anything rendered publicly goes
/// through [`PublicPledge`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pledge {
    pub id: String,
    pub pledge_number: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<String>,
    pub commitment_count: u32,
    pub hearts_rating: u8,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a pledge shown on the pledge wall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicPledge {
    pub pledge_number: i64,
    pub name: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub hearts_rating: u8,
    pub created_at: DateTime<Utc>,
}

impl PublicPledge {
    /// Store columns selected for the public projection.
    pub const COLUMNS: &'static [&'static str] = &[
        "pledge_number",
        "name",
        "state",
        "profile_type",
        "hearts_rating",
        "created_at",
    ];
}

impl From<&Pledge> for PublicPledge {
    fn from(pledge: &Pledge) -> Self {
        Self {
            pledge_number: pledge.pledge_number,
            name: pledge.name.clone(),
            state: pledge.state.clone(),
            profile_type: pledge.profile_type,
            hearts_rating: pledge.hearts_rating,
            created_at: pledge.created_at,
        }
    }
}

/// Aggregate counts partitioned by profile type.
///
/// `Other` pledges are counted as `workshops`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PledgeStats {
    pub total: u64,
    pub students: u64,
    pub professionals: u64,
    pub workshops: u64,
}

impl PledgeStats {
    pub fn from_profile_types<I>(profile_types: I) -> Self
    where
        I: IntoIterator<Item = ProfileType>,
    {
        let mut stats = PledgeStats::default();
        for profile_type in profile_types {
            stats.total += 1;
            match profile_type {
                ProfileType::Student => stats.students += 1,
                ProfileType::WorkingProfessional => stats.professionals += 1,
                ProfileType::Other => stats.workshops += 1,
            }
        }
        stats
    }

    /// Share of `target` reached, capped at 100.
    pub fn progress_percent(&self, target: u64) -> f64 {
        if target == 0 {
            return 100.0;
        }
        ((self.total as f64 / target as f64) * 100.0).min(100.0)
    }

    pub fn is_consistent(&self) -> bool {
        self.students + self.professionals + self.workshops == self.total
    }
}

/// Input model for submitting a pledge
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewPledge {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<String>,
}

impl NewPledge {
    /// Checks the form before anything reaches the store.
    ///
    /// Commitment strings are not checked against the catalog.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.commitments.is_empty() {
            return Err(ValidationError::NoCommitments);
        }

        let mut seen = HashSet::with_capacity(self.commitments.len());
        for commitment in &self.commitments {
            if !seen.insert(commitment.as_str()) {
                return Err(ValidationError::DuplicateCommitment(commitment.clone()));
            }
        }

        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("mobile", &self.mobile),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field.to_string()));
            }
        }

        let mobile = self.mobile.trim();
        if mobile.len() != 10 || !mobile.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidMobile(self.mobile.clone()));
        }

        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(ValidationError::InvalidEmail(self.email.clone())),
        }

        Ok(())
    }
}

/// Insert payload sent to the store, with the derived fields filled in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewPledgeRecord {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub state: String,
    pub profile_type: ProfileType,
    pub commitments: Vec<String>,
    pub commitment_count: u32,
    pub hearts_rating: u8,
}

impl From<NewPledge> for NewPledgeRecord {
    fn from(new_pledge: NewPledge) -> Self {
        let count = new_pledge.commitments.len();
        Self {
            name: new_pledge.name.trim().to_string(),
            email: new_pledge.email.trim().to_string(),
            mobile: new_pledge.mobile.trim().to_string(),
            state: new_pledge.state.trim().to_string(),
            profile_type: new_pledge.profile_type,
            commitments: new_pledge.commitments,
            commitment_count: count as u32,
            hearts_rating: hearts_rating(count),
        }
    }
}
