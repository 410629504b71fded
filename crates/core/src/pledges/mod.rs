//! Pledges module - domain models, services, and traits.

mod certificate;
mod pledges_catalog;
mod pledges_model;
mod pledges_service;
mod pledges_traits;

pub use certificate::{CertificateSummary, CERTIFICATE_RECOGNITION, CERTIFICATE_TITLE};
pub use pledges_catalog::{CommitmentTheme, PledgeCatalog, COMMITMENT_THEMES, REGIONS};
pub use pledges_model::{
    hearts_rating, NewPledge, NewPledgeRecord, Pledge, PledgeStats, ProfileType, PublicPledge,
};
pub use pledges_service::PledgeService;
pub use pledges_traits::{PledgeRepositoryTrait, PledgeServiceTrait};
