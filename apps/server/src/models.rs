//! Request and response bodies of the HTTP API.

use pledgewall_core::{
    constants::{DEFAULT_RECENT_LIMIT, TARGET_PLEDGES},
    CertificateSummary, CommitmentTheme, Pledge, PledgeCatalog, PledgeStats, ProfileType,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct SubmitPledgeResponse {
    pub pledge: Pledge,
    pub certificate: CertificateSummary,
}

impl From<Pledge> for SubmitPledgeResponse {
    fn from(pledge: Pledge) -> Self {
        let certificate = CertificateSummary::from_pledge(&pledge);
        Self { pledge, certificate }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: PledgeStats,
    pub progress_percent: f64,
    pub target: u64,
}

impl From<PledgeStats> for StatsResponse {
    fn from(stats: PledgeStats) -> Self {
        Self {
            stats,
            progress_percent: stats.progress_percent(TARGET_PLEDGES),
            target: TARGET_PLEDGES,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

impl RecentQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_RECENT_LIMIT)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub themes: &'static [CommitmentTheme],
    pub regions: &'static [&'static str],
    pub profile_types: Vec<&'static str>,
}

impl From<&PledgeCatalog> for CatalogResponse {
    fn from(catalog: &PledgeCatalog) -> Self {
        Self {
            themes: catalog.themes,
            regions: catalog.regions,
            profile_types: ProfileType::ALL.iter().map(|p| p.as_str()).collect(),
        }
    }
}
