//! Text content of the completion certificate.
//!
//! Rendering the image is left to the client; this only decides what it says.

use serde::Serialize;

use super::pledges_model::Pledge;

pub const CERTIFICATE_TITLE: &str = "Climate Action Pledge Certificate";
pub const CERTIFICATE_RECOGNITION: &str = "Cool Enough to Care!";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    pub title: String,
    pub recipient: String,
    pub recognition: String,
    pub commitment_line: String,
    pub hearts: u8,
    pub pledge_label: String,
    pub issued_on: String,
    pub file_name: String,
}

impl CertificateSummary {
    pub fn from_pledge(pledge: &Pledge) -> Self {
        Self {
            title: CERTIFICATE_TITLE.to_string(),
            recipient: pledge.name.clone(),
            recognition: CERTIFICATE_RECOGNITION.to_string(),
            commitment_line: format!(
                "For committing to {} climate-positive actions",
                pledge.commitment_count
            ),
            hearts: pledge.hearts_rating,
            pledge_label: format!("Pledge #{}", pledge.pledge_number),
            issued_on: pledge.created_at.format("%b %-d, %Y").to_string(),
            file_name: format!("climate-pledge-{}.png", pledge.pledge_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pledges::ProfileType;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_summary_from_pledge() {
        let pledge = Pledge {
            id: "b7e1".to_string(),
            pledge_number: 1207,
            name: "Meera Nair".to_string(),
            email: "meera@example.com".to_string(),
            mobile: "9988776655".to_string(),
            state: "Kerala".to_string(),
            profile_type: ProfileType::Other,
            commitments: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            commitment_count: 4,
            hearts_rating: 4,
            created_at: Utc.with_ymd_and_hms(2025, 6, 5, 14, 30, 0).unwrap(),
        };

        let summary = CertificateSummary::from_pledge(&pledge);
        assert_eq!(summary.recipient, "Meera Nair");
        assert_eq!(
            summary.commitment_line,
            "For committing to 4 climate-positive actions"
        );
        assert_eq!(summary.hearts, 4);
        assert_eq!(summary.pledge_label, "Pledge #1207");
        assert_eq!(summary.issued_on, "Jun 5, 2025");
        assert_eq!(summary.file_name, "climate-pledge-1207.png");
    }
}
