//! Commitment themes and regions offered on the pledge form.

use serde::Serialize;

/// A group of related commitments shown together on the form.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CommitmentTheme {
    pub theme: &'static str,
    pub commitments: &'static [&'static str],
}

pub const COMMITMENT_THEMES: &[CommitmentTheme] = &[
    CommitmentTheme {
        theme: "Sustainable Transport",
        commitments: &[
            "Use public transport or carpool at least 3 times a week",
            "Switch to cycling or walking for short distances",
            "Support electric vehicle adoption",
        ],
    },
    CommitmentTheme {
        theme: "Energy & Resources",
        commitments: &[
            "Reduce electricity usage by 20% through conscious habits",
            "Switch to renewable energy sources when possible",
            "Minimize water waste in daily activities",
        ],
    },
    CommitmentTheme {
        theme: "Consumption & Waste",
        commitments: &[
            "Say no to single-use plastics",
            "Choose sustainable and locally-sourced products",
            "Compost organic waste and recycle regularly",
        ],
    },
];

/// States and union territories accepted in the `state` field.
pub const REGIONS: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

/// Everything the form can render, in display order.
#[derive(Debug, Clone, Serialize)]
pub struct PledgeCatalog {
    pub themes: &'static [CommitmentTheme],
    pub regions: &'static [&'static str],
}

impl Default for PledgeCatalog {
    fn default() -> Self {
        Self {
            themes: COMMITMENT_THEMES,
            regions: REGIONS,
        }
    }
}

impl PledgeCatalog {
    pub fn all_commitments(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.themes.iter().flat_map(|t| t.commitments.iter().copied())
    }

    pub fn is_known_region(&self, region: &str) -> bool {
        self.regions.contains(&region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let catalog = PledgeCatalog::default();
        assert_eq!(catalog.themes.len(), 3);
        assert_eq!(catalog.all_commitments().count(), 9);
        assert_eq!(catalog.regions.len(), 36);
        assert!(catalog.is_known_region("Ladakh"));
        assert!(!catalog.is_known_region("Atlantis"));
    }

    #[test]
    fn test_commitments_are_unique() {
        let catalog = PledgeCatalog::default();
        let all: Vec<&str> = catalog.all_commitments().collect();
        let unique: std::collections::HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }
}
