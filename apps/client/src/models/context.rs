use serde::{Deserialize, Serialize};

/// Experience buckets offered by the profile form, as (years, label).
pub const EXPERIENCE_BUCKETS: &[(u32, &str)] = &[
    (1, "0-2 years"),
    (4, "3-5 years"),
    (8, "6-10 years"),
    (15, "10+ years"),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompanyType {
    #[serde(alias = "PRODUCT")]
    Product,
    #[serde(alias = "SERVICE")]
    Service,
    #[serde(alias = "STARTUP")]
    Startup,
}

impl CompanyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
            Self::Startup => "startup",
        }
    }
}

/// The candidate's target-role profile. Sent with every analysis to pick the
/// benchmarking cohort, and persisted locally between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Context {
    pub role: String,
    pub experience_level: u32,
    pub company_type: CompanyType,
    pub location: String,
    pub industry: String,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            role: String::new(),
            experience_level: 4,
            company_type: CompanyType::Product,
            location: "national".to_string(),
            industry: "tech".to_string(),
        }
    }
}

impl Context {
    pub fn has_role(&self) -> bool {
        !self.role.trim().is_empty()
    }

    /// Sets the experience level to the bucket that covers `years`.
    pub fn set_experience_years(&mut self, years: f64) {
        self.experience_level = experience_bucket(years);
    }
}

/// Maps raw years of experience onto one of the form's buckets.
pub fn experience_bucket(years: f64) -> u32 {
    if years <= 2.0 {
        1
    } else if years <= 5.0 {
        4
    } else if years <= 10.0 {
        8
    } else {
        15
    }
}

/// Label for a stored experience level; unknown values fall back to plain years.
pub fn experience_label(level: u32) -> String {
    EXPERIENCE_BUCKETS
        .iter()
        .find(|(years, _)| *years == level)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("{level} years"))
}
