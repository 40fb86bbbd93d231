//! Risk heatmap tiering for the four clause types the extractor quantifies.
//!
//! Per clause:
//! | Clause            | high if   | medium if | score                          | missing      |
//! |-------------------|-----------|-----------|--------------------------------|--------------|
//! | Notice (days)     | > 60      | > 30      | 100 − (days − 30) · 2          | low, 90      |
//! | Non-compete (mo)  | > 12      | > 6       | 100 − months · 5               | low, 100     |
//! | Bond (INR)        | > 100,000 | > 50,000  | 100 − amount / 10,000          | low, 100     |
//! | Probation (mo)    | > 6       | > 3       | 100 − (months − 3) · 10        | low, 90      |
//!
//! Scores are clamped to [0, 100].

use serde::Serialize;

use crate::analytics::format::{format_lakhs, format_number};
use crate::models::analysis::Extraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseKind {
    NoticePeriod,
    NonCompete,
    Bond,
    Probation,
}

impl ClauseKind {
    pub const ALL: [ClauseKind; 4] = [
        ClauseKind::NoticePeriod,
        ClauseKind::NonCompete,
        ClauseKind::Bond,
        ClauseKind::Probation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoticePeriod => "Notice Period",
            Self::NonCompete => "Non-Compete",
            Self::Bond => "Service Bond",
            Self::Probation => "Probation",
        }
    }

    /// (high threshold, medium threshold); both exclusive.
    fn thresholds(&self) -> (f64, f64) {
        match self {
            Self::NoticePeriod => (60.0, 30.0),
            Self::NonCompete => (12.0, 6.0),
            Self::Bond => (100_000.0, 50_000.0),
            Self::Probation => (6.0, 3.0),
        }
    }

    fn raw_score(&self, value: f64) -> f64 {
        match self {
            Self::NoticePeriod => 100.0 - (value - 30.0) * 2.0,
            Self::NonCompete => 100.0 - value * 5.0,
            Self::Bond => 100.0 - value / 10_000.0,
            Self::Probation => 100.0 - (value - 3.0) * 10.0,
        }
    }

    fn missing_score(&self) -> f64 {
        match self {
            Self::NoticePeriod | Self::Probation => 90.0,
            Self::NonCompete | Self::Bond => 100.0,
        }
    }

    fn display(&self, value: f64) -> String {
        match self {
            Self::NoticePeriod => format!("{} days", format_number(value)),
            Self::NonCompete | Self::Probation => format!("{} months", format_number(value)),
            Self::Bond => format_lakhs(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub score: f64, // 0 – 100, higher is safer
}

/// Tiers a raw clause value. A missing value is low risk with the clause's default score.
pub fn assess_risk(kind: ClauseKind, value: Option<f64>) -> RiskAssessment {
    let value = match value.filter(|v| v.is_finite()) {
        Some(v) => v,
        None => {
            return RiskAssessment {
                tier: RiskTier::Low,
                score: kind.missing_score(),
            }
        }
    };

    let (high, medium) = kind.thresholds();
    let tier = if value > high {
        RiskTier::High
    } else if value > medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    };

    RiskAssessment {
        tier,
        score: kind.raw_score(value).clamp(0.0, 100.0),
    }
}

/// One cell of the risk heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub kind: ClauseKind,
    pub label: &'static str,
    /// "Not specified" when the extractor found nothing.
    pub value_display: String,
    pub assessment: RiskAssessment,
}

/// Builds the heatmap for every quantified clause, in a fixed order.
pub fn risk_heatmap(extraction: &Extraction) -> Vec<HeatmapCell> {
    ClauseKind::ALL
        .iter()
        .map(|&kind| {
            let value = match kind {
                ClauseKind::NoticePeriod => extraction.notice_days(),
                ClauseKind::NonCompete => extraction.non_compete_months(),
                ClauseKind::Bond => extraction.bond_amount(),
                ClauseKind::Probation => extraction.probation_months(),
            };
            HeatmapCell {
                kind,
                label: kind.label(),
                value_display: value
                    .map(|v| kind.display(v))
                    .unwrap_or_else(|| "Not specified".to_string()),
                assessment: assess_risk(kind, value),
            }
        })
        .collect()
}
