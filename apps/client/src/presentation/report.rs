//! Report view model: every panel of the results page, built from one
//! `AnalyzeResult`. Absent optional sections become explicit `NotAvailable`
//! variants; nothing here fails.

use serde::Serialize;

use crate::analytics::format::{format_duration_ms, format_lakhs, format_number, ordinal};
use crate::analytics::percentile::{clamp_percentile, interpret_percentile, Interpretation};
use crate::analytics::risk::{risk_heatmap, HeatmapCell};
use crate::analytics::{
    closest_x, distribution_curve, order_negotiation_points, order_red_flags, score_band,
    DistributionPoint, ScoreBand,
};
use crate::models::analysis::{
    AnalyzeResult, Benchmark, FavorableTerm, NegotiationPoint, PercentileResult, RedFlag,
    ScoreBreakdownItem,
};

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard<'a> {
    pub score: f64,
    pub score_display: String,
    pub grade: &'static str,
    pub band: ScoreBand,
    pub band_label: &'static str,
    pub color_class: &'static str,
    pub confidence_percent: f64,
    pub formula: &'a str,
    pub breakdown: &'a [ScoreBreakdownItem],
    pub badges: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PercentileCard {
    Available {
        value: f64,
        rank: String,
        interpretation: Interpretation,
        field_display: String,
        insight: String,
    },
    NotAvailable,
}

impl PercentileCard {
    fn build(percentile: Option<&PercentileResult>, lower_is_better: bool) -> Self {
        let Some(p) = percentile else {
            return Self::NotAvailable;
        };
        let value = clamp_percentile(p.value);
        let interpretation = p
            .interpretation
            .as_deref()
            .and_then(Interpretation::parse)
            .unwrap_or_else(|| interpret_percentile(value, lower_is_better));
        Self::Available {
            value,
            rank: ordinal(value.round() as u32),
            interpretation,
            field_display: p.field_display.clone(),
            insight: p.insight.clone(),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available { value, .. } => Some(*value),
            Self::NotAvailable => None,
        }
    }
}

/// Salary distribution chart with the candidate's and the market median's markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionChart {
    pub points: Vec<DistributionPoint>,
    /// Sample nearest the candidate's salary; `None` when no salary was extracted.
    pub you_x: Option<f64>,
    pub median_x: Option<f64>,
    pub p25_display: String,
    pub median_display: String,
    pub p75_display: String,
    pub cohort_size: u32,
}

impl DistributionChart {
    fn build(benchmark: &Benchmark, salary: Option<f64>) -> Option<Self> {
        let points = distribution_curve(
            benchmark.market_p25,
            benchmark.market_median,
            benchmark.market_p75,
        );
        if points.is_empty() {
            return None;
        }
        Some(Self {
            you_x: salary.and_then(|s| closest_x(&points, s)),
            median_x: closest_x(&points, benchmark.market_median),
            p25_display: format_lakhs(benchmark.market_p25),
            median_display: format_lakhs(benchmark.market_median),
            p75_display: format_lakhs(benchmark.market_p75),
            cohort_size: benchmark.cohort_size,
            points,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FindingsPanel<'a> {
    /// Nothing flagged either way; the report says so explicitly.
    NoIssuesDetected,
    Findings {
        red_flags: Vec<&'a RedFlag>,
        favorable_terms: &'a [FavorableTerm],
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NarrationPanel {
    Summary {
        text: String,
        confidence_percent: f64,
        model: String,
    },
    NotAvailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportView<'a> {
    pub title: String,
    pub score: ScoreCard<'a>,
    pub salary_display: Option<String>,
    pub salary_percentile: PercentileCard,
    pub notice_percentile: PercentileCard,
    pub distribution: Option<DistributionChart>,
    pub heatmap: Vec<HeatmapCell>,
    pub findings: FindingsPanel<'a>,
    pub negotiation: Vec<&'a NegotiationPoint>,
    pub narration: NarrationPanel,
    pub timings: Vec<(&'static str, String)>,
}

impl<'a> ReportView<'a> {
    pub fn build(result: &'a AnalyzeResult) -> Self {
        let scoring = &result.scoring;
        let band = score_band(scoring.overall_score);
        let salary = result.extraction.salary();

        let findings = if result.has_findings() {
            FindingsPanel::Findings {
                red_flags: order_red_flags(&result.red_flags),
                favorable_terms: &result.favorable_terms,
            }
        } else {
            FindingsPanel::NoIssuesDetected
        };

        let narration = match &result.narration {
            Some(n) => NarrationPanel::Summary {
                text: n.summary.clone(),
                confidence_percent: (n.confidence.clamp(0.0, 1.0) * 100.0).round(),
                model: n.model.clone(),
            },
            None => NarrationPanel::NotAvailable,
        };

        let t = &result.timings;
        let timings = vec![
            ("Parse", format_duration_ms(t.parse_ms)),
            ("Extract", format_duration_ms(t.extract_ms)),
            ("Benchmark", format_duration_ms(t.benchmark_ms)),
            ("RAG", format_duration_ms(t.rag_ms)),
            ("Total", format_duration_ms(t.total_ms)),
        ];

        Self {
            title: result.title(),
            score: ScoreCard {
                score: scoring.overall_score,
                score_display: format_number(scoring.overall_score),
                grade: scoring.grade.as_str(),
                band,
                band_label: band.label(),
                color_class: band.color_class(),
                confidence_percent: (scoring.score_confidence.clamp(0.0, 1.0) * 100.0).round(),
                formula: &scoring.score_formula,
                breakdown: &scoring.breakdown,
                badges: &scoring.badges,
            },
            salary_display: salary.map(format_lakhs),
            salary_percentile: PercentileCard::build(result.percentiles.salary.as_ref(), false),
            notice_percentile: PercentileCard::build(
                result.percentiles.notice_period.as_ref(),
                true,
            ),
            distribution: result
                .benchmark
                .as_ref()
                .and_then(|b| DistributionChart::build(b, salary)),
            heatmap: risk_heatmap(&result.extraction),
            findings,
            negotiation: order_negotiation_points(&result.negotiation_points),
            narration,
            timings,
        }
    }
}
