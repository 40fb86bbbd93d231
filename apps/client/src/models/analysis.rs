//! Typed view of the analysis service's `/api/analyze` response.
//!
//! Optional sections (`percentiles`, `benchmark`, `narration`) are `Option`s and
//! list sections default to empty, so a sparse response still decodes. Each
//! nullable field has exactly one fallback, documented on the accessor that
//! applies it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    #[serde(alias = "REGEX")]
    Regex,
    #[serde(alias = "SNIPER_LLM")]
    SniperLlm,
    #[serde(alias = "LLM_FALLBACK")]
    LlmFallback,
    #[serde(alias = "MISSING")]
    Missing,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedField {
    #[serde(default)]
    pub value: Value,
    pub confidence: f64, // 0.0 – 1.0
    pub method: ExtractionMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl ExtractedField {
    /// Numeric value of the field. Numeric strings ("90") are accepted; anything
    /// else, including a `missing` extraction, is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        if self.method == ExtractionMethod::Missing {
            return None;
        }
        match &self.value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Extraction {
    #[serde(default)]
    pub role: Option<ExtractedField>,
    #[serde(default)]
    pub company_type: Option<ExtractedField>,
    #[serde(default)]
    pub experience_level: Option<ExtractedField>,
    #[serde(default)]
    pub ctc_inr: Option<ExtractedField>,
    #[serde(default)]
    pub notice_period_days: Option<ExtractedField>,
    #[serde(default)]
    pub bond_amount_inr: Option<ExtractedField>,
    #[serde(default)]
    pub non_compete_months: Option<ExtractedField>,
    #[serde(default)]
    pub probation_months: Option<ExtractedField>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub benefits_count: u32,
}

impl Extraction {
    pub fn salary(&self) -> Option<f64> {
        self.ctc_inr.as_ref().and_then(ExtractedField::as_f64)
    }

    pub fn notice_days(&self) -> Option<f64> {
        self.notice_period_days.as_ref().and_then(ExtractedField::as_f64)
    }

    pub fn non_compete_months(&self) -> Option<f64> {
        self.non_compete_months.as_ref().and_then(ExtractedField::as_f64)
    }

    pub fn bond_amount(&self) -> Option<f64> {
        self.bond_amount_inr.as_ref().and_then(ExtractedField::as_f64)
    }

    pub fn probation_months(&self) -> Option<f64> {
        self.probation_months.as_ref().and_then(ExtractedField::as_f64)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// The service's grade ladder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grade {
    #[serde(rename = "EXCEPTIONAL")]
    Exceptional,
    #[serde(rename = "EXCELLENT")]
    Excellent,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "FAIR")]
    Fair,
    #[serde(rename = "AVERAGE")]
    Average,
    #[serde(rename = "BELOW AVERAGE", alias = "BELOW_AVERAGE")]
    BelowAverage,
    #[serde(rename = "POOR")]
    Poor,
    #[serde(rename = "CRITICAL")]
    Critical,
    #[serde(other)]
    Unknown,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exceptional => "EXCEPTIONAL",
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Average => "AVERAGE",
            Self::BelowAverage => "BELOW AVERAGE",
            Self::Poor => "POOR",
            Self::Critical => "CRITICAL",
            Self::Unknown => "UNGRADED",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdownItem {
    pub factor: String,
    pub points: f64, // positive = bonus, negative = penalty
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scoring {
    pub overall_score: f64, // 0 – 100
    pub grade: Grade,
    #[serde(default)]
    pub safety_score: f64,
    #[serde(default)]
    pub market_fairness_score: f64,
    #[serde(default)]
    pub score_formula: String,
    #[serde(default)]
    pub breakdown: Vec<ScoreBreakdownItem>,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub score_confidence: f64, // 0.0 – 1.0
}

// ────────────────────────────────────────────────────────────────────────────
// Benchmarking
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PercentileResult {
    pub value: f64,
    pub field_display: String,
    pub insight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohort_size: Option<u32>,
}

/// Percentile rank of the contract's values within the cohort. The service
/// sends a map; only the two fields the report shows are typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Percentiles {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<PercentileResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_period: Option<PercentileResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Benchmark {
    pub market_median: f64,
    pub market_p25: f64,
    pub market_p75: f64,
    pub cohort_size: u32,
    #[serde(default)]
    pub filters_used: BTreeMap<String, Value>,
    #[serde(default)]
    pub broaden_steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Findings
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedFlag {
    pub id: String,
    pub severity: Severity,
    pub rule: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_context: Option<String>,
    pub recommendation: String,
    pub impact_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavorableTerm {
    pub id: String,
    pub term: String,
    pub explanation: String,
    pub value: String,
    pub impact_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_context: Option<String>,
}

/// Coarse odds the service attaches to a negotiation point.
///
/// The service writes free text ("Medium (50%)", "Likely achievable"), so the
/// label is normalised on its leading word: low/medium/high map directly,
/// "likely" reads as High and anything else as Medium.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum SuccessProbability {
    Low,
    Medium,
    High,
}

impl From<String> for SuccessProbability {
    fn from(label: String) -> Self {
        let lower = label.trim().to_lowercase();
        let first = lower.split_whitespace().next().unwrap_or("");
        match first {
            "low" => Self::Low,
            "high" | "likely" => Self::High,
            _ => Self::Medium,
        }
    }
}

impl From<SuccessProbability> for String {
    fn from(p: SuccessProbability) -> Self {
        match p {
            SuccessProbability::Low => "Low",
            SuccessProbability::Medium => "Medium",
            SuccessProbability::High => "High",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NegotiationPoint {
    pub id: String,
    pub priority: i32,
    pub topic: String,
    pub current_term: String,
    pub target_term: String,
    pub rationale: String,
    pub success_probability: SuccessProbability,
    pub script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Meta
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Narration {
    pub summary: String,
    pub confidence: f64,
    pub model: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Timings {
    pub parse_ms: f64,
    pub extract_ms: f64,
    pub benchmark_ms: f64,
    pub rag_ms: f64,
    #[serde(default)]
    pub scoring_ms: f64,
    #[serde(default)]
    pub narration_ms: f64,
    pub total_ms: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContractMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Full analysis result. Immutable once received.
///
/// The typed fields cover what the report reads. The response body itself is
/// kept alongside so an export carries every field the service sent, verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResult {
    pub extraction: Extraction,
    pub scoring: Scoring,
    #[serde(default)]
    pub percentiles: Percentiles,
    #[serde(default)]
    pub red_flags: Vec<RedFlag>,
    #[serde(default)]
    pub favorable_terms: Vec<FavorableTerm>,
    #[serde(default)]
    pub negotiation_points: Vec<NegotiationPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration: Option<Narration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Benchmark>,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default)]
    pub contract_metadata: ContractMetadata,
    #[serde(skip)]
    raw: Value,
}

impl AnalyzeResult {
    /// Decodes a response body and keeps the body for export.
    pub fn from_json(body: Value) -> Result<Self, serde_json::Error> {
        let mut result: AnalyzeResult = serde_json::from_value(body.clone())?;
        result.raw = body;
        Ok(result)
    }

    /// The response exactly as received. `None` for results not built from a
    /// response body.
    pub fn raw(&self) -> Option<&Value> {
        (!self.raw.is_null()).then_some(&self.raw)
    }

    /// Title for the report header. Falls back to "Employment Contract".
    pub fn title(&self) -> String {
        match (
            self.contract_metadata.role_title.as_deref(),
            self.contract_metadata.company_name.as_deref(),
        ) {
            (Some(role), Some(company)) => format!("{role} at {company}"),
            (Some(role), None) => role.to_string(),
            (None, Some(company)) => format!("Contract with {company}"),
            (None, None) => "Employment Contract".to_string(),
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.red_flags.is_empty() || !self.favorable_terms.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_full_response_decodes() {
        let result = sample_result();
        assert_eq!(result.scoring.grade, Grade::Fair);
        assert_eq!(result.red_flags.len(), 2);
        assert_eq!(result.negotiation_points.len(), 3);
        assert!(result.benchmark.is_some());
        assert_eq!(
            result.percentiles.salary.as_ref().map(|p| p.value),
            Some(62.0)
        );
    }

    #[test]
    fn test_sparse_response_decodes_with_fallbacks() {
        let result = bare_result();
        assert!(result.red_flags.is_empty());
        assert!(result.narration.is_none());
        assert!(result.benchmark.is_none());
        assert!(result.percentiles.salary.is_none());
        assert_eq!(result.title(), "Employment Contract");
        assert!(!result.has_findings());
    }

    #[test]
    fn test_extracted_values() {
        let result = sample_result();
        assert_eq!(result.extraction.salary(), Some(1_800_000.0));
        assert_eq!(result.extraction.notice_days(), Some(90.0));
        // numeric string
        assert_eq!(result.extraction.non_compete_months(), Some(12.0));
        // method = missing
        assert_eq!(result.extraction.bond_amount(), None);
    }

    #[test]
    fn test_success_probability_normalisation() {
        assert_eq!(
            SuccessProbability::from("Medium (50%)".to_string()),
            SuccessProbability::Medium
        );
        assert_eq!(
            SuccessProbability::from("Low (30%)".to_string()),
            SuccessProbability::Low
        );
        assert_eq!(
            SuccessProbability::from("Likely achievable".to_string()),
            SuccessProbability::High
        );
        assert_eq!(
            SuccessProbability::from("Worth trying".to_string()),
            SuccessProbability::Medium
        );
    }

    #[test]
    fn test_unknown_grade_does_not_fail_decode() {
        let scoring: Scoring =
            serde_json::from_str(r#"{"overall_score": 50, "grade": "MYSTERY"}"#).unwrap();
        assert_eq!(scoring.grade, Grade::Unknown);
        let scoring: Scoring =
            serde_json::from_str(r#"{"overall_score": 45, "grade": "BELOW AVERAGE"}"#).unwrap();
        assert_eq!(scoring.grade, Grade::BelowAverage);
    }

    #[test]
    fn test_title_variants() {
        let mut result = bare_result();
        result.contract_metadata.company_name = Some("Acme".to_string());
        assert_eq!(result.title(), "Contract with Acme");
        result.contract_metadata.role_title = Some("SDE II".to_string());
        assert_eq!(result.title(), "SDE II at Acme");
    }
}
