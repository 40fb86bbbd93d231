use serde::Serialize;

/// Display band for an overall fairness score. Every view that shows a score
/// goes through [`score_band`] so the bands cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Self::Excellent => "score-excellent",
            Self::Good => "score-good",
            Self::Fair => "score-fair",
            Self::Poor => "score-poor",
            Self::Critical => "score-critical",
        }
    }
}

/// Bands are lower-bound inclusive: [80,100] Excellent, [60,80) Good,
/// [40,60) Fair, [20,40) Poor, [0,20) Critical. Out-of-range scores are
/// clamped first; NaN counts as 0.
pub fn score_band(score: f64) -> ScoreBand {
    let score = if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    };

    if score >= 80.0 {
        ScoreBand::Excellent
    } else if score >= 60.0 {
        ScoreBand::Good
    } else if score >= 40.0 {
        ScoreBand::Fair
    } else if score >= 20.0 {
        ScoreBand::Poor
    } else {
        ScoreBand::Critical
    }
}
