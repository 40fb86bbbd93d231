use serde::Serialize;

/// Clamps a percentile into [0, 100]; NaN becomes 0.
pub fn clamp_percentile(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpretation {
    Excellent,
    AboveAverage,
    Average,
    BelowAverage,
    Poor,
}

impl Interpretation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::AboveAverage => "above_average",
            Self::Average => "average",
            Self::BelowAverage => "below_average",
            Self::Poor => "poor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::AboveAverage => "Above average",
            Self::Average => "Average",
            Self::BelowAverage => "Below average",
            Self::Poor => "Poor",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "above_average" => Some(Self::AboveAverage),
            "average" => Some(Self::Average),
            "below_average" => Some(Self::BelowAverage),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

/// Reads a percentile the same way the service does. For lower-is-better
/// fields (notice period) the scale is inverted: a low percentile is good.
pub fn interpret_percentile(value: f64, lower_is_better: bool) -> Interpretation {
    let value = clamp_percentile(value);
    if lower_is_better {
        if value <= 20.0 {
            Interpretation::Excellent
        } else if value <= 40.0 {
            Interpretation::AboveAverage
        } else if value <= 60.0 {
            Interpretation::Average
        } else if value <= 80.0 {
            Interpretation::BelowAverage
        } else {
            Interpretation::Poor
        }
    } else if value >= 80.0 {
        Interpretation::Excellent
    } else if value >= 60.0 {
        Interpretation::AboveAverage
    } else if value >= 40.0 {
        Interpretation::Average
    } else if value >= 20.0 {
        Interpretation::BelowAverage
    } else {
        Interpretation::Poor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_percentile(-3.0), 0.0);
        assert_eq!(clamp_percentile(104.2), 100.0);
        assert_eq!(clamp_percentile(55.5), 55.5);
        assert_eq!(clamp_percentile(f64::NAN), 0.0);
    }

    #[test]
    fn test_higher_is_better() {
        assert_eq!(interpret_percentile(80.0, false), Interpretation::Excellent);
        assert_eq!(interpret_percentile(62.0, false), Interpretation::AboveAverage);
        assert_eq!(interpret_percentile(40.0, false), Interpretation::Average);
        assert_eq!(interpret_percentile(25.0, false), Interpretation::BelowAverage);
        assert_eq!(interpret_percentile(5.0, false), Interpretation::Poor);
    }

    #[test]
    fn test_lower_is_better() {
        assert_eq!(interpret_percentile(20.0, true), Interpretation::Excellent);
        assert_eq!(interpret_percentile(85.0, true), Interpretation::Poor);
        assert_eq!(interpret_percentile(50.0, true), Interpretation::Average);
    }

    #[test]
    fn test_parse_round_trips_wire_names() {
        for i in [
            Interpretation::Excellent,
            Interpretation::AboveAverage,
            Interpretation::Average,
            Interpretation::BelowAverage,
            Interpretation::Poor,
        ] {
            assert_eq!(Interpretation::parse(i.as_str()), Some(i));
        }
        assert_eq!(Interpretation::parse("stellar"), None);
    }
}
