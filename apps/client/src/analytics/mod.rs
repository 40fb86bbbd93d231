// Derived analytics: pure transforms from raw result fields to values the
// report can draw directly. Nothing in here performs I/O or holds state.

pub mod distribution;
pub mod format;
pub mod ordering;
pub mod percentile;
pub mod risk;
pub mod score_band;

pub use distribution::{closest_x, distribution_curve, DistributionPoint};
pub use ordering::{order_negotiation_points, order_red_flags};
pub use risk::{assess_risk, ClauseKind, RiskAssessment, RiskTier};
pub use score_band::{score_band, ScoreBand};
