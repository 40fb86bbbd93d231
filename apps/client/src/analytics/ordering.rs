use crate::models::analysis::{NegotiationPoint, RedFlag};

/// Negotiation playbook in display order: ascending priority, original order
/// kept between equal priorities.
pub fn order_negotiation_points(points: &[NegotiationPoint]) -> Vec<&NegotiationPoint> {
    let mut ordered: Vec<&NegotiationPoint> = points.iter().collect();
    ordered.sort_by_key(|p| p.priority); // stable
    ordered
}

/// Red flags from critical to low, original order kept within a severity.
pub fn order_red_flags(flags: &[RedFlag]) -> Vec<&RedFlag> {
    let mut ordered: Vec<&RedFlag> = flags.iter().collect();
    ordered.sort_by_key(|f| f.severity);
    ordered
}
