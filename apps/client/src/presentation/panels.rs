use std::collections::BTreeSet;

/// Which report panels are expanded.
///
/// Report sections (score breakdown, evidence, timings) open independently.
/// Negotiation points behave as an accordion: opening one closes the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    sections: BTreeSet<String>,
    negotiation_point: Option<String>,
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the section is expanded after the toggle.
    pub fn toggle_section(&mut self, section: &str) -> bool {
        if self.sections.remove(section) {
            false
        } else {
            self.sections.insert(section.to_string());
            true
        }
    }

    pub fn is_section_expanded(&self, section: &str) -> bool {
        self.sections.contains(section)
    }

    /// Returns whether the point is expanded after the toggle.
    pub fn toggle_negotiation_point(&mut self, id: &str) -> bool {
        if self.negotiation_point.as_deref() == Some(id) {
            self.negotiation_point = None;
            false
        } else {
            self.negotiation_point = Some(id.to_string());
            true
        }
    }

    pub fn expanded_negotiation_point(&self) -> Option<&str> {
        self.negotiation_point.as_deref()
    }

    pub fn collapse_all(&mut self) {
        self.sections.clear();
        self.negotiation_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_toggle_independently() {
        let mut panels = PanelState::new();
        assert!(panels.toggle_section("breakdown"));
        assert!(panels.toggle_section("timings"));
        assert!(panels.is_section_expanded("breakdown"));
        assert!(!panels.toggle_section("breakdown"));
        assert!(!panels.is_section_expanded("breakdown"));
        assert!(panels.is_section_expanded("timings"));
    }

    #[test]
    fn test_negotiation_points_are_an_accordion() {
        let mut panels = PanelState::new();
        assert!(panels.toggle_negotiation_point("np1"));
        assert!(panels.toggle_negotiation_point("np2"));
        assert_eq!(panels.expanded_negotiation_point(), Some("np2"));
        assert!(!panels.toggle_negotiation_point("np2"));
        assert_eq!(panels.expanded_negotiation_point(), None);
    }

    #[test]
    fn test_collapse_all() {
        let mut panels = PanelState::new();
        panels.toggle_section("breakdown");
        panels.toggle_negotiation_point("np1");
        panels.collapse_all();
        assert_eq!(panels, PanelState::new());
    }
}
