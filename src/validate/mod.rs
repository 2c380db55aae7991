//! Linter over a resolved plan.
//!
//! Every rule runs on its own and reports into one [`ValidationResult`].
//! Findings never abort resolution; errors are only flagged more loudly than
//! warnings.

mod rules;

use std::fmt;

use tracing::debug;

use crate::model::ResolvedPlan;

/// A validator rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    OverlappingOpenings,
    OpeningExceedsWall,
    SealedRoom,
    SealedExtension,
    FixtureOutOfBounds,
    RunThroughWall,
}

impl Rule {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OverlappingOpenings => "overlapping-openings",
            Self::OpeningExceedsWall => "opening-exceeds-wall",
            Self::SealedRoom => "sealed-room",
            Self::SealedExtension => "sealed-extension",
            Self::FixtureOutOfBounds => "fixture-out-of-bounds",
            Self::RunThroughWall => "run-through-wall",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub rule: Rule,
    pub message: String,
    /// Wall, room, extension, fixture, or run the finding is about.
    pub element_id: Option<String>,
}

impl ValidationIssue {
    fn new(rule: Rule, message: String, element_id: Option<&str>) -> Self {
        Self {
            rule,
            message,
            element_id: element_id.map(str::to_owned),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Returns `true` if any error-level finding was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Findings of one rule, errors first.
    pub fn issues(&self, rule: Rule) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(move |issue| issue.rule == rule)
    }
}

/// Runs every rule over `plan`.
#[must_use]
pub fn validate(plan: &ResolvedPlan) -> ValidationResult {
    let mut result = ValidationResult::default();
    rules::overlapping_openings(plan, &mut result.errors);
    rules::opening_exceeds_wall(plan, &mut result.errors);
    rules::sealed_rooms(plan, &mut result.warnings);
    rules::sealed_extensions(plan, &mut result.warnings);
    rules::fixtures_out_of_bounds(plan, &mut result.warnings);
    rules::runs_through_walls(plan, &mut result.warnings);
    debug!(
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated plan"
    );
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use crate::config::FloorPlanConfig;

    use super::*;

    fn validate_rooms(plan: serde_json::Value) -> ValidationResult {
        let mut plan = plan;
        plan["id"] = json!("p");
        let config: FloorPlanConfig =
            serde_json::from_value(json!({"project": {"title": "t"}, "plans": [plan]})).unwrap();
        crate::resolve(&config, None).unwrap().validation
    }

    fn door(position: f64, width: f64) -> serde_json::Value {
        json!({"type": "door", "width": width, "position": position})
    }

    #[test]
    fn overlapping_openings_reported_once() {
        let result = validate_rooms(json!({"rooms": [{
            "id": "a", "width": 12, "height": 10,
            "walls": {"south": {"openings": [door(2.0, 3.0), door(4.0, 3.0)]}}
        }]}));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].rule, Rule::OverlappingOpenings);
        assert_eq!(result.errors[0].element_id.as_deref(), Some("a.south"));
        assert!(result.has_errors());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn adjacent_openings_are_fine() {
        let result = validate_rooms(json!({"rooms": [{
            "id": "a", "width": 12, "height": 10,
            "walls": {"south": {"openings": [door(2.0, 3.0), door(5.0, 3.0)]}}
        }]}));
        assert!(!result.has_errors());
    }

    #[test]
    fn sealed_room_warns_once() {
        let result = validate_rooms(json!({"rooms": [{"id": "a", "width": 12, "height": 10}]}));
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].rule, Rule::SealedRoom);
        assert_eq!(result.warnings[0].element_id.as_deref(), Some("a"));
    }

    #[test]
    fn shared_door_opens_both_rooms() {
        let result = validate_rooms(json!({"rooms": [
            {"id": "a", "width": 12, "height": 10,
             "walls": {"east": {"type": "interior", "openings": [door(3.0, 3.0)]}, "south": {"openings": [door(1.0, 3.0)]}}},
            {"id": "b", "width": 8, "height": 10, "adjacent_to": {"room": "a", "wall": "east"},
             "walls": {"west": {"type": "interior"}}}
        ]}));
        assert_eq!(result.issues(Rule::SealedRoom).count(), 0);
    }

    #[test]
    fn sealed_extension_warns() {
        let result = validate_rooms(json!({"rooms": [{
            "id": "a", "width": 12, "height": 10,
            "walls": {"south": {"openings": [door(1.0, 3.0)]}},
            "extensions": [{"id": "bay", "wall": "north", "offset": 4, "width": 4, "depth": 2}]
        }]}));
        let sealed: Vec<_> = result.issues(Rule::SealedExtension).collect();
        assert_eq!(sealed.len(), 1);
        assert_eq!(sealed[0].element_id.as_deref(), Some("bay"));
    }

    #[test]
    fn fixture_outside_rooms_warns() {
        let result = validate_rooms(json!({
            "rooms": [{"id": "a", "width": 12, "height": 10, "walls": {"south": {"openings": [door(1.0, 3.0)]}}}],
            "plumbing": {"fixtures": [
                {"id": "sink", "type": "sink", "position": [3, 3]},
                {"id": "tap", "type": "hose-bib", "position": [20, 3]}
            ]}
        }));
        let out: Vec<_> = result.issues(Rule::FixtureOutOfBounds).collect();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].element_id.as_deref(), Some("tap"));
    }

    #[test]
    fn run_through_solid_wall_warns() {
        let result = validate_rooms(json!({
            "rooms": [{"id": "a", "width": 12, "height": 10, "walls": {"south": {"openings": [door(1.0, 3.0)]}}}],
            "plumbing": {
                "supply_runs": [{"id": "cold", "path": [[6, 5], [6, -3]]}],
                "drain_runs": [{"id": "waste", "path": [[2.5, 5], [2.5, -3]]}]
            }
        }));
        let through: Vec<_> = result.issues(Rule::RunThroughWall).collect();
        assert_eq!(through.len(), 1);
        assert_eq!(through[0].element_id.as_deref(), Some("cold"));
    }
}
