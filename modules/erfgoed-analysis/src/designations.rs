//! Protection status of a heritage object, derived from its designation relations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use erfgoed_common::{DesignationType, HeritageObject};

use crate::validity::is_valid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionSummary {
    /// Valid designations of any type.
    pub designated: u32,
    pub legally_protected: u32,
    pub formally_listed: u32,
    pub landscape_heritage: u32,
    /// Unesco core and buffer zones together.
    pub unesco: u32,
    pub monument: u32,
    pub cityscape: u32,
    pub landscape: u32,
    pub site: u32,
    pub transition_zone: u32,
    /// Legal protections that are not in force on the evaluation date.
    pub invalid_protections: u32,
    pub only_monument: bool,
    pub only_cityscape: bool,
    pub only_landscape: bool,
}

/// Classify the designation relations of `object` as of `at`.
///
/// The three `only_*` flags are not complementary: an object carrying a
/// monument, a cityscape and a landscape designation gets `false` for all
/// three.
pub fn classify(object: &HeritageObject, at: NaiveDate) -> ProtectionSummary {
    let mut summary = ProtectionSummary::default();

    for relation in object.relations.iter().filter(|r| r.is_designation()) {
        if !is_valid(relation, at) {
            if relation.legal_protection {
                summary.invalid_protections += 1;
            }
            continue;
        }

        summary.designated += 1;
        if relation.legal_protection {
            summary.legally_protected += 1;
        }
        if relation.formal_listing {
            summary.formally_listed += 1;
        }

        let Some(ref kind) = relation.designation_type else {
            continue;
        };
        if kind.is_unesco() {
            summary.unesco += 1;
        } else if kind.is_cityscape() {
            summary.cityscape += 1;
        } else {
            match kind {
                DesignationType::LandscapeHeritage => summary.landscape_heritage += 1,
                DesignationType::Monument => summary.monument += 1,
                DesignationType::CulturalLandscape => summary.landscape += 1,
                DesignationType::ArchaeologicalSite => summary.site += 1,
                DesignationType::TransitionZone => summary.transition_zone += 1,
                _ => tracing::debug!(
                    object = object.uri.as_str(),
                    designation = %kind,
                    "Uncategorised designation type"
                ),
            }
        }
    }

    summary.only_monument =
        summary.monument > 0 && summary.cityscape == 0 && summary.landscape == 0;
    summary.only_cityscape =
        summary.cityscape > 0 && summary.monument == 0 && summary.landscape == 0;
    summary.only_landscape =
        summary.landscape > 0 && summary.cityscape == 0 && summary.monument == 0;

    summary
}
