//! Lineage reciprocity check
//!
//! `was` and `became` are inverses: if A became B then B was A. Each
//! direction is checked on its own for every division, so a pair with both
//! links missing yields one issue from each side. Do not deduplicate.

use crate::dataset::{Division, DivisionModel, Issue, IssueLog, Relation};

use super::Check;

pub struct LineageCheck;

impl LineageCheck {
    fn check_relation(
        model: &DivisionModel,
        source: &Division,
        relation: Relation,
        issues: &mut IssueLog,
    ) {
        let counterpart = relation.counterpart();

        for target_id in source.relation(relation) {
            let Some(target) = model.get(target_id) else {
                issues.push(Issue::unknown_lineage_target(
                    &source.context(),
                    relation.field(),
                    target_id,
                ));
                continue;
            };

            if !target.relation(counterpart).iter().any(|id| *id == source.id) {
                issues.push(Issue::lineage_mismatch(
                    &source.context(),
                    relation.field(),
                    &target.context(),
                    counterpart.field(),
                ));
            }
        }
    }
}

impl Check for LineageCheck {
    fn name(&self) -> &'static str {
        "LINEAGE"
    }

    fn run(&self, model: &DivisionModel, issues: &mut IssueLog) {
        for division in model {
            Self::check_relation(model, division, Relation::Was, issues);
            Self::check_relation(model, division, Relation::Became, issues);
        }
    }
}
