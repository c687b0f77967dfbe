//! Parent-link check
//!
//! Every division must carry a parent. Unless it is the "no parent"
//! sentinel, the parent must be the id of a division in the model.
//! Purely local: no ancestry walk, no cycle detection.

use crate::dataset::{DivisionModel, Issue, IssueLog, ParentRef};

use super::Check;

pub struct ParentLinkCheck;

impl Check for ParentLinkCheck {
    fn name(&self) -> &'static str {
        "PARENT_LINKS"
    }

    fn run(&self, model: &DivisionModel, issues: &mut IssueLog) {
        for division in model {
            match &division.parent {
                ParentRef::Absent => issues.push(Issue::missing_parent(&division.context())),
                ParentRef::NoParent => {}
                ParentRef::Id(parent) => {
                    if !model.contains(parent) {
                        issues.push(Issue::dangling_parent(&division.context(), parent));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Division, IssueCode};

    fn run(model: &DivisionModel) -> IssueLog {
        let mut issues = IssueLog::new();
        ParentLinkCheck.run(model, &mut issues);
        issues
    }

    #[test]
    fn test_resolved_and_sentinel_parents_pass() {
        let model: DivisionModel = vec![
            Division::new("NO", "n.yaml").with_parent(ParentRef::NoParent),
            Division::new("NO-03", "n.yaml").with_parent(ParentRef::Id("NO".into())),
        ]
        .into_iter()
        .collect();

        assert!(run(&model).is_empty());
    }

    #[test]
    fn test_missing_parent() {
        let model: DivisionModel = vec![Division::new("A", "a.yaml")].into_iter().collect();
        let issues = run(&model);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.count_of(IssueCode::MissingParent), 1);
        assert_eq!(
            issues.iter().next().unwrap().message(),
            "a.yaml (A): missing parent reference"
        );
    }

    #[test]
    fn test_dangling_parent_reported_once() {
        let model: DivisionModel = vec![
            Division::new("A", "a.yaml").with_parent(ParentRef::Id("GHOST".into())),
        ]
        .into_iter()
        .collect();

        let issues = run(&model);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues.iter().next().unwrap().message(),
            "a.yaml (A): parent 'GHOST' not found in dataset"
        );
    }

    #[test]
    fn test_affirmative_token_must_resolve() {
        let model: DivisionModel = vec![
            Division::new("A", "a.yaml").with_parent(ParentRef::from_token("YES")),
        ]
        .into_iter()
        .collect();

        assert_eq!(run(&model).count_of(IssueCode::DanglingParent), 1);
    }
}
