//! Timeline check
//!
//! Incarnations of one base id must partition time without overlap. Gaps
//! are fine. Unrelated base ids never interact.
//!
//! Two passes, reported in this order:
//! 1. Inverted ranges (`from` after `to`), per division in scan order
//! 2. Overlaps, per base id in order of first appearance

use std::cmp::max;
use std::fmt;

use chrono::NaiveDate;

use crate::dataset::{Division, DivisionModel, Issue, IssueLog};

use super::Check;

/// Latest end seen so far while walking one lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    On(NaiveDate),
    /// An open-ended interval was seen; every later start collides
    Open,
}

impl End {
    fn covers(&self, start: NaiveDate) -> bool {
        match self {
            End::On(end) => start <= *end,
            End::Open => true,
        }
    }

    fn extend(current: Option<End>, next: Option<NaiveDate>) -> End {
        match (current, next) {
            (_, None) | (Some(End::Open), _) => End::Open,
            (Some(End::On(end)), Some(next)) => End::On(max(end, next)),
            (None, Some(next)) => End::On(next),
        }
    }
}

impl fmt::Display for End {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            End::On(date) => write!(f, "{}", date),
            End::Open => write!(f, "open-ended"),
        }
    }
}

pub struct TimelineCheck;

impl TimelineCheck {
    fn check_ranges(model: &DivisionModel, issues: &mut IssueLog) {
        for division in model {
            if let (true, Some(from), Some(to)) =
                (division.has_inverted_range(), division.valid_from, division.valid_to)
            {
                issues.push(Issue::inverted_range(&division.context(), from, to));
            }
        }
    }

    fn check_overlaps(base_id: &str, members: &mut [&Division], issues: &mut IssueLog) {
        members.sort_by_key(|d| {
            (
                d.valid_from.unwrap_or(NaiveDate::MIN),
                d.valid_to.unwrap_or(NaiveDate::MAX),
            )
        });

        let mut latest: Option<End> = None;
        for division in members.iter() {
            if let (Some(end), Some(start)) = (latest, division.valid_from) {
                if end.covers(start) {
                    issues.push(Issue::timeline_overlap(base_id, &division.context(), start, end));
                }
            }
            latest = Some(End::extend(latest, division.valid_to));
        }
    }
}

impl Check for TimelineCheck {
    fn name(&self) -> &'static str {
        "TIMELINE"
    }

    fn run(&self, model: &DivisionModel, issues: &mut IssueLog) {
        Self::check_ranges(model, issues);
        for mut lineage in model.lineages() {
            Self::check_overlaps(lineage.base_id, &mut lineage.members, issues);
        }
    }
}
