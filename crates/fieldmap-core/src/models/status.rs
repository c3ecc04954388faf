//! Per-image work status.

use crate::error::{FieldmapError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Completion state assigned by the user to one photo.
///
/// Ordered by priority: `NotDone < Partial < Done`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WorkStatus {
    #[default]
    #[serde(alias = "Não concluído", alias = "NotDone")]
    NotDone,
    #[serde(alias = "Parcial", alias = "Partial")]
    Partial,
    #[serde(alias = "Concluído", alias = "Done")]
    Done,
}

impl WorkStatus {
    pub const ALL: [WorkStatus; 3] = [WorkStatus::NotDone, WorkStatus::Partial, WorkStatus::Done];

    pub fn priority(self) -> u8 {
        match self {
            WorkStatus::NotDone => 1,
            WorkStatus::Partial => 2,
            WorkStatus::Done => 3,
        }
    }

    /// Merge another status into this one; never lowers the priority.
    pub fn merge(self, other: WorkStatus) -> WorkStatus {
        if other.priority() > self.priority() {
            other
        } else {
            self
        }
    }

    /// Quick toggle used by list views: anything unfinished becomes `Done`,
    /// `Done` goes back to `NotDone`.
    pub fn toggled(self) -> WorkStatus {
        match self {
            WorkStatus::Done => WorkStatus::NotDone,
            WorkStatus::NotDone | WorkStatus::Partial => WorkStatus::Done,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkStatus::NotDone => "not_done",
            WorkStatus::Partial => "partial",
            WorkStatus::Done => "done",
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkStatus::NotDone => "Not done",
            WorkStatus::Partial => "Partial",
            WorkStatus::Done => "Done",
        };
        f.write_str(label)
    }
}

impl FromStr for WorkStatus {
    type Err = FieldmapError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "not_done" | "notdone" | "não_concluído" | "nao_concluido" => Ok(WorkStatus::NotDone),
            "partial" | "parcial" => Ok(WorkStatus::Partial),
            "done" | "concluído" | "concluido" => Ok(WorkStatus::Done),
            _ => Err(FieldmapError::ConfigInvalid {
                key: "work_status".to_string(),
                reason: format!("Invalid work status: {}. Use done, partial, or not_done", s),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn merge_all(statuses: &[WorkStatus]) -> WorkStatus {
        let (first, rest) = statuses.split_first().unwrap();
        rest.iter().fold(*first, |acc, s| acc.merge(*s))
    }

    #[test]
    fn test_merge_picks_highest_priority() {
        let statuses =
            [WorkStatus::NotDone, WorkStatus::Partial, WorkStatus::Done, WorkStatus::NotDone];
        assert_eq!(merge_all(&statuses), WorkStatus::Done);
    }

    #[test]
    fn test_merge_never_regresses() {
        assert_eq!(WorkStatus::Done.merge(WorkStatus::NotDone), WorkStatus::Done);
        assert_eq!(WorkStatus::Partial.merge(WorkStatus::NotDone), WorkStatus::Partial);
        assert_eq!(WorkStatus::NotDone.merge(WorkStatus::Partial), WorkStatus::Partial);
    }

    #[test]
    fn test_merge_is_order_independent_for_all_permutations() {
        let multiset =
            [WorkStatus::NotDone, WorkStatus::Partial, WorkStatus::Done, WorkStatus::NotDone];
        let mut indices = [0usize, 1, 2, 3];
        let expected = merge_all(&multiset);

        // Heap's algorithm over the four positions.
        let mut c = [0usize; 4];
        let mut seen = 1;
        let mut i = 0;
        while i < 4 {
            if c[i] < i {
                if i % 2 == 0 {
                    indices.swap(0, i);
                } else {
                    indices.swap(c[i], i);
                }
                let permuted: Vec<WorkStatus> = indices.iter().map(|&k| multiset[k]).collect();
                assert_eq!(merge_all(&permuted), expected);
                seen += 1;
                c[i] += 1;
                i = 0;
            } else {
                c[i] = 0;
                i += 1;
            }
        }
        assert_eq!(seen, 24);
    }

    #[test]
    fn test_toggle() {
        assert_eq!(WorkStatus::NotDone.toggled(), WorkStatus::Done);
        assert_eq!(WorkStatus::Partial.toggled(), WorkStatus::Done);
        assert_eq!(WorkStatus::Done.toggled(), WorkStatus::NotDone);
    }

    #[test]
    fn test_parse() {
        assert_eq!("done".parse::<WorkStatus>().unwrap(), WorkStatus::Done);
        assert_eq!("Not done".parse::<WorkStatus>().unwrap(), WorkStatus::NotDone);
        assert_eq!("Concluído".parse::<WorkStatus>().unwrap(), WorkStatus::Done);
        assert_eq!("Não concluído".parse::<WorkStatus>().unwrap(), WorkStatus::NotDone);
        assert_eq!("PARCIAL".parse::<WorkStatus>().unwrap(), WorkStatus::Partial);
        assert!("finished".parse::<WorkStatus>().is_err());
    }

    #[test]
    fn test_serde_aliases() {
        let parsed: WorkStatus = serde_json::from_str("\"Concluído\"").unwrap();
        assert_eq!(parsed, WorkStatus::Done);
        let parsed: WorkStatus = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(parsed, WorkStatus::Partial);
        assert_eq!(serde_json::to_string(&WorkStatus::NotDone).unwrap(), "\"not_done\"");
    }

    fn any_status() -> impl Strategy<Value = WorkStatus> {
        prop_oneof![Just(WorkStatus::NotDone), Just(WorkStatus::Partial), Just(WorkStatus::Done)]
    }

    proptest! {
        #[test]
        fn prop_merge_equals_max(statuses in proptest::collection::vec(any_status(), 1..20)) {
            let expected = *statuses.iter().max().unwrap();
            prop_assert_eq!(merge_all(&statuses), expected);

            let mut reversed = statuses.clone();
            reversed.reverse();
            prop_assert_eq!(merge_all(&reversed), expected);
        }
    }
}
