//! Result ordering and reason normalization

use super::types::MatchReason;
use crate::model::{EntityId, EntityKind};

/// Sort key of one hit; smaller sorts first
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct RankKey {
    tier: u8,
    name: String,
    id: EntityId,
}

impl RankKey {
    /// Exact name, then name prefix, then exact-name reason, then name
    /// substring, then the remaining reasons by strength
    pub(crate) fn new(id: EntityId, name_lower: &str, query: &str, reason: MatchReason) -> Self {
        let tier = if name_lower == query {
            1
        } else if name_lower.starts_with(query) {
            2
        } else if reason == MatchReason::NameExact {
            3
        } else if name_lower.contains(query) {
            4
        } else {
            5 + reason.priority().saturating_sub(1)
        };

        Self {
            tier,
            name: name_lower.to_string(),
            id,
        }
    }
}

/// Map a reason that does not fit the entity's category onto the closest
/// name-based reason
///
/// Parameter matches only make sense on functions and member matches only on
/// classes/structs.
pub(crate) fn normalize_reason(
    kind: EntityKind,
    name_lower: &str,
    query: &str,
    reason: MatchReason,
) -> MatchReason {
    match reason {
        MatchReason::Param if kind != EntityKind::Function => {
            if kind.is_type_like() {
                if name_lower == query {
                    MatchReason::NameExact
                } else if name_lower.contains(query) {
                    MatchReason::NamePartial
                } else {
                    MatchReason::Member
                }
            } else {
                MatchReason::NamePartial
            }
        }
        MatchReason::Member | MatchReason::MemberType if !kind.is_type_like() => {
            MatchReason::for_name(name_lower, query)
        }
        other => other,
    }
}
