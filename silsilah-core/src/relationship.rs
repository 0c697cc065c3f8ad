//! Relationship inference relative to a target member.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::family::Family;
use crate::graph::FamilyGraph;
use crate::member::{Member, MemberId};

/// Sentinel display name for ids that cannot be resolved to a member.
pub const UNKNOWN_NAME: &str = "Unknown";

/// How a member relates to the classification target.
///
/// The classifier's rules are shallow single-hop structural checks; any
/// relation outside this set (cousins, great-grandparents, in-laws) is
/// simply absent from its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    /// The target is one of the member's recorded parents.
    Child,
    /// The target sits two generations above, through a parent's
    /// `parent1_id` line.
    Grandchild,
    /// The target is a recorded parent of the member's first parent.
    NieceNephew,
    /// The member shares the target's `parent1_id`.
    Sibling,
}

impl Relation {
    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Relation::Child => "child",
            Relation::Grandchild => "grandchild",
            Relation::NieceNephew => "niece/nephew",
            Relation::Sibling => "sibling",
        }
    }
}

/// Classify every other member of the family relative to `target`.
///
/// Rules are evaluated in priority order for each candidate member; the
/// first match wins:
///
/// 1. `Child` — the target is one of the candidate's recorded parents.
/// 2. `Grandchild` — the target is the `parent1_id` of either of the
///    candidate's recorded parents.
/// 3. `NieceNephew` — the target is a recorded parent of the candidate's
///    first parent.
/// 4. `Sibling` — the candidate and the target share a non-null
///    `parent1_id`.
///
/// Rules 2-4 follow the `parent1_id` line only in places, so members
/// linked solely through `parent2_id` can go unlabeled; this matches the
/// recorded behavior of the system and is pinned by the test suite rather
/// than widened. The target itself never appears in the result, and
/// members matching no rule are omitted.
///
/// Every lookup goes through the family index and tolerates dangling
/// references. All checks are at most two hops deep and non-recursive, so
/// cyclic parent data cannot cause non-termination. One pass over the
/// family, O(1) per candidate.
pub fn classify(family: &Family, target: MemberId) -> HashMap<MemberId, Relation> {
    let graph = FamilyGraph::new(family);
    let target_parent1 = graph.get(target).and_then(|m| m.parent1_id);

    let mut relations = HashMap::new();
    for member in family.iter() {
        if member.id == target {
            continue;
        }
        if let Some(relation) = classify_one(&graph, member, target, target_parent1) {
            relations.insert(member.id, relation);
        }
    }
    relations
}

fn classify_one(
    graph: &FamilyGraph<'_>,
    member: &Member,
    target: MemberId,
    target_parent1: Option<MemberId>,
) -> Option<Relation> {
    if member.parent1_id == Some(target) || member.parent2_id == Some(target) {
        return Some(Relation::Child);
    }

    let grandparent1 =
        |parent: Option<MemberId>| parent.and_then(|id| graph.get(id)).and_then(|p| p.parent1_id);
    if grandparent1(member.parent1_id) == Some(target)
        || grandparent1(member.parent2_id) == Some(target)
    {
        return Some(Relation::Grandchild);
    }

    if let Some(first_parent) = member.parent1_id.and_then(|id| graph.get(id)) {
        if first_parent.parent1_id == Some(target) || first_parent.parent2_id == Some(target) {
            return Some(Relation::NieceNephew);
        }
    }

    if member.parent1_id.is_some() && member.parent1_id == target_parent1 {
        return Some(Relation::Sibling);
    }

    None
}

/// One relationship query result row: the related member's identity plus
/// the inferred relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationEntry {
    pub id: MemberId,
    pub name: String,
    pub relationship: Relation,
}

/// Shape a classification mapping for presentation, resolving names
/// through the family.
///
/// An id that cannot be resolved gets the [`UNKNOWN_NAME`] sentinel
/// instead of failing the whole request. Entries are ordered by member id.
pub fn relation_entries(
    family: &Family,
    relations: &HashMap<MemberId, Relation>,
) -> Vec<RelationEntry> {
    let graph = FamilyGraph::new(family);
    let mut entries: Vec<RelationEntry> = relations
        .iter()
        .map(|(&id, &relationship)| RelationEntry {
            id,
            name: graph
                .get(id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            relationship,
        })
        .collect();
    entries.sort_by_key(|entry| entry.id);
    entries
}

/// Classify relative to `target` and shape the result in one step.
pub fn describe_relationships(family: &Family, target: MemberId) -> Vec<RelationEntry> {
    relation_entries(family, &classify(family, target))
}
