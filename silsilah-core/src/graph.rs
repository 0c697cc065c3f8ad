//! Read-only per-request index over a family snapshot.

use std::collections::HashMap;

use crate::family::Family;
use crate::member::{Member, MemberId};

/// Queryable structure over the flat member list: O(1) lookup by id and by
/// children-of-id.
///
/// The graph exposes no mutation capability; it is built once per request
/// and all writes go through the record store after core computation
/// completes. Id collisions index last-write-wins.
#[derive(Debug)]
pub struct FamilyGraph<'a> {
    by_id: HashMap<MemberId, &'a Member>,
    children: HashMap<MemberId, Vec<&'a Member>>,
}

impl<'a> FamilyGraph<'a> {
    /// Index a family snapshot.
    pub fn new(family: &'a Family) -> Self {
        let mut by_id = HashMap::with_capacity(family.len());
        let mut children: HashMap<MemberId, Vec<&'a Member>> = HashMap::new();

        for member in family.iter() {
            by_id.insert(member.id, member);
            for parent_id in [member.parent1_id, member.parent2_id].into_iter().flatten() {
                children.entry(parent_id).or_default().push(member);
            }
        }

        Self { by_id, children }
    }

    /// Look up a member by id.
    pub fn get(&self, id: MemberId) -> Option<&'a Member> {
        self.by_id.get(&id).copied()
    }

    /// Resolve a member's recorded parents, in slot order.
    ///
    /// A null or dangling reference resolves to `None`.
    pub fn parents_of(&self, member: &Member) -> (Option<&'a Member>, Option<&'a Member>) {
        (
            member.parent1_id.and_then(|id| self.get(id)),
            member.parent2_id.and_then(|id| self.get(id)),
        )
    }

    /// All members that record `id` as one of their parents.
    pub fn children_of(&self, id: MemberId) -> &[&'a Member] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
