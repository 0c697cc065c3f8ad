//! The family: an ordered collection of member records.

use serde::{Deserialize, Serialize};

use crate::error::FamilyError;
use crate::member::{Member, MemberDraft, MemberId, MemberUpdate};

/// The full ordered set of members under management.
///
/// Mutations operate on an in-memory snapshot; persistence belongs to the
/// record store, and callers write the whole snapshot back after core
/// computation completes. Two concurrent writers can still race at the
/// store level, so the load-mutate-save sequence must run inside one
/// critical section or conditional write supplied by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Family {
    members: Vec<Member>,
}

impl Family {
    /// Create an empty family.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a family from existing member records.
    pub fn from_members(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// All members, in record order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Iterate over members in record order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the family has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Find a member by id with a linear scan.
    ///
    /// Request-scoped code performing many lookups should build a
    /// [`FamilyGraph`](crate::graph::FamilyGraph) instead.
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Append a member record directly.
    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Validate a draft and append the resulting member.
    ///
    /// Duplicate ids are not rejected; indexed lookups over a family with
    /// colliding ids are last-write-wins.
    pub fn add(&mut self, draft: MemberDraft) -> Result<MemberId, FamilyError> {
        let member = draft.validate()?;
        let id = member.id;
        self.members.push(member);
        Ok(id)
    }

    /// Overwrite fields of an existing member.
    pub fn update(&mut self, id: MemberId, patch: &MemberUpdate) -> Result<(), FamilyError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(FamilyError::NotFound { id })?;
        patch.apply(member);
        Ok(())
    }

    /// Remove a member by id, returning the removed record.
    ///
    /// The family is left unchanged when the id is unknown.
    pub fn remove(&mut self, id: MemberId) -> Result<Member, FamilyError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(FamilyError::NotFound { id })?;
        Ok(self.members.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(id: i64, name: &str, role: &str) -> MemberDraft {
        MemberDraft {
            id: Some(MemberId(id)),
            name: Some(name.to_string()),
            role: Some(role.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_validates_and_appends() {
        let mut family = Family::new();

        let id = family.add(draft(1, "Budi", "kakek")).expect("valid draft");
        assert_eq!(id, MemberId(1));
        assert_eq!(family.len(), 1);

        let invalid = MemberDraft {
            name: Some("Anon".to_string()),
            ..Default::default()
        };
        assert_eq!(
            family.add(invalid),
            Err(FamilyError::MissingField { field: "id" })
        );
        assert_eq!(family.len(), 1);
    }

    #[test]
    fn test_add_permits_duplicate_ids() {
        let mut family = Family::new();
        family.add(draft(1, "Budi", "kakek")).unwrap();
        family.add(draft(1, "Lain", "nenek")).unwrap();

        assert_eq!(family.len(), 2);
    }

    #[test]
    fn test_update_overwrites_fields() {
        let mut family = Family::from_members(vec![Member::new(2, "Agus", "bapak")]);

        family
            .update(MemberId(2), &MemberUpdate::new().with_role("ayah"))
            .expect("member exists");
        assert_eq!(family.get(MemberId(2)).unwrap().role, "ayah");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut family = Family::new();
        assert_eq!(
            family.update(MemberId(9), &MemberUpdate::new().with_name("X")),
            Err(FamilyError::NotFound { id: MemberId(9) })
        );
    }

    #[test]
    fn test_remove_returns_member() {
        let mut family = Family::from_members(vec![
            Member::new(1, "Budi", "kakek"),
            Member::new(2, "Agus", "bapak").with_parent1(1),
        ]);

        let removed = family.remove(MemberId(1)).expect("member exists");
        assert_eq!(removed.name, "Budi");
        assert_eq!(family.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_leaves_family_unchanged() {
        let mut family = Family::from_members(vec![Member::new(1, "Budi", "kakek")]);
        let before = family.clone();

        assert_eq!(
            family.remove(MemberId(99)),
            Err(FamilyError::NotFound { id: MemberId(99) })
        );
        assert_eq!(family, before);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let family = Family::from_members(vec![Member::new(1, "Budi", "kakek")]);
        let json = serde_json::to_value(&family).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["role"], "kakek");
    }
}
