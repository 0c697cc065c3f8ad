//! Member records and their creation/update payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FamilyError;

/// Unique identifier for a member of the family record.
///
/// The id is the sole identity and foreign key: parent references point at
/// other members' ids.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct MemberId(pub i64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// One person in the family record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier within the family.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Free-text familial role relative to the record owner (e.g. "kakek",
    /// "saya"). Used only for visual categorization, never for relationship
    /// logic.
    pub role: String,
    /// First recorded parent, if any.
    #[serde(default)]
    pub parent1_id: Option<MemberId>,
    /// Second recorded parent, if any.
    #[serde(default)]
    pub parent2_id: Option<MemberId>,
}

impl Member {
    /// Create a member with no recorded parents.
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            parent1_id: None,
            parent2_id: None,
        }
    }

    /// Set the first parent reference.
    pub fn with_parent1(mut self, id: impl Into<MemberId>) -> Self {
        self.parent1_id = Some(id.into());
        self
    }

    /// Set the second parent reference.
    pub fn with_parent2(mut self, id: impl Into<MemberId>) -> Self {
        self.parent2_id = Some(id.into());
        self
    }

    /// Both parent references, in slot order.
    pub fn parent_ids(&self) -> (Option<MemberId>, Option<MemberId>) {
        (self.parent1_id, self.parent2_id)
    }
}

/// An unvalidated member payload, as submitted by a caller.
///
/// Every field is optional so a malformed submission can be rejected with a
/// precise error value instead of failing wholesale at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberDraft {
    #[serde(default)]
    pub id: Option<MemberId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parent1_id: Option<MemberId>,
    #[serde(default)]
    pub parent2_id: Option<MemberId>,
}

impl MemberDraft {
    /// Validate the required fields and produce a full member record.
    ///
    /// `id`, `name`, and `role` are required; absent parent references
    /// default to none.
    pub fn validate(self) -> Result<Member, FamilyError> {
        let id = self.id.ok_or(FamilyError::MissingField { field: "id" })?;
        let name = self.name.ok_or(FamilyError::MissingField { field: "name" })?;
        let role = self.role.ok_or(FamilyError::MissingField { field: "role" })?;
        Ok(Member {
            id,
            name,
            role,
            parent1_id: self.parent1_id,
            parent2_id: self.parent2_id,
        })
    }
}

impl From<Member> for MemberDraft {
    fn from(member: Member) -> Self {
        Self {
            id: Some(member.id),
            name: Some(member.name),
            role: Some(member.role),
            parent1_id: member.parent1_id,
            parent2_id: member.parent2_id,
        }
    }
}

/// A field-level overwrite patch for an existing member.
///
/// Unset fields keep their current value; a parent slot can be overwritten
/// with a new reference or cleared entirely.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    name: Option<String>,
    role: Option<String>,
    parent1_id: Option<Option<MemberId>>,
    parent2_id: Option<Option<MemberId>>,
}

impl MemberUpdate {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overwrite the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Overwrite or clear the first parent reference.
    pub fn with_parent1(mut self, id: Option<MemberId>) -> Self {
        self.parent1_id = Some(id);
        self
    }

    /// Overwrite or clear the second parent reference.
    pub fn with_parent2(mut self, id: Option<MemberId>) -> Self {
        self.parent2_id = Some(id);
        self
    }

    /// Apply the patch to a member in place.
    pub fn apply(&self, member: &mut Member) {
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(role) = &self.role {
            member.role = role.clone();
        }
        if let Some(parent1) = self.parent1_id {
            member.parent1_id = parent1;
        }
        if let Some(parent2) = self.parent2_id {
            member.parent2_id = parent2;
        }
    }
}
