//! Genealogical record keeping with relationship inference and tree
//! rendering support.
//!
//! This crate provides:
//! - A family record model with snapshot mutation operations
//! - Relationship classification relative to a chosen member
//! - A rendering-ready directed-graph description of the family, plus a
//!   DOT serializer for it
//! - Record store collaborators for durable persistence
//!
//! # Quick Start
//!
//! ```
//! use silsilah_core::{describe_relationships, Family, Member, MemberId, Relation};
//!
//! let family = Family::from_members(vec![
//!     Member::new(1, "Budi", "kakek"),
//!     Member::new(2, "Agus", "bapak").with_parent1(1),
//!     Member::new(3, "Citra", "saya").with_parent1(2),
//! ]);
//!
//! let relations = describe_relationships(&family, MemberId(1));
//! assert_eq!(relations.len(), 2);
//! assert_eq!(relations[0].relationship, Relation::Child);
//! assert_eq!(relations[1].relationship, Relation::Grandchild);
//! ```

pub mod dot;
pub mod error;
pub mod family;
pub mod graph;
pub mod member;
pub mod relationship;
pub mod store;
pub mod tree;

// Primary public API
pub use dot::to_dot;
pub use error::FamilyError;
pub use family::Family;
pub use graph::FamilyGraph;
pub use member::{Member, MemberDraft, MemberId, MemberUpdate};
pub use relationship::{
    classify, describe_relationships, relation_entries, Relation, RelationEntry, UNKNOWN_NAME,
};
pub use store::{JsonFileStore, MemoryStore, RecordStore, StoreError};
pub use tree::{GraphDescription, GraphEdge, GraphNode, VisualCategory};
