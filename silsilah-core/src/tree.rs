//! Rendering-ready description of the family as a directed graph.

use serde::Serialize;

use crate::error::FamilyError;
use crate::family::Family;
use crate::member::{Member, MemberDraft, MemberId};

/// Coarse classification of a member's role, used only to pick rendering
/// colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VisualCategory {
    /// Grandparent-tier roles (kakek, nenek).
    Grandparent,
    /// Parent-tier roles (ayah, bapak, ibu).
    Parent,
    /// The record owner (saya).
    Ego,
    /// Sibling-tier roles (saudara, kakak, adik); also the fallback tier
    /// for unrecognized roles.
    Sibling,
    /// Cousin-tier roles (sepupu).
    Cousin,
}

impl VisualCategory {
    /// Map a free-text role onto a category.
    ///
    /// Total over all inputs: unrecognized or empty roles fall back to the
    /// sibling tier, so new roles never break description building.
    pub fn from_role(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "kakek" | "nenek" => VisualCategory::Grandparent,
            "ayah" | "bapak" | "ibu" => VisualCategory::Parent,
            "saya" => VisualCategory::Ego,
            "sepupu" => VisualCategory::Cousin,
            _ => VisualCategory::Sibling,
        }
    }

    /// Node fill color for this category.
    pub fn fill_color(&self) -> &'static str {
        match self {
            VisualCategory::Grandparent => "#FFD700",
            VisualCategory::Parent => "#87CEEB",
            VisualCategory::Ego => "#90EE90",
            VisualCategory::Sibling => "#FFB6C1",
            VisualCategory::Cousin => "#DDA0DD",
        }
    }

    /// Node border color for this category.
    pub fn border_color(&self) -> &'static str {
        match self {
            VisualCategory::Grandparent => "#B8860B",
            VisualCategory::Parent => "#4682B4",
            VisualCategory::Ego => "#2E8B57",
            VisualCategory::Sibling => "#C71585",
            VisualCategory::Cousin => "#8B008B",
        }
    }
}

/// One rendered node: a member with a display label and category colors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: MemberId,
    /// Display label: the member's name with the role underneath.
    pub label: String,
    pub fill_color: &'static str,
    pub border_color: &'static str,
}

impl GraphNode {
    fn from_member(member: &Member) -> Self {
        Self::build(member.id, &member.name, &member.role)
    }

    /// Convert an unvalidated record into a node.
    ///
    /// A record without an id cannot appear in the graph and is reported
    /// as malformed; a missing role falls back to the sibling tier.
    pub fn from_draft(draft: &MemberDraft) -> Result<Self, FamilyError> {
        let id = draft.id.ok_or(FamilyError::MalformedDescription)?;
        Ok(Self::build(
            id,
            draft.name.as_deref().unwrap_or_default(),
            draft.role.as_deref().unwrap_or_default(),
        ))
    }

    fn build(id: MemberId, name: &str, role: &str) -> Self {
        let category = VisualCategory::from_role(role);
        Self {
            id,
            label: format!("{name}\n({role})"),
            fill_color: category.fill_color(),
            border_color: category.border_color(),
        }
    }
}

/// One rendered edge, directed from parent to child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphEdge {
    pub from: MemberId,
    pub to: MemberId,
}

/// A rendering-ready description of the family as a directed graph.
///
/// A pure value object independent of any textual graph syntax; turning it
/// into a concrete wire format is a separate step (see
/// [`to_dot`](crate::dot::to_dot)).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDescription {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDescription {
    /// Describe a family snapshot: one node per member, one edge per
    /// non-null parent reference, directed parent to child.
    ///
    /// Pure and deterministic: the same snapshot always yields the same
    /// description.
    pub fn from_members(family: &Family) -> Self {
        let nodes = family.iter().map(GraphNode::from_member).collect();
        let edges = family
            .iter()
            .flat_map(|member| {
                [member.parent1_id, member.parent2_id]
                    .into_iter()
                    .flatten()
                    .map(move |parent| GraphEdge {
                        from: parent,
                        to: member.id,
                    })
            })
            .collect();
        Self { nodes, edges }
    }

    /// Describe unvalidated records, skipping any entry without an id.
    pub fn from_drafts(drafts: &[MemberDraft]) -> Self {
        let nodes = drafts
            .iter()
            .filter_map(|draft| GraphNode::from_draft(draft).ok())
            .collect();
        let edges = drafts
            .iter()
            .filter_map(|draft| draft.id.map(|id| (id, draft)))
            .flat_map(|(id, draft)| {
                [draft.parent1_id, draft.parent2_id]
                    .into_iter()
                    .flatten()
                    .map(move |parent| GraphEdge {
                        from: parent,
                        to: id,
                    })
            })
            .collect();
        Self { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Family {
        Family::from_members(vec![
            Member::new(1, "Budi", "kakek"),
            Member::new(2, "Agus", "bapak").with_parent1(1),
            Member::new(3, "Citra", "saya").with_parent1(2).with_parent2(4),
        ])
    }

    #[test]
    fn test_role_categories() {
        assert_eq!(VisualCategory::from_role("kakek"), VisualCategory::Grandparent);
        assert_eq!(VisualCategory::from_role("nenek"), VisualCategory::Grandparent);
        assert_eq!(VisualCategory::from_role("ibu"), VisualCategory::Parent);
        assert_eq!(VisualCategory::from_role("saya"), VisualCategory::Ego);
        assert_eq!(VisualCategory::from_role("sepupu"), VisualCategory::Cousin);
        assert_eq!(VisualCategory::from_role("adik"), VisualCategory::Sibling);
    }

    #[test]
    fn test_role_matching_ignores_case_and_whitespace() {
        assert_eq!(VisualCategory::from_role(" Kakek "), VisualCategory::Grandparent);
        assert_eq!(VisualCategory::from_role("SAYA"), VisualCategory::Ego);
    }

    #[test]
    fn test_unrecognized_role_falls_back_to_sibling_tier() {
        assert_eq!(VisualCategory::from_role("paman"), VisualCategory::Sibling);
        assert_eq!(VisualCategory::from_role(""), VisualCategory::Sibling);
    }

    #[test]
    fn test_node_and_edge_counts() {
        let description = GraphDescription::from_members(&sample());

        // One node per member; one edge per non-null parent reference,
        // dangling ones included.
        assert_eq!(description.nodes.len(), 3);
        assert_eq!(description.edges.len(), 3);
    }

    #[test]
    fn test_edges_run_parent_to_child() {
        let description = GraphDescription::from_members(&sample());

        assert_eq!(
            description.edges,
            vec![
                GraphEdge { from: MemberId(1), to: MemberId(2) },
                GraphEdge { from: MemberId(2), to: MemberId(3) },
                GraphEdge { from: MemberId(4), to: MemberId(3) },
            ]
        );
    }

    #[test]
    fn test_node_label_and_colors() {
        let description = GraphDescription::from_members(&sample());
        let node = &description.nodes[0];

        assert_eq!(node.label, "Budi\n(kakek)");
        assert_eq!(node.fill_color, VisualCategory::Grandparent.fill_color());
        assert_eq!(node.border_color, VisualCategory::Grandparent.border_color());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let family = sample();
        assert_eq!(
            GraphDescription::from_members(&family),
            GraphDescription::from_members(&family)
        );
    }

    #[test]
    fn test_draft_without_id_is_skipped() {
        let drafts = vec![
            MemberDraft::from(Member::new(1, "Budi", "kakek")),
            MemberDraft {
                name: Some("Tanpa Id".to_string()),
                ..Default::default()
            },
        ];

        let description = GraphDescription::from_drafts(&drafts);
        assert_eq!(description.nodes.len(), 1);
        assert!(description.edges.is_empty());
    }

    #[test]
    fn test_draft_without_id_is_malformed() {
        let draft = MemberDraft::default();
        assert_eq!(
            GraphNode::from_draft(&draft),
            Err(FamilyError::MalformedDescription)
        );
    }

    #[test]
    fn test_draft_without_role_uses_fallback_tier() {
        let draft = MemberDraft {
            id: Some(MemberId(5)),
            name: Some("Tamu".to_string()),
            ..Default::default()
        };

        let node = GraphNode::from_draft(&draft).expect("id is present");
        assert_eq!(node.fill_color, VisualCategory::Sibling.fill_color());
    }

    #[test]
    fn test_empty_family_describes_to_empty_graph() {
        let description = GraphDescription::from_members(&Family::new());
        assert!(description.nodes.is_empty());
        assert!(description.edges.is_empty());
    }
}
