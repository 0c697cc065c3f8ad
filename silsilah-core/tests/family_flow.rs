//! End-to-end tests over the public crate API.
//!
//! These tests exercise whole request flows the way a surface would run
//! them: load a snapshot from a record store, run classification or
//! description building over it, and write the mutated snapshot back.

use silsilah_core::{
    classify, describe_relationships, to_dot, Family, FamilyError, GraphDescription, JsonFileStore,
    Member, MemberDraft, MemberId, MemberUpdate, MemoryStore, RecordStore, Relation,
};

fn draft(id: i64, name: &str, role: &str) -> MemberDraft {
    MemberDraft {
        id: Some(MemberId(id)),
        name: Some(name.to_string()),
        role: Some(role.to_string()),
        ..Default::default()
    }
}

fn three_generations() -> Family {
    Family::from_members(vec![
        Member::new(1, "A", "kakek"),
        Member::new(2, "B", "bapak").with_parent1(1),
        Member::new(3, "C", "saya").with_parent1(2),
    ])
}

#[tokio::test]
async fn test_member_lifecycle_through_store() {
    let store = MemoryStore::new();

    // Create: each write runs load-mutate-save as one critical section.
    store
        .modify(|family| {
            family.add(draft(1, "Budi", "kakek"))?;
            family.add(MemberDraft {
                parent1_id: Some(MemberId(1)),
                ..draft(2, "Agus", "bapak")
            })
        })
        .await
        .expect("drafts are valid");

    // Update.
    store
        .modify(|family| family.update(MemberId(2), &MemberUpdate::new().with_role("ayah")))
        .await
        .expect("member exists");

    let family = store.load().await.unwrap();
    assert_eq!(family.len(), 2);
    assert_eq!(family.get(MemberId(2)).unwrap().role, "ayah");

    // Delete.
    store
        .modify(|family| family.remove(MemberId(2)).map(|_| ()))
        .await
        .expect("member exists");
    assert_eq!(store.load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_unknown_member_reports_not_found_and_changes_nothing() {
    let store = MemoryStore::with_family(three_generations());

    let result = store.modify(|family| family.remove(MemberId(42))).await;

    assert_eq!(result, Err(FamilyError::NotFound { id: MemberId(42) }));
    assert_eq!(store.load().await.unwrap(), three_generations());
}

#[test]
fn test_classification_and_description_of_three_generations() {
    let family = three_generations();

    let relations = classify(&family, MemberId(1));
    assert_eq!(relations.len(), 2);
    assert_eq!(relations.get(&MemberId(2)), Some(&Relation::Child));
    assert_eq!(relations.get(&MemberId(3)), Some(&Relation::Grandchild));

    let description = GraphDescription::from_members(&family);
    let node_ids: Vec<_> = description.nodes.iter().map(|n| n.id.0).collect();
    let edges: Vec<_> = description.edges.iter().map(|e| (e.from.0, e.to.0)).collect();
    assert_eq!(node_ids, vec![1, 2, 3]);
    assert_eq!(edges, vec![(1, 2), (2, 3)]);
}

#[test]
fn test_relationship_wire_shape() {
    let entries = describe_relationships(&three_generations(), MemberId(1));
    let json = serde_json::to_value(&entries).unwrap();

    assert_eq!(
        json,
        serde_json::json!([
            { "id": 2, "name": "B", "relationship": "Child" },
            { "id": 3, "name": "C", "relationship": "Grandchild" },
        ])
    );
}

#[test]
fn test_description_and_dot_are_deterministic() {
    let family = three_generations();

    let first = GraphDescription::from_members(&family);
    let second = GraphDescription::from_members(&family);
    assert_eq!(first, second);
    assert_eq!(to_dot(&first), to_dot(&second));
}

#[tokio::test]
async fn test_family_survives_a_file_store_round_trip() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let store = JsonFileStore::new(dir.path().join("family.json"));

    let mut family = three_generations();
    family.add(draft(4, "Dewi", "ibu")).unwrap();
    store.save(&family).await.expect("save succeeds");

    let reloaded = store.load().await.expect("load succeeds");
    assert_eq!(reloaded, family);

    // Classification over the reloaded snapshot behaves identically.
    assert_eq!(
        classify(&reloaded, MemberId(1)),
        classify(&family, MemberId(1))
    );
}
