use super::*;

fn tree() -> NodeStore {
    let mut s = NodeStore::new();
    let root = s.create(0, "Root".into(), 0, true);
    let col = s.create(1, "Column".into(), 0, false);
    let text = s.create(2, "Text".into(), 0, false);
    s.add_child(root, col).unwrap();
    s.add_child(col, text).unwrap();
    s.set_element_id(text, Some("title"));
    s
}

#[test]
fn empty_store_has_null_root() {
    let snap = StructureSnapshot::capture(&NodeStore::new()).unwrap();
    assert_eq!(snap.to_json_string().unwrap(), r#"{"rootElement":null}"#);
    assert_eq!(snap.element_count(), 0);
}

#[test]
fn nested_children_are_captured_in_order() {
    let snap = StructureSnapshot::capture(&tree()).unwrap();
    let root = snap.root_element.as_ref().unwrap();
    assert_eq!(root.kind, "Root");
    assert_eq!(root.children[0].kind, "Column");
    assert_eq!(root.children[0].children[0].element_id.as_deref(), Some("title"));
    assert_eq!(snap.element_count(), 3);
}

#[test]
fn json_round_trips() {
    let snap = StructureSnapshot::capture(&tree()).unwrap();
    let json = snap.to_json_string().unwrap();
    assert_eq!(StructureSnapshot::from_json_str(&json).unwrap(), snap);
    assert!(StructureSnapshot::from_json_str("{").is_err());
}

#[test]
fn detached_nodes_are_not_captured() {
    let mut s = tree();
    let orphan = s.create(9, "Text".into(), 0, false);
    s.set_handle(orphan, Some(crate::Handle::from_raw(5)));
    assert_eq!(StructureSnapshot::capture(&s).unwrap().element_count(), 3);
}
