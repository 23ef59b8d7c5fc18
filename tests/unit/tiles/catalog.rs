//! Tests for the edge-type registry

#[cfg(test)]
mod tests {
    use tilecollapse::WfcError;
    use tilecollapse::tiles::catalog::EdgeCatalog;
    use tilecollapse::tiles::edge::{EdgeRef, EdgeType};

    fn catalog() -> EdgeCatalog {
        EdgeCatalog::from_types([EdgeType::symmetrical("grass"), EdgeType::asymmetrical("road")])
            .unwrap()
    }

    // Tests adding a duplicate id is rejected and leaves the catalog unchanged
    // Verified by removing the contains check in add
    #[test]
    fn test_add_rejects_duplicates() {
        let mut catalog = catalog();
        let result = catalog.add(EdgeType::asymmetrical("grass"));

        assert!(matches!(result, Err(WfcError::DuplicateId { id, .. }) if id == "grass"));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("grass").unwrap().symmetrical);
    }

    // Tests edit replaces in place and may rename
    // Verified by appending instead of replacing the slot
    #[test]
    fn test_edit_replaces_entry() {
        let mut catalog = catalog();
        catalog.edit("grass", EdgeType::asymmetrical("meadow")).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.contains("grass"));
        assert_eq!(catalog.types().first().unwrap().id, "meadow");
        assert!(!catalog.get("meadow").unwrap().symmetrical);
    }

    // Tests edit errors for unknown ids and id collisions
    // Verified by skipping the collision check when ids differ
    #[test]
    fn test_edit_errors() {
        let mut catalog = catalog();

        assert!(matches!(
            catalog.edit("water", EdgeType::symmetrical("water")),
            Err(WfcError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.edit("grass", EdgeType::symmetrical("road")),
            Err(WfcError::DuplicateId { .. })
        ));
        catalog.edit("road", EdgeType::symmetrical("road")).unwrap();
        assert!(catalog.get("road").unwrap().symmetrical);
    }

    // Tests delete returns the removed type and rejects unknown ids
    // Verified by returning the wrong index from position
    #[test]
    fn test_delete() {
        let mut catalog = catalog();
        let removed = catalog.delete("road").unwrap();

        assert_eq!(removed, EdgeType::asymmetrical("road"));
        assert_eq!(catalog.len(), 1);
        assert!(matches!(catalog.delete("road"), Err(WfcError::NotFound { .. })));
    }

    // Tests connects applies the symmetry flag of the registered type
    // Verified by defaulting symmetrical to true for every type
    #[test]
    fn test_connects_uses_catalog_symmetry() {
        let catalog = catalog();

        assert!(catalog.connects(&EdgeRef::new("grass"), &EdgeRef::new("grass")).unwrap());
        assert!(!catalog.connects(&EdgeRef::new("road"), &EdgeRef::new("road")).unwrap());
        assert!(catalog.connects(&EdgeRef::new("road"), &EdgeRef::reversed("road")).unwrap());
        assert!(!catalog.connects(&EdgeRef::new("road"), &EdgeRef::reversed("grass")).unwrap());
    }

    // Tests connects reports unknown type references
    // Verified by removing the membership check
    #[test]
    fn test_connects_unknown_type() {
        let catalog = catalog();
        let result = catalog.connects(&EdgeRef::new("grass"), &EdgeRef::new("lava"));

        assert!(matches!(result, Err(WfcError::NotFound { id, .. }) if id == "lava"));
    }

    // Tests documents go through the duplicate check and serialize as a list
    // Verified by deserializing the catalog transparently
    #[test]
    fn test_deserialize_rejects_duplicates() {
        let duplicated = r#"[{"id": "road", "symmetrical": false}, {"id": "road"}]"#;
        let error = serde_json::from_str::<EdgeCatalog>(duplicated).unwrap_err();
        assert!(error.to_string().contains("'road' already exists"));

        let json = serde_json::to_string(&catalog()).unwrap();
        assert!(json.starts_with('['));
        assert_eq!(serde_json::from_str::<EdgeCatalog>(&json).unwrap(), catalog());
    }
}
