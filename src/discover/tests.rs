//! Discovery Module Tests
//!
//! Validates the group protocol end to end against a real store: creation,
//! fetch, registration semantics, the error taxonomy, and registration
//! behavior under concurrency.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::discover::error::DiscoveryError;
    use crate::discover::service::DiscoveryService;
    use crate::registry::types::{NodeInfo, Register};
    use crate::storage::memory::ShardedStore;

    fn service_with_store() -> (Arc<DiscoveryService>, Arc<ShardedStore>) {
        let store = Arc::new(ShardedStore::new());
        let service = DiscoveryService::new(store.clone());
        (service, store)
    }

    fn node_payload(fqdn: &str, port: u16) -> Vec<u8> {
        serde_json::to_vec(&NodeInfo::new(fqdn, port)).unwrap()
    }

    // ============================================================
    // GROUP LIFECYCLE TESTS
    // ============================================================

    #[test]
    fn test_create_group_stores_empty_register() {
        let (service, _store) = service_with_store();

        let token = service.create_group();

        let stored = service.fetch_group(&token).expect("group should exist");
        let register = Register::from_bytes(&stored).expect("stored register should parse");
        assert!(register.nodes.is_empty());
    }

    #[test]
    fn test_create_group_tokens_are_unique() {
        let (service, _store) = service_with_store();

        let t1 = service.create_group();
        let t2 = service.create_group();

        assert_ne!(t1, t2);
    }

    #[test]
    fn test_fetch_unknown_token_returns_none() {
        let (service, _store) = service_with_store();

        assert!(service.fetch_group("does-not-exist").is_none());
    }

    // ============================================================
    // REGISTRATION TESTS
    // ============================================================

    #[test]
    fn test_register_node_appends_to_register() {
        let (service, _store) = service_with_store();
        let token = service.create_group();

        let updated = service
            .register_node(&token, &node_payload("a.example", 9000))
            .expect("registration failed");

        let register = Register::from_bytes(&updated).unwrap();
        assert_eq!(register.nodes.len(), 1);
        assert_eq!(register.nodes[0].fqdn, "a.example");
        assert_eq!(register.nodes[0].port, 9000);

        // The updated register is persisted under the same token.
        assert_eq!(service.fetch_group(&token).unwrap(), updated);
    }

    #[test]
    fn test_register_node_is_idempotent() {
        let (service, _store) = service_with_store();
        let token = service.create_group();

        service
            .register_node(&token, &node_payload("a.example", 9000))
            .unwrap();
        let updated = service
            .register_node(&token, &node_payload("a.example", 9000))
            .unwrap();

        let register = Register::from_bytes(&updated).unwrap();
        assert_eq!(register.nodes.len(), 1);
    }

    #[test]
    fn test_register_preserves_insertion_order() {
        let (service, _store) = service_with_store();
        let token = service.create_group();

        service
            .register_node(&token, &node_payload("a.example", 9000))
            .unwrap();
        let updated = service
            .register_node(&token, &node_payload("b.example", 9001))
            .unwrap();

        let register = Register::from_bytes(&updated).unwrap();
        assert_eq!(register.nodes.len(), 2);
        assert_eq!(register.nodes[0].address(), "a.example:9000");
        assert_eq!(register.nodes[1].address(), "b.example:9001");
    }

    #[test]
    fn test_register_unknown_token_fails_without_mutation() {
        let (service, store) = service_with_store();

        let result = service.register_node("does-not-exist", &node_payload("a.example", 9000));

        assert!(matches!(result, Err(DiscoveryError::GroupNotFound)));
        assert!(!store.has("does-not-exist"));
    }

    #[test]
    fn test_register_malformed_node_payload_fails() {
        let (service, _store) = service_with_store();
        let token = service.create_group();

        let result = service.register_node(&token, b"not json");
        assert!(matches!(result, Err(DiscoveryError::MalformedNodeInfo(_))));

        // The group is untouched.
        let register = Register::from_bytes(&service.fetch_group(&token).unwrap()).unwrap();
        assert!(register.nodes.is_empty());
    }

    #[test]
    fn test_register_on_corrupt_register_fails() {
        let (service, store) = service_with_store();
        let token = service.create_group();

        store.put(&token, b"corrupted".to_vec());

        let result = service.register_node(&token, &node_payload("a.example", 9000));
        assert!(matches!(result, Err(DiscoveryError::MalformedRegister(_))));
    }

    #[test]
    fn test_concurrent_registrations_all_land() {
        let (service, _store) = service_with_store();
        let token = service.create_group();

        std::thread::scope(|scope| {
            for port in 9000..9008u16 {
                let service = service.clone();
                let token = token.clone();
                scope.spawn(move || {
                    service
                        .register_node(&token, &node_payload("worker.example", port))
                        .expect("registration failed");
                });
            }
        });

        let register = Register::from_bytes(&service.fetch_group(&token).unwrap()).unwrap();
        assert_eq!(
            register.nodes.len(),
            8,
            "No registration may be lost to a concurrent read-modify-write"
        );
    }

    // ============================================================
    // DUMP TESTS
    // ============================================================

    #[test]
    fn test_dump_includes_every_group() {
        let (service, _store) = service_with_store();

        let t1 = service.create_group();
        let t2 = service.create_group();
        service
            .register_node(&t1, &node_payload("a.example", 9000))
            .unwrap();

        let dump = service.dump().expect("dump failed");
        let parsed: serde_json::Value = serde_json::from_slice(&dump).unwrap();
        let object = parsed.as_object().unwrap();

        assert_eq!(object.len(), 2);
        assert_eq!(object[&t1]["nodes"][0]["FQDN"], "a.example");
        assert_eq!(object[&t2], serde_json::json!({ "nodes": [] }));
    }

    // ============================================================
    // ERROR MAPPING TESTS
    // ============================================================

    #[test]
    fn test_error_status_codes() {
        let parse_err = serde_json::from_slice::<Register>(b"x").unwrap_err();

        assert_eq!(
            DiscoveryError::GroupNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            DiscoveryError::MalformedRegister(parse_err).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
