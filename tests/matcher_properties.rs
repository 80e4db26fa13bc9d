//! Property tests for the port/service matcher.

use proptest::prelude::*;

use portdeck::domain::exposure::{
    clean_owner_name, find_service_for_port, ExposedService, ServiceSource,
};

fn arb_source() -> impl Strategy<Value = ServiceSource> {
    prop_oneof![
        Just(ServiceSource::Internal),
        Just(ServiceSource::External),
    ]
}

prop_compose! {
    fn arb_service()(
        source_id in "[a-z0-9-]{0,12}",
        name in "[a-zA-Z0-9_-]{0,16}",
        port in 1u16..10_000,
        enabled in any::<bool>(),
        source in arb_source(),
        subdomain in proptest::option::of("[a-z]{1,8}"),
    ) -> ExposedService {
        ExposedService {
            source_id,
            name,
            port,
            enabled,
            source,
            exposed_subdomain: None,
            subdomain,
            ssl_pending: false,
            ssl_error: None,
            reachability_status: None,
        }
    }
}

proptest! {
    /// A returned match is always enabled and always on the queried port.
    #[test]
    fn match_is_always_enabled_and_port_equal(
        owner in "[a-zA-Z0-9_-]{0,20}",
        port in 1u16..10_000,
        services in proptest::collection::vec(arb_service(), 0..12),
    ) {
        if let Some(found) = find_service_for_port(&owner, port, &services) {
            prop_assert!(found.enabled);
            prop_assert_eq!(found.port, port);
        }
    }

    /// When no service carries the queried port, nothing matches.
    #[test]
    fn no_port_overlap_means_no_match(
        owner in "[a-zA-Z0-9_-]{0,20}",
        services in proptest::collection::vec(arb_service(), 0..12),
    ) {
        // port 20_000 is outside the generated range
        prop_assert!(find_service_for_port(&owner, 20_000, &services).is_none());
    }

    /// A fully disabled list never matches.
    #[test]
    fn disabled_services_never_match(
        owner in "[a-zA-Z0-9_-]{0,20}",
        port in 1u16..10_000,
        mut services in proptest::collection::vec(arb_service(), 0..12),
    ) {
        for svc in &mut services {
            svc.enabled = false;
        }
        prop_assert!(find_service_for_port(&owner, port, &services).is_none());
    }

    /// An enabled service whose source_id and port match exactly always wins.
    #[test]
    fn exact_match_always_found(
        mut services in proptest::collection::vec(arb_service(), 0..8),
        mut target in arb_service(),
        insert_at in 0usize..8,
    ) {
        target.enabled = true;
        target.source_id = "exact-owner".to_string();
        let insert_at = insert_at.min(services.len());
        services.insert(insert_at, target.clone());

        let found = find_service_for_port("exact-owner", target.port, &services).unwrap();
        prop_assert!(found.enabled);
        prop_assert_eq!(found.port, target.port);
    }

    /// Cleaning never panics and always lowercases.
    #[test]
    fn cleaning_lowercases(name in "\\PC{0,40}") {
        let cleaned = clean_owner_name(&name);
        prop_assert_eq!(cleaned.clone(), cleaned.to_lowercase());
    }
}

#[test]
fn cleaning_examples_from_the_wild() {
    assert_eq!(clean_owner_name("ix-plex-3"), "plex");
    assert_eq!(clean_owner_name("my_service_42"), "my_service");
    assert_eq!(clean_owner_name("ix-nextcloud"), "nextcloud");
    assert_eq!(clean_owner_name("Jellyfin-10"), "jellyfin");
}
