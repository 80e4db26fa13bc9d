//! Tiered matching of discovered ports to exposed services.

use super::service::{ExposedService, ServiceSource};

/// Normalizes a container/process name for fuzzy comparison.
///
/// Strips a leading `ix-` prefix (TrueNAS app containers), then a trailing
/// `-<digits>` or `_<digits>` replica/instance suffix, then lowercases.
pub fn clean_owner_name(name: &str) -> String {
    let name = name.strip_prefix("ix-").unwrap_or(name);
    let name = strip_numeric_suffix(name, '-');
    let name = strip_numeric_suffix(name, '_');
    name.to_lowercase()
}

fn strip_numeric_suffix(name: &str, sep: char) -> &str {
    match name.rsplit_once(sep) {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => name,
    }
}

/// Finds the exposed service backing a discovered port, if any.
///
/// Three tiers are evaluated in strict order and the first match wins;
/// disabled services never match. Within a tier, ties break to the first
/// service in upstream list order (stable, input-order-preserving).
///
/// 1. Exact: `source_id` equals the owner and the port matches.
/// 2. Fuzzy name: port matches and the lowercased service name and the
///    cleaned owner name contain one another (either direction).
/// 3. External fallback: port matches and the service was declared
///    externally - such services carry no container identity, so the
///    port number alone has to suffice.
pub fn find_service_for_port<'a>(
    owner: &str,
    port: u16,
    services: &'a [ExposedService],
) -> Option<&'a ExposedService> {
    if services.is_empty() {
        return None;
    }

    if let Some(svc) = services
        .iter()
        .find(|svc| svc.enabled && svc.port == port && svc.source_id == owner)
    {
        return Some(svc);
    }

    let clean_name = clean_owner_name(owner);
    if !clean_name.is_empty() {
        let fuzzy = services.iter().find(|svc| {
            if !svc.enabled || svc.port != port {
                return false;
            }
            let svc_name = svc.name.to_lowercase();
            svc_name.contains(&clean_name) || clean_name.contains(&svc_name)
        });
        if let Some(svc) = fuzzy {
            tracing::debug!(port, owner, clean_name = %clean_name, service = %svc.name, "fuzzy name match");
            return Some(svc);
        }
    }

    let external = services
        .iter()
        .find(|svc| svc.enabled && svc.port == port && svc.source == ServiceSource::External);
    if let Some(svc) = external {
        tracing::debug!(port, owner, service = %svc.name, "external fallback match");
    }
    external
}
