//! SQLite implementation of PortInventory.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::domain::discovery::DiscoveredPort;
use crate::domain::foundation::{DomainError, ServerId};
use crate::ports::{PortAnnotation, PortInventory};

/// SQLite-backed discovered-port inventory with annotation overlay.
#[derive(Clone)]
pub struct SqlitePortInventory {
    pool: SqlitePool,
}

impl SqlitePortInventory {
    /// Creates a new SqlitePortInventory.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records a discovered port. Discovery collaborators call this when
    /// a scan or agent report lands.
    pub async fn record_port(
        &self,
        server_id: &ServerId,
        port: &DiscoveredPort,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO ports (server_id, owner, protocol, host_ip, host_port, container_id) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(server_id, host_ip, host_port, protocol) \
             DO UPDATE SET owner = excluded.owner, container_id = excluded.container_id",
        )
        .bind(server_id.as_str())
        .bind(&port.owner)
        .bind(&port.protocol)
        .bind(&port.host_ip)
        .bind(port.host_port as i64)
        .bind(&port.container_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record port: {}", e)))?;
        Ok(())
    }
}

#[async_trait]
impl PortInventory for SqlitePortInventory {
    async fn list_ports(&self, server_id: &ServerId) -> Result<Vec<DiscoveredPort>, DomainError> {
        let rows = sqlx::query(
            "SELECT p.owner, p.protocol, p.host_ip, p.host_port, p.container_id, \
                    a.note, a.custom_label, COALESCE(a.hidden, 0) AS hidden \
             FROM ports p \
             LEFT JOIN port_annotations a \
               ON a.server_id = p.server_id \
              AND a.host_ip = p.host_ip \
              AND a.host_port = p.host_port \
             WHERE p.server_id = ? \
             ORDER BY p.host_port, p.host_ip",
        )
        .bind(server_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list ports: {}", e)))?;

        let ports = rows
            .into_iter()
            .map(|row| {
                let host_port: i64 = row.get("host_port");
                let hidden: i64 = row.get("hidden");
                DiscoveredPort {
                    owner: row.get("owner"),
                    protocol: row.get("protocol"),
                    host_ip: row.get("host_ip"),
                    host_port: host_port as u16,
                    container_id: row.get("container_id"),
                    note: row.get("note"),
                    custom_label: row.get("custom_label"),
                    hidden: hidden != 0,
                    exposure: None,
                }
            })
            .collect();
        Ok(ports)
    }

    async fn upsert_annotation(
        &self,
        server_id: &ServerId,
        annotation: &PortAnnotation,
    ) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO port_annotations (server_id, host_ip, host_port, note, custom_label, hidden) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(server_id, host_ip, host_port) \
             DO UPDATE SET note = excluded.note, \
                           custom_label = excluded.custom_label, \
                           hidden = excluded.hidden",
        )
        .bind(server_id.as_str())
        .bind(&annotation.host_ip)
        .bind(annotation.host_port as i64)
        .bind(&annotation.note)
        .bind(&annotation.custom_label)
        .bind(annotation.hidden as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save annotation: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::pool::test_pool;

    fn port(owner: &str, host_port: u16) -> DiscoveredPort {
        DiscoveredPort {
            owner: owner.to_string(),
            protocol: "tcp".to_string(),
            host_ip: "0.0.0.0".to_string(),
            host_port,
            container_id: None,
            note: None,
            custom_label: None,
            hidden: false,
            exposure: None,
        }
    }

    async fn inventory() -> SqlitePortInventory {
        SqlitePortInventory::new(test_pool().await)
    }

    #[tokio::test]
    async fn listing_empty_server_returns_empty() {
        let inventory = inventory().await;
        let ports = inventory.list_ports(&ServerId::local()).await.unwrap();
        assert!(ports.is_empty());
    }

    #[tokio::test]
    async fn recorded_ports_are_listed_in_port_order() {
        let inventory = inventory().await;
        let local = ServerId::local();
        inventory.record_port(&local, &port("b", 9090)).await.unwrap();
        inventory.record_port(&local, &port("a", 8080)).await.unwrap();

        let ports = inventory.list_ports(&local).await.unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].host_port, 8080);
        assert_eq!(ports[1].host_port, 9090);
    }

    #[tokio::test]
    async fn re_recording_updates_owner() {
        let inventory = inventory().await;
        let local = ServerId::local();
        inventory.record_port(&local, &port("old", 8080)).await.unwrap();
        inventory.record_port(&local, &port("new", 8080)).await.unwrap();

        let ports = inventory.list_ports(&local).await.unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].owner, "new");
    }

    #[tokio::test]
    async fn annotations_overlay_onto_listing() {
        let inventory = inventory().await;
        let local = ServerId::local();
        inventory.record_port(&local, &port("plex", 32400)).await.unwrap();

        inventory
            .upsert_annotation(
                &local,
                &PortAnnotation {
                    host_ip: "0.0.0.0".to_string(),
                    host_port: 32400,
                    note: Some("media server".to_string()),
                    custom_label: Some("Plex".to_string()),
                    hidden: true,
                },
            )
            .await
            .unwrap();

        let ports = inventory.list_ports(&local).await.unwrap();
        assert_eq!(ports[0].note.as_deref(), Some("media server"));
        assert_eq!(ports[0].custom_label.as_deref(), Some("Plex"));
        assert!(ports[0].hidden);
    }

    #[tokio::test]
    async fn annotation_upsert_replaces_previous() {
        let inventory = inventory().await;
        let local = ServerId::local();
        inventory.record_port(&local, &port("plex", 32400)).await.unwrap();

        let annotation = |hidden| PortAnnotation {
            host_ip: "0.0.0.0".to_string(),
            host_port: 32400,
            note: None,
            custom_label: None,
            hidden,
        };
        inventory.upsert_annotation(&local, &annotation(true)).await.unwrap();
        inventory.upsert_annotation(&local, &annotation(false)).await.unwrap();

        let ports = inventory.list_ports(&local).await.unwrap();
        assert!(!ports[0].hidden);
    }

    #[tokio::test]
    async fn servers_do_not_share_ports() {
        let inventory = inventory().await;
        sqlx::query("INSERT INTO servers (id, label) VALUES ('nas', 'NAS')")
            .execute(&inventory.pool)
            .await
            .unwrap();

        let local = ServerId::local();
        let nas = ServerId::new("nas").unwrap();
        inventory.record_port(&local, &port("plex", 32400)).await.unwrap();

        assert_eq!(inventory.list_ports(&local).await.unwrap().len(), 1);
        assert!(inventory.list_ports(&nas).await.unwrap().is_empty());
    }
}
