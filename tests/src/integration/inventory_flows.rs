//! # ClassicInventory Flows
//!
//! Insert calls appending to the CSV event and inventory tables:
//!
//! 1. **Durability**: N calls leave exactly N more rows, one per payload
//! 2. **Schema**: header and column order fixed per table, absent params empty
//! 3. **Concurrency**: parallel appends never interleave partial rows

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::atomic::Ordering;

    use axum::http::StatusCode;
    use dm_01_record_store::{tables, TableStore};
    use dm_02_soap_gateway::extract_result;

    use crate::integration::support::{Harness, INVENTORY, MAPPER};

    // =============================================================================
    // DURABILITY
    // =============================================================================

    #[tokio::test]
    async fn test_n_logons_add_n_rows() {
        let harness = Harness::new();
        let before = harness.store.count(tables::SESSIONS).unwrap();

        for i in 0..5 {
            let user = format!("user{i}");
            let reply = harness
                .call(
                    INVENTORY,
                    "InsertLogonInventory",
                    &[("UserId", user.as_str()), ("HostName", "WKS01"), ("City", "Tokyo")],
                )
                .await;
            assert_eq!(reply.status, StatusCode::OK);
            assert_eq!(
                extract_result(&reply.body, "InsertLogonInventory").unwrap(),
                "<InsertLogonInventoryResult>SUCCESS</InsertLogonInventoryResult>"
            );
        }

        let sessions = harness.store.load(tables::SESSIONS).unwrap();
        assert_eq!(sessions.len(), before + 5);
        for (i, row) in sessions.iter().enumerate() {
            assert_eq!(row.get("UserId"), Some(format!("user{i}").as_str()));
            assert_eq!(row.get("EventType"), Some("Logon"));
            assert_eq!(row.get("City"), Some("Tokyo"));
            assert_eq!(row.get("OuMapping"), Some(""));
        }
        assert_eq!(
            harness
                .service
                .metrics()
                .write_requests_total
                .load(Ordering::Relaxed),
            5
        );
    }

    #[tokio::test]
    async fn test_logon_then_logoff_share_sessions_file() {
        let harness = Harness::new();
        let params = [("UserId", "jdoe"), ("UserDomain", "CORP")];

        harness.call(INVENTORY, "InsertLogonInventory", &params).await;
        harness.call(INVENTORY, "InsertLogoffInventory", &params).await;

        let csv = fs::read_to_string(harness.dir.path().join("sessions.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Timestamp,EventType,UserId,UserDomain,HostName,Domain,SiteName,City,OuMapping"
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",Logon,jdoe,CORP,"));
        assert!(lines[2].contains(",Logoff,jdoe,CORP,"));
    }

    // =============================================================================
    // SCHEMA
    // =============================================================================

    #[tokio::test]
    async fn test_inventory_table_headers() {
        let harness = Harness::new();
        let params = [("UserId", "jdoe"), ("UncPath", r"\\srv\share, with comma")];

        for method in [
            "InsertActiveDriveMappingsFromInventory",
            "InsertMapperPrinterInventory",
            "InsertActivePersonalFolderMappingsFromInventory",
        ] {
            let reply = harness.call(INVENTORY, method, &params).await;
            assert_eq!(reply.status, StatusCode::OK, "{method}");
        }

        let header = |table: &str| {
            fs::read_to_string(harness.dir.path().join(format!("{table}.csv")))
                .unwrap()
                .lines()
                .next()
                .unwrap()
                .to_string()
        };
        assert_eq!(
            header(tables::INVENTORY_DRIVES),
            "Timestamp,UserId,HostName,Domain,SiteName,City,Drive,UncPath,Description,OuMapping"
        );
        assert_eq!(
            header(tables::INVENTORY_PRINTERS),
            "Timestamp,UserId,HostName,Domain,UncPath,IsDefault,Driver,Port,Description"
        );
        assert_eq!(
            header(tables::INVENTORY_PST),
            "Timestamp,UserId,HostName,Path,UncPath,Size,PstLastUpdate"
        );

        // Quoted on disk, intact when read back.
        let pst = harness.store.load(tables::INVENTORY_PST).unwrap();
        assert_eq!(pst[0].get("UncPath"), Some(r"\\srv\share, with comma"));
    }

    #[tokio::test]
    async fn test_inventory_rows_not_served_by_mapper() {
        let harness = Harness::new();
        harness
            .call(
                INVENTORY,
                "InsertMapperPrinterInventory",
                &[("HostName", "WKS01"), ("UncPath", r"\\srv\p9")],
            )
            .await;

        let reply = harness
            .call(MAPPER, "GetUserPrinters", &[("HostName", "WKS01")])
            .await;
        assert_eq!(
            extract_result(&reply.body, "GetUserPrinters").unwrap(),
            "<Printers />"
        );
    }

    #[tokio::test]
    async fn test_unknown_method_on_inventory() {
        let harness = Harness::new();
        let reply = harness.call(INVENTORY, "Foo", &[]).await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.body.contains("Foo"));
        assert!(harness.store.load(tables::SESSIONS).unwrap().is_empty());
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_inserts_keep_whole_rows() {
        let harness = std::sync::Arc::new(Harness::new());
        let mut tasks = Vec::new();

        for i in 0..40 {
            let harness = std::sync::Arc::clone(&harness);
            tasks.push(tokio::spawn(async move {
                let host = format!("WKS{i:03}");
                harness
                    .call(
                        INVENTORY,
                        "InsertActiveDriveMappingsFromInventory",
                        &[("HostName", host.as_str()), ("Description", "a \"quoted\"\nmulti-line value")],
                    )
                    .await
                    .status
            }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::OK);
        }

        let rows = harness.store.load(tables::INVENTORY_DRIVES).unwrap();
        assert_eq!(rows.len(), 40);
        let mut hosts: Vec<_> = rows.iter().filter_map(|r| r.get("HostName")).collect();
        hosts.sort_unstable();
        hosts.dedup();
        assert_eq!(hosts.len(), 40);
        assert!(rows
            .iter()
            .all(|r| r.get("Description") == Some("a \"quoted\"\nmulti-line value")));
    }
}
