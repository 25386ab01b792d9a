//! # ClassicMapper Flows
//!
//! Query calls answered from hand-maintained CSV tables:
//!
//! 1. **Filtering**: case-insensitive match on `UserId` / `HostName`, storage order kept
//! 2. **Defaults**: missing columns render with their fixed defaults
//! 3. **Empty results**: self-closing collection element
//! 4. **Errors**: unknown methods and malformed envelopes are 400s

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use dm_01_record_store::{tables, Record, TableStore};
    use dm_02_soap_gateway::extract_result;

    use crate::integration::support::{envelope, Harness, MAPPER};

    // =============================================================================
    // FILTERING
    // =============================================================================

    #[tokio::test]
    async fn test_drives_filtered_case_insensitively_in_storage_order() {
        let harness = Harness::new();
        harness.seed(
            tables::DRIVES,
            "UserId,Domain,Drive,UncPath\n\
             ABC,CORP,P:,\\\\srv\\projects\n\
             other,CORP,Q:,\\\\srv\\other\n\
             abc,CORP,S:,\\\\srv\\scratch\n",
        );

        let reply = harness
            .call(MAPPER, "GetUserDrives", &[("UserId", "abc"), ("Domain", "CORP")])
            .await;

        assert_eq!(reply.status, StatusCode::OK);
        assert!(reply.content_type.starts_with("text/xml"));
        let result = extract_result(&reply.body, "GetUserDrives").unwrap();
        assert_eq!(result.matches("<Drive>\n").count(), 2);
        let projects = result.find(r"\\srv\projects").unwrap();
        let scratch = result.find(r"\\srv\scratch").unwrap();
        assert!(projects < scratch);
        assert!(!result.contains("Q:"));
    }

    #[tokio::test]
    async fn test_printer_scenario_wks01() {
        let harness = Harness::new();
        let printer: Record = [
            ("HostName", "WKS01"),
            ("UncPath", r"\\srv\p1"),
            ("IsDefault", "true"),
        ]
        .into_iter()
        .collect();
        harness.store.append(tables::PRINTERS, &printer).unwrap();

        let reply = harness
            .call(MAPPER, "GetUserPrinters", &[("HostName", "wks01")])
            .await;

        assert_eq!(reply.status, StatusCode::OK);
        let result = extract_result(&reply.body, "GetUserPrinters").unwrap();
        assert!(result.starts_with("<Printers>"));
        assert_eq!(result.matches("<Printer>").count(), 1);
        assert!(result.contains(r"<UncPath>\\srv\p1</UncPath>"));
        assert!(result.contains("<IsDefault>true</IsDefault>"));
    }

    // =============================================================================
    // DEFAULTS
    // =============================================================================

    #[tokio::test]
    async fn test_drive_without_letter_defaults_to_h() {
        let harness = Harness::new();
        harness.seed(tables::DRIVES, "UserId,UncPath\njdoe,\\\\srv\\home\\jdoe\n");

        let reply = harness
            .call(MAPPER, "GetUserDrives", &[("UserId", "JDOE"), ("Domain", "CORP")])
            .await;

        let result = extract_result(&reply.body, "GetUserDrives").unwrap();
        assert!(result.contains("<Drive>H:</Drive>"));
        assert!(result.contains("<Id>1</Id>"));
        assert!(result.contains("<Domain>CORP</Domain>"));
        assert!(result.contains("<DisconnectOnLogin>false</DisconnectOnLogin>"));
    }

    #[tokio::test]
    async fn test_personal_folders_with_bom_header() {
        let harness = Harness::new();
        harness.seed(
            tables::PERSONAL_FOLDERS,
            "\u{feff}UserId,UncPath\njdoe,\\\\srv\\pst\\jdoe.pst\n",
        );

        let reply = harness
            .call(MAPPER, "GetUserPersonalFolders", &[("UserId", "jdoe")])
            .await;

        let result = extract_result(&reply.body, "GetUserPersonalFolders").unwrap();
        assert!(result.starts_with("<PersonalFolders>"));
        assert!(result.contains(r"<UncPath>\\srv\pst\jdoe.pst</UncPath>"));
        assert!(result.contains("<UserId>jdoe</UserId>"));
    }

    #[tokio::test]
    async fn test_markup_in_values_is_escaped() {
        let harness = Harness::new();
        harness.seed(tables::PRINTERS, "HostName,Description\nWKS02,R&D <3rd floor>\n");

        let reply = harness
            .call(MAPPER, "GetUserPrinters", &[("HostName", "WKS02")])
            .await;

        let result = extract_result(&reply.body, "GetUserPrinters").unwrap();
        assert!(result.contains("<Description>R&amp;D &lt;3rd floor&gt;</Description>"));
    }

    // =============================================================================
    // EMPTY RESULTS
    // =============================================================================

    #[tokio::test]
    async fn test_no_matches_is_self_closing() {
        let harness = Harness::new();
        harness.seed(tables::DRIVES, "UserId,Drive\nsomeone,P:\n");

        let reply = harness
            .call(MAPPER, "GetUserDrives", &[("UserId", "abc")])
            .await;
        assert_eq!(extract_result(&reply.body, "GetUserDrives").unwrap(), "<Drives />");

        // Table file never created.
        let reply = harness
            .call(MAPPER, "GetUserPrinters", &[("HostName", "WKS01")])
            .await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(
            extract_result(&reply.body, "GetUserPrinters").unwrap(),
            "<Printers />"
        );
    }

    #[tokio::test]
    async fn test_probe_ignores_params_and_state() {
        let harness = Harness::new();
        harness.seed(tables::DRIVES, "UserId\nabc\n");

        for params in [&[][..], &[("UserId", "abc")][..]] {
            let reply = harness.call(MAPPER, "TestService", params).await;
            assert_eq!(reply.status, StatusCode::OK);
            assert_eq!(
                extract_result(&reply.body, "TestService").unwrap(),
                "<TestServiceResult>OK</TestServiceResult>"
            );
        }
    }

    // =============================================================================
    // ERRORS
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_and_cross_service_methods() {
        let harness = Harness::new();

        let reply = harness.call(MAPPER, "Foo", &[]).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert!(reply.content_type.starts_with("text/plain"));
        assert_eq!(reply.body, "Unknown method: Foo");

        // Inventory methods are not resolved on the mapper endpoint.
        let reply = harness
            .call(MAPPER, "InsertLogonInventory", &[("UserId", "jdoe")])
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(harness.store.count(tables::SESSIONS).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_malformed_envelopes() {
        let harness = Harness::new();
        let truncated = envelope("GetUserDrives", &[("UserId", "abc")]);
        let truncated = truncated[..truncated.len() - 20].to_string();

        for body in [
            String::new(),
            truncated,
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"><soap:Header/></soap:Envelope>".to_string(),
        ] {
            let reply = harness.post(MAPPER, body).await;
            assert_eq!(reply.status, StatusCode::BAD_REQUEST);
            assert!(reply.body.starts_with("Invalid SOAP request"));
        }
    }
}
