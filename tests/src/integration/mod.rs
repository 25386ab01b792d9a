//! # Integration Flows
//!
//! Every flow drives the real axum router over a `CsvTableStore` in a
//! temporary directory, so codec, registries, handlers and storage are
//! exercised together.

pub mod inventory_flows;
pub mod mapper_flows;

#[cfg(test)]
pub(crate) mod support {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use dm_01_record_store::CsvTableStore;
    use dm_02_soap_gateway::{GatewayConfig, SoapGatewayService};
    use tempfile::TempDir;
    use tower::ServiceExt;

    pub const MAPPER: &str = "/ClassicMapper.asmx";
    pub const INVENTORY: &str = "/ClassicInventory.asmx";

    /// Gateway over a CSV store living in its own temp directory.
    pub struct Harness {
        pub dir: TempDir,
        pub store: Arc<CsvTableStore>,
        pub service: SoapGatewayService,
    }

    impl Harness {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let store = Arc::new(CsvTableStore::open(dir.path()).unwrap());
            let mut config = GatewayConfig::default();
            config.storage.data_dir = dir.path().to_path_buf();
            let service = SoapGatewayService::new(config, store.clone()).unwrap();
            Self {
                dir,
                store,
                service,
            }
        }

        /// Write a hand-maintained table file, as an operator would.
        pub fn seed(&self, table: &str, csv: &str) {
            std::fs::write(self.dir.path().join(format!("{table}.csv")), csv).unwrap();
        }

        pub async fn call(&self, path: &str, method: &str, params: &[(&str, &str)]) -> Reply {
            self.post(path, envelope(method, params)).await
        }

        pub async fn post(&self, path: &str, body: String) -> Reply {
            let response = self
                .service
                .router()
                .oneshot(
                    Request::post(path)
                        .header(header::CONTENT_TYPE, "text/xml; charset=utf-8")
                        .header("SOAPAction", "\"http://webtools.japan.nom/Call\"")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();

            let status = response.status();
            let content_type = response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            Reply {
                status,
                content_type,
                body: String::from_utf8(bytes.to_vec()).unwrap(),
            }
        }
    }

    pub struct Reply {
        pub status: StatusCode,
        pub content_type: String,
        pub body: String,
    }

    /// A client-style request envelope.
    pub fn envelope(method: &str, params: &[(&str, &str)]) -> String {
        let params: String = params
            .iter()
            .map(|(name, value)| format!("\n      <{name}>{value}</{name}>"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <{method} xmlns="http://webtools.japan.nom">{params}
    </{method}>
  </soap:Body>
</soap:Envelope>"#
        )
    }
}
