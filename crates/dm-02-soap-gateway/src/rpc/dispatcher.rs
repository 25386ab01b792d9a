//! Request dispatch: decode → lookup → handler → encode.

use std::sync::Arc;

use dm_01_record_store::TableStore;
use tracing::{debug, info};

use super::registry::MethodRegistry;
use crate::codec;
use crate::domain::error::ApiResult;
use crate::domain::methods::{MethodKind, ServiceKind};

/// Encoded response of one successful call.
#[derive(Debug, Clone)]
pub struct SoapReply {
    pub method: &'static str,
    pub kind: MethodKind,
    pub envelope: String,
}

/// Routes decoded calls to the handler of the invoked service.
///
/// Synchronous: one call runs start to finish on the calling thread. The
/// HTTP layer runs it on the blocking pool.
#[derive(Clone)]
pub struct SoapDispatcher {
    store: Arc<dyn TableStore>,
    mapper: MethodRegistry,
    inventory: MethodRegistry,
}

impl SoapDispatcher {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            store,
            mapper: MethodRegistry::for_service(ServiceKind::Mapper),
            inventory: MethodRegistry::for_service(ServiceKind::Inventory),
        }
    }

    pub fn registry(&self, service: ServiceKind) -> &MethodRegistry {
        match service {
            ServiceKind::Mapper => &self.mapper,
            ServiceKind::Inventory => &self.inventory,
        }
    }

    /// Handle one raw request body sent to `service`'s endpoint.
    pub fn handle(&self, service: ServiceKind, body: &[u8]) -> ApiResult<SoapReply> {
        let request = codec::decode(body)?;

        info!(service = %service, method = %request.method, "SOAP call");
        for (name, value) in request.params.iter() {
            debug!(service = %service, param = name, value, "parameter");
        }

        let info = self.registry(service).lookup(&request.method)?;
        let fragment = (info.handler)(&request.params, self.store.as_ref())?;

        Ok(SoapReply {
            method: info.name,
            kind: info.kind,
            envelope: codec::encode(info.name, &fragment),
        })
    }
}
