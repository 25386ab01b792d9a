//! Service and method classification.
//!
//! The gateway hosts two logical services. Each has its own method
//! registry; a name present in both (only `TestService`) is resolved
//! independently per service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical SOAP service, one per HTTP endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    /// Read side: drive, printer and personal folder mappings.
    Mapper,
    /// Write side: logon/logoff events and client inventory.
    Inventory,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 2] = [ServiceKind::Mapper, ServiceKind::Inventory];

    /// Service name as it appears in logs and on the status page.
    pub const fn name(&self) -> &'static str {
        match self {
            ServiceKind::Mapper => "ClassicMapper",
            ServiceKind::Inventory => "ClassicInventory",
        }
    }

    /// Endpoint path of the mocked `.asmx` service.
    pub const fn default_path(&self) -> &'static str {
        match self {
            ServiceKind::Mapper => "/ClassicMapper.asmx",
            ServiceKind::Inventory => "/ClassicInventory.asmx",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a method does with the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Liveness probe, never touches the store.
    Probe,
    /// Filters a query table.
    Query,
    /// Appends one record to an event/inventory table.
    Insert,
}

impl MethodKind {
    pub const fn is_write(&self) -> bool {
        matches!(self, MethodKind::Insert)
    }
}
