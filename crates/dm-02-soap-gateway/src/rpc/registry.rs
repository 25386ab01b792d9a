//! Per-service method tables.
//!
//! Each service resolves a method name case-sensitively against its own
//! table. The lookup maps are built once, on first use.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use dm_01_record_store::{tables, TableStore};

use super::fragment::PROBE_FRAGMENT;
use super::{inventory, mapper};
use crate::domain::error::{ApiError, ApiResult};
use crate::domain::methods::{MethodKind, ServiceKind};
use crate::domain::types::Params;

/// Handler bound to one method name.
pub type HandlerFn = fn(&Params, &dyn TableStore) -> ApiResult<String>;

/// Method metadata
#[derive(Clone, Copy)]
pub struct MethodInfo {
    /// SOAP method name (e.g., "GetUserDrives")
    pub name: &'static str,
    pub kind: MethodKind,
    /// Table read or appended to, `None` for the probe
    pub table: Option<&'static str>,
    /// Brief description
    pub description: &'static str,
    pub handler: HandlerFn,
}

impl MethodInfo {
    const fn probe() -> Self {
        Self {
            name: "TestService",
            kind: MethodKind::Probe,
            table: None,
            description: "Liveness probe, always OK",
            handler: test_service,
        }
    }

    const fn query(
        name: &'static str,
        table: &'static str,
        description: &'static str,
        handler: HandlerFn,
    ) -> Self {
        Self {
            name,
            kind: MethodKind::Query,
            table: Some(table),
            description,
            handler,
        }
    }

    const fn insert(
        name: &'static str,
        table: &'static str,
        description: &'static str,
        handler: HandlerFn,
    ) -> Self {
        Self {
            name,
            kind: MethodKind::Insert,
            table: Some(table),
            description,
            handler,
        }
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

fn test_service(_params: &Params, _store: &dyn TableStore) -> ApiResult<String> {
    Ok(PROBE_FRAGMENT.to_string())
}

pub static MAPPER_METHODS: [MethodInfo; 4] = [
    MethodInfo::probe(),
    MethodInfo::query(
        "GetUserDrives",
        tables::DRIVES,
        "Drive mappings for a user",
        mapper::get_user_drives,
    ),
    MethodInfo::query(
        "GetUserPrinters",
        tables::PRINTERS,
        "Printer mappings for a client host",
        mapper::get_user_printers,
    ),
    MethodInfo::query(
        "GetUserPersonalFolders",
        tables::PERSONAL_FOLDERS,
        "Personal folder (PST) mappings for a user",
        mapper::get_user_personal_folders,
    ),
];

pub static INVENTORY_METHODS: [MethodInfo; 6] = [
    MethodInfo::probe(),
    MethodInfo::insert(
        "InsertLogonInventory",
        tables::SESSIONS,
        "Record a logon event",
        inventory::insert_logon,
    ),
    MethodInfo::insert(
        "InsertLogoffInventory",
        tables::SESSIONS,
        "Record a logoff event",
        inventory::insert_logoff,
    ),
    MethodInfo::insert(
        "InsertActiveDriveMappingsFromInventory",
        tables::INVENTORY_DRIVES,
        "Record a drive mapping seen on a client",
        inventory::insert_drive_mappings,
    ),
    MethodInfo::insert(
        "InsertMapperPrinterInventory",
        tables::INVENTORY_PRINTERS,
        "Record a printer mapping seen on a client",
        inventory::insert_printer_mappings,
    ),
    MethodInfo::insert(
        "InsertActivePersonalFolderMappingsFromInventory",
        tables::INVENTORY_PST,
        "Record a PST mapping seen on a client",
        inventory::insert_personal_folder_mappings,
    ),
];

type MethodMap = HashMap<&'static str, &'static MethodInfo>;

fn index(methods: &'static [MethodInfo]) -> MethodMap {
    methods.iter().map(|info| (info.name, info)).collect()
}

static MAPPER_INDEX: LazyLock<MethodMap> = LazyLock::new(|| index(&MAPPER_METHODS));
static INVENTORY_INDEX: LazyLock<MethodMap> = LazyLock::new(|| index(&INVENTORY_METHODS));

/// Method table of one service.
#[derive(Debug, Clone, Copy)]
pub struct MethodRegistry {
    service: ServiceKind,
    methods: &'static MethodMap,
}

impl MethodRegistry {
    pub fn for_service(service: ServiceKind) -> Self {
        let methods: &'static MethodMap = match service {
            ServiceKind::Mapper => &*MAPPER_INDEX,
            ServiceKind::Inventory => &*INVENTORY_INDEX,
        };
        Self { service, methods }
    }

    pub fn service(&self) -> ServiceKind {
        self.service
    }

    /// Resolve `method`, or `ApiError::UnknownMethod` naming it.
    pub fn lookup(&self, method: &str) -> ApiResult<&'static MethodInfo> {
        self.methods
            .get(method)
            .copied()
            .ok_or_else(|| ApiError::unknown_method(self.service, method))
    }

    pub fn is_supported(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    /// Method names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
