//! ClassicInventory handlers: each call appends one timestamped record.

use dm_01_record_store::{tables, TableStore};

use super::fragment::InsertSpec;
use crate::domain::error::ApiResult;
use crate::domain::types::Params;

const SESSION_FIELDS: &[&str] = &[
    "UserId",
    "UserDomain",
    "HostName",
    "Domain",
    "SiteName",
    "City",
    "OuMapping",
];

pub const LOGON: InsertSpec = InsertSpec {
    method: "InsertLogonInventory",
    table: tables::SESSIONS,
    event_type: Some("Logon"),
    fields: SESSION_FIELDS,
};

pub const LOGOFF: InsertSpec = InsertSpec {
    method: "InsertLogoffInventory",
    table: tables::SESSIONS,
    event_type: Some("Logoff"),
    fields: SESSION_FIELDS,
};

pub const DRIVE_MAPPINGS: InsertSpec = InsertSpec {
    method: "InsertActiveDriveMappingsFromInventory",
    table: tables::INVENTORY_DRIVES,
    event_type: None,
    fields: &[
        "UserId",
        "HostName",
        "Domain",
        "SiteName",
        "City",
        "Drive",
        "UncPath",
        "Description",
        "OuMapping",
    ],
};

pub const PRINTER_MAPPINGS: InsertSpec = InsertSpec {
    method: "InsertMapperPrinterInventory",
    table: tables::INVENTORY_PRINTERS,
    event_type: None,
    fields: &[
        "UserId",
        "HostName",
        "Domain",
        "UncPath",
        "IsDefault",
        "Driver",
        "Port",
        "Description",
    ],
};

pub const PERSONAL_FOLDER_MAPPINGS: InsertSpec = InsertSpec {
    method: "InsertActivePersonalFolderMappingsFromInventory",
    table: tables::INVENTORY_PST,
    event_type: None,
    fields: &["UserId", "HostName", "Path", "UncPath", "Size", "PstLastUpdate"],
};

pub fn insert_logon(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    LOGON.run(params, store)
}

pub fn insert_logoff(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    LOGOFF.run(params, store)
}

pub fn insert_drive_mappings(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    DRIVE_MAPPINGS.run(params, store)
}

pub fn insert_printer_mappings(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    PRINTER_MAPPINGS.run(params, store)
}

pub fn insert_personal_folder_mappings(
    params: &Params,
    store: &dyn TableStore,
) -> ApiResult<String> {
    PERSONAL_FOLDER_MAPPINGS.run(params, store)
}
