//! ClassicMapper handlers: per-user drive, printer and personal folder
//! mappings read from the hand-maintained query tables.

use dm_01_record_store::{tables, TableStore};

use super::fragment::{FieldSpec, QuerySpec};
use crate::domain::error::ApiResult;
use crate::domain::types::Params;

pub const DRIVES: QuerySpec = QuerySpec {
    table: tables::DRIVES,
    filter: "UserId",
    collection: "Drives",
    item: "Drive",
    fields: &[
        FieldSpec::literal("Id", "1"),
        FieldSpec::param("Domain", "Domain"),
        FieldSpec::param("UserId", "UserId"),
        FieldSpec::empty("AdGroup"),
        FieldSpec::empty("Site"),
        FieldSpec::literal("Drive", "H:"),
        FieldSpec::empty("UncPath"),
        FieldSpec::empty("Description"),
        FieldSpec::literal("DisconnectOnLogin", "false"),
    ],
};

pub const PRINTERS: QuerySpec = QuerySpec {
    table: tables::PRINTERS,
    filter: "HostName",
    collection: "Printers",
    item: "Printer",
    fields: &[
        FieldSpec::literal("Id", "1"),
        FieldSpec::empty("UncPath"),
        FieldSpec::literal("IsDefault", "false"),
        FieldSpec::empty("Description"),
    ],
};

pub const PERSONAL_FOLDERS: QuerySpec = QuerySpec {
    table: tables::PERSONAL_FOLDERS,
    filter: "UserId",
    collection: "PersonalFolders",
    item: "PersonalFolder",
    fields: &[
        FieldSpec::literal("Id", "1"),
        FieldSpec::param("UserId", "UserId"),
        FieldSpec::empty("UncPath"),
        FieldSpec::literal("DisconnectOnLogin", "false"),
    ],
};

/// Drive mappings for `UserId`.
pub fn get_user_drives(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    DRIVES.run(params, store)
}

/// Printer mappings for the client `HostName`.
pub fn get_user_printers(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    PRINTERS.run(params, store)
}

/// PST mappings for `UserId`.
pub fn get_user_personal_folders(params: &Params, store: &dyn TableStore) -> ApiResult<String> {
    PERSONAL_FOLDERS.run(params, store)
}
