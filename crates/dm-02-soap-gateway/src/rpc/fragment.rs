//! Result fragment builders shared by the query and insert handlers.
//!
//! A query is a table, a filter parameter and a fixed list of item fields
//! with per-field defaults. An insert is a table and a fixed list of
//! parameter names copied into the new record.

use chrono::Local;
use dm_01_record_store::{Record, TableStore};

use crate::codec::escape_text;
use crate::domain::error::ApiResult;
use crate::domain::types::Params;

/// Layout of the mocked service's pretty-printed collections.
const ITEM_INDENT: &str = "\n            ";
const FIELD_INDENT: &str = "\n                ";

/// `Timestamp` column format, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fragment returned by every `TestService`.
pub const PROBE_FRAGMENT: &str = "<TestServiceResult>OK</TestServiceResult>";

/// Value used when a record lacks a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Fixed text, e.g. `H:` for a drive letter.
    Literal(&'static str),
    /// The request parameter of that name (empty if absent).
    Param(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub const fn literal(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::Literal(default),
        }
    }

    pub const fn empty(name: &'static str) -> Self {
        Self::literal(name, "")
    }

    pub const fn param(name: &'static str, param: &'static str) -> Self {
        Self {
            name,
            default: FieldDefault::Param(param),
        }
    }

    fn resolve<'a>(&self, record: &'a Record, params: &'a Params) -> &'a str {
        let default = match self.default {
            FieldDefault::Literal(text) => text,
            FieldDefault::Param(name) => params.get_or_empty(name),
        };
        record.get_or(self.name, default)
    }
}

/// A filtered read of one table rendered as a collection element.
#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    pub table: &'static str,
    /// Parameter and record field compared case-insensitively.
    pub filter: &'static str,
    pub collection: &'static str,
    pub item: &'static str,
    pub fields: &'static [FieldSpec],
}

impl QuerySpec {
    pub fn run(&self, params: &Params, store: &dyn TableStore) -> ApiResult<String> {
        let records = store.load(self.table)?;
        let wanted = params.get_or_empty(self.filter).to_uppercase();

        let items: String = records
            .iter()
            .filter(|record| record.get_or(self.filter, "").to_uppercase() == wanted)
            .map(|record| self.render_item(record, params))
            .collect();

        if items.is_empty() {
            return Ok(format!("<{} />", self.collection));
        }
        Ok(format!("<{0}>{items}</{0}>", self.collection))
    }

    fn render_item(&self, record: &Record, params: &Params) -> String {
        let mut out = format!("{ITEM_INDENT}<{}>", self.item);
        for field in self.fields {
            let value = escape_text(field.resolve(record, params));
            out.push_str(&format!("{FIELD_INDENT}<{0}>{value}</{0}>", field.name));
        }
        out.push_str(&format!("{ITEM_INDENT}</{}>", self.item));
        out
    }
}

/// An append of one request-derived record.
#[derive(Debug, Clone, Copy)]
pub struct InsertSpec {
    pub method: &'static str,
    pub table: &'static str,
    /// Fixed `EventType` column (logon/logoff only).
    pub event_type: Option<&'static str>,
    /// Parameters copied in order; absent ones become empty strings.
    pub fields: &'static [&'static str],
}

impl InsertSpec {
    pub fn run(&self, params: &Params, store: &dyn TableStore) -> ApiResult<String> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let record = self.build_record(params, &timestamp);
        store.append(self.table, &record)?;
        Ok(format!("<{0}Result>SUCCESS</{0}Result>", self.method))
    }

    pub fn build_record(&self, params: &Params, timestamp: &str) -> Record {
        let mut record = Record::new().with("Timestamp", timestamp);
        if let Some(event_type) = self.event_type {
            record.insert("EventType", event_type);
        }
        for name in self.fields {
            record.insert(*name, params.get_or_empty(name));
        }
        record
    }
}
