//! # Domain Entities
//!
//! A `Record` is one row of a table: an insertion-ordered mapping of field
//! name to string value. Nothing is typed; every value is the text the
//! protocol carries.

/// Well-known table names.
///
/// The first three are query tables read by the mapper service, the rest are
/// written by the inventory service.
pub mod tables {
    /// Drive mappings, filtered by `UserId`.
    pub const DRIVES: &str = "drives";
    /// Printer mappings, filtered by `HostName`.
    pub const PRINTERS: &str = "printers";
    /// Personal folder (PST) mappings, filtered by `UserId`.
    pub const PERSONAL_FOLDERS: &str = "personal_folders";
    /// Logon and logoff events.
    pub const SESSIONS: &str = "sessions";
    /// Drive mappings reported by clients.
    pub const INVENTORY_DRIVES: &str = "inventory_drives";
    /// Printer mappings reported by clients.
    pub const INVENTORY_PRINTERS: &str = "inventory_printers";
    /// Personal folders reported by clients.
    pub const INVENTORY_PST: &str = "inventory_pst";

    /// All tables the services know about.
    pub const ALL: [&str; 7] = [
        DRIVES,
        PRINTERS,
        PERSONAL_FOLDERS,
        SESSIONS,
        INVENTORY_DRIVES,
        INVENTORY_PRINTERS,
        INVENTORY_PST,
    ];

    /// Table names end up in file paths, so only a conservative alphabet is allowed.
    pub fn is_valid_table_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    }
}

/// One row of a table.
///
/// Field order is the order of first insertion. Inserting an existing field
/// replaces its value without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `name`, if the record carries that field.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of `name`, or `default` when the field is absent.
    ///
    /// A present-but-empty field is returned as the empty string.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}
