//! Strongly-typed names carried by metric records.
//!
//! Keeping model names apart from user, owner, and source names stops a
//! ranking keyed on one from being fed the other.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A data model (table or view) being measured.
    pub struct ModelName;
}

define_newtype_string! {
    /// A warehouse user issuing queries.
    pub struct UserName;
}

define_newtype_string! {
    /// The owner responsible for a model.
    pub struct OwnerName;
}

define_newtype_string! {
    /// Upstream system a model is loaded from.
    pub struct SourceSystem;
}

define_newtype_string! {
    /// Warehouse schema the metrics describe.
    ///
    /// Opaque to the metrics engine: it labels reports and picks which
    /// warehouse schema to read, nothing more.
    pub struct SchemaName;
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
