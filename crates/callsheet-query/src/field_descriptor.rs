use crate::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// The canonical field invocation produced by a successful parse.
///
/// This is the parser's sole output artifact. The query endpoint looks
/// up a resolver keyed by [`field`](FieldDescriptor::field), invokes it
/// with [`args`](FieldDescriptor::args), and wraps the result under the
/// response key [`alias`](FieldDescriptor::alias).
///
/// A descriptor is immutable once returned and shares no state with any
/// other parse: every call produces a fresh instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// The resolver name. Never empty.
    field: String,

    /// The response key. Equal to `field` unless the document used
    /// `alias: field` syntax.
    alias: String,

    /// The argument tree, in document order.
    args: IndexMap<String, Value>,
}

impl FieldDescriptor {
    pub(crate) fn new(field: String, alias: String, args: IndexMap<String, Value>) -> Self {
        Self { field, alias, args }
    }

    /// Returns the field name used for resolver dispatch.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the alias under which the resolver's result is keyed in
    /// the response.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Returns the parsed arguments, in document order.
    pub fn args(&self) -> &IndexMap<String, Value> {
        &self.args
    }

    /// Decomposes the descriptor into `(field, alias, args)` for
    /// dispatch code that wants owned parts.
    pub fn into_parts(self) -> (String, String, IndexMap<String, Value>) {
        (self.field, self.alias, self.args)
    }
}
