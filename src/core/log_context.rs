//! Structured context fields and the precedence rules between context sources
//!
//! A log call can see three contexts:
//! - the local context passed at the call site (highest precedence)
//! - the dynamic context produced by the logger's context function
//! - the static context held by the logger (lowest precedence)
//!
//! When a key appears in more than one of them only the highest-precedence
//! value is emitted. The `time`, `lvl` and `msg` keys belong to the record
//! itself and are never taken from a context. When an error is attached,
//! the `err` key belongs to the error and is dropped from contexts too.

use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Field name reserved for an attached error
pub const ERR_FIELD_NAME: &str = "err";

pub const TIME_FIELD_NAME: &str = "time";
pub const LEVEL_FIELD_NAME: &str = "lvl";
pub const MSG_FIELD_NAME: &str = "msg";

/// Keys every record writes itself. Context entries using them are dropped.
pub const RECORD_FIELD_NAMES: [&str; 3] = [TIME_FIELD_NAME, LEVEL_FIELD_NAME, MSG_FIELD_NAME];

/// Function evaluated once per log call to produce the dynamic context
pub type ContextFn = Arc<dyn Fn() -> Context + Send + Sync>;

/// String to string mapping of structured fields
///
/// Keys are kept sorted so that identical inputs always render identical
/// bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    fields: BTreeMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// Add a field to the context
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field to the context (mutable version)
    pub fn add_field<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Merge three contexts into one map following the precedence rules.
    ///
    /// Mostly useful for inspection; the logger renders fields directly
    /// without building this map.
    pub fn merged(
        local: &Context,
        dynamic: Option<&Context>,
        static_ctx: &Context,
        error_attached: bool,
    ) -> Context {
        let mut out = Context::new();
        merge_fields(local, dynamic, static_ctx, error_attached, |k, v| {
            out.add_field(k, v);
        });
        out
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Context {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.fields {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", k, v)?;
            first = false;
        }
        Ok(())
    }
}

/// Visit every field that survives the merge, exactly once per key.
///
/// Local fields come first, then dynamic fields not shadowed by local ones,
/// then static fields shadowed by neither.
pub fn merge_fields<F>(
    local: &Context,
    dynamic: Option<&Context>,
    static_ctx: &Context,
    error_attached: bool,
    mut emit: F,
) where
    F: FnMut(&str, &str),
{
    let reserved = |k: &str| {
        RECORD_FIELD_NAMES.iter().any(|r| *r == k) || (error_attached && k == ERR_FIELD_NAME)
    };

    for (k, v) in local {
        if reserved(k) {
            continue;
        }
        emit(k, v);
    }

    if let Some(dynamic) = dynamic {
        for (k, v) in dynamic {
            if reserved(k) || local.contains_key(k) {
                continue;
            }
            emit(k, v);
        }
    }

    for (k, v) in static_ctx {
        if reserved(k) || local.contains_key(k) {
            continue;
        }
        if dynamic.is_some_and(|d| d.contains_key(k)) {
            continue;
        }
        emit(k, v);
    }
}
