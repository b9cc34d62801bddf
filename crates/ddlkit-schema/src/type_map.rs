//! Logical to native type mapping
//!
//! Each dialect carries a `TypeMap` from logical column types (`string`,
//! `decimal`, `primaryKey`, ...) to a native type plus the default
//! limit/precision/scale that native type accepts. An attribute missing from
//! a mapping means the native type does not take it.

use ddlkit_core::ColumnSchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel logical type for an auto-incrementing primary key column
pub const PRIMARY_KEY: &str = "primaryKey";

/// Native type descriptor for one logical type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMapping {
    /// Native SQL type name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
}

impl TypeMapping {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            limit: None,
            precision: None,
            scale: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Per-dialect registry of logical type mappings, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeMap {
    entries: IndexMap<String, TypeMapping>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping, builder style
    pub fn with(mut self, logical: impl Into<String>, mapping: TypeMapping) -> Self {
        self.insert(logical, mapping);
        self
    }

    /// Add or replace a mapping
    pub fn insert(&mut self, logical: impl Into<String>, mapping: TypeMapping) {
        self.entries.insert(logical.into(), mapping);
    }

    /// Look up the mapping for a logical type. `None` means the type is used
    /// verbatim as a native type.
    pub fn resolve(&self, logical: &str) -> Option<&TypeMapping> {
        self.entries.get(logical)
    }

    /// The native type used for `primaryKey` columns
    pub fn primary_key(&self) -> Option<&TypeMapping> {
        self.resolve(PRIMARY_KEY)
    }

    /// Replace entries with `overrides`, keeping the order of existing ones
    pub fn merge(mut self, overrides: &IndexMap<String, TypeMapping>) -> Self {
        for (logical, mapping) in overrides {
            self.entries.insert(logical.clone(), mapping.clone());
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeMapping)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Map an introspected native type back to a logical type.
    ///
    /// An entry whose limit equals `limit` wins (so MySQL `tinyint(1)` is
    /// `boolean`); otherwise the first entry declared with that native name.
    /// The `primaryKey` sentinel never matches.
    pub fn logical_type(&self, native: &str, limit: Option<u32>) -> Option<&str> {
        let mut first = None;
        for (logical, mapping) in &self.entries {
            if logical == PRIMARY_KEY || !mapping.name.eq_ignore_ascii_case(native) {
                continue;
            }
            if limit.is_some() && mapping.limit == limit {
                return Some(logical.as_str());
            }
            first.get_or_insert(logical.as_str());
        }
        first
    }

    /// Introspection record for a native column type: the logical type that
    /// maps back to it, carrying only the arguments that logical type takes.
    /// Unmapped types keep their native name and arguments.
    pub fn column_schema(&self, native: &NativeType) -> ColumnSchema {
        let logical = self
            .logical_type(&native.name, native.first_arg())
            .and_then(|logical| Some((logical, self.resolve(logical)?)));

        let Some((logical, mapping)) = logical else {
            tracing::warn!(native = %native.name, "no logical type for native type");
            let mut column = ColumnSchema::new(native.name.clone());
            match native.args.as_slice() {
                [limit] => column.limit = Some(*limit),
                [precision, scale, ..] => {
                    column.precision = Some(*precision);
                    column.scale = Some(*scale);
                }
                [] => {}
            }
            return column;
        };

        let mut column = ColumnSchema::new(logical);
        if mapping.limit.is_some() {
            column.limit = native.first_arg();
        } else if mapping.precision.is_some() {
            column.precision = native.first_arg();
            if mapping.scale.is_some() {
                column.scale = native.second_arg();
            }
        }
        column
    }
}

/// A native type string split into its name and numeric arguments,
/// e.g. `decimal(10,2) unsigned` -> `decimal`, `[10, 2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeType {
    /// Lower-cased base type name
    pub name: String,
    pub args: Vec<u32>,
}

impl NativeType {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.find('(') {
            Some(open) => {
                let close = raw[open..].find(')').map_or(raw.len(), |i| open + i);
                let args = raw[open + 1..close]
                    .split(',')
                    .map(|arg| arg.trim().parse::<u32>())
                    .collect::<Result<Vec<_>, _>>()
                    .unwrap_or_default();
                Self {
                    name: raw[..open].trim().to_lowercase(),
                    args,
                }
            }
            None => Self {
                name: raw
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_lowercase(),
                args: Vec::new(),
            },
        }
    }

    /// First argument, the length of `varchar(255)` or the precision of `decimal(10,2)`
    pub fn first_arg(&self) -> Option<u32> {
        self.args.first().copied()
    }

    /// Second argument, the scale of `decimal(10,2)`
    pub fn second_arg(&self) -> Option<u32> {
        self.args.get(1).copied()
    }
}
