//! Sample-value discovery
//!
//! Maps one raw sample value to exactly one type shape, dispatching on a
//! closed sum type of sample kinds. Discovery is total: every well-formed
//! sample has some discoverable shape, falling back to a heterogeneous
//! tuple when no generalization applies.
//!
//! Homogeneous sequences of tuples or same-keyed mappings are transposed
//! column-wise so each column's type is inferred independently, instead of
//! unifying whole-row shapes directly.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde_json::Value;
use tracing::debug;

use crate::coerce;
use crate::config::DiscoveryConfig;
use crate::dtype::{self, DType};
use crate::error::DiscoverError;
use crate::graph::GeneralityGraph;
use crate::shape::{ScalarKind, TypeShape};
use crate::unify::{self, unify_element};

/// A raw sample value submitted for discovery
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValue {
    /// Explicit absence of a value
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex { re: f64, im: f64 },
    Str(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    /// Numeric-array value: element dtype plus dimensions
    Array { dims: Vec<usize>, dtype: DType },
    /// Ordered sequence, homogeneous or not
    Seq(Vec<SampleValue>),
    /// String-keyed mapping
    Map(BTreeMap<String, SampleValue>),
}

impl From<&Value> for SampleValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => SampleValue::Null,
            Value::Bool(b) => SampleValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => SampleValue::Int(i),
                None => SampleValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => SampleValue::Str(s.clone()),
            Value::Array(items) => SampleValue::Seq(items.iter().map(SampleValue::from).collect()),
            Value::Object(map) => SampleValue::Map(
                map.iter()
                    .map(|(key, val)| (key.clone(), SampleValue::from(val)))
                    .collect(),
            ),
        }
    }
}

/// Shape discovery engine
///
/// Owns the generality graph (with its cached topological order) and the
/// discovery configuration. Construction is the only non-trivial step;
/// after it, every method is a pure function over immutable state, so one
/// engine can serve arbitrarily many concurrent calls.
#[derive(Debug, Clone)]
pub struct Discoverer {
    graph: GeneralityGraph,
    config: DiscoveryConfig,
}

impl Discoverer {
    /// Create a discoverer with the standard graph and default configuration
    pub fn new() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }

    /// Create a discoverer with a custom configuration
    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self::with_graph(GeneralityGraph::default(), config)
    }

    /// Create a discoverer with a custom generality graph
    pub fn with_graph(graph: GeneralityGraph, config: DiscoveryConfig) -> Self {
        Self { graph, config }
    }

    /// The generality graph in use
    pub fn graph(&self) -> &GeneralityGraph {
        &self.graph
    }

    /// The configuration in use
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Discover the type shape of one sample value
    pub fn discover(&self, value: &SampleValue) -> TypeShape {
        match value {
            SampleValue::Null => TypeShape::Scalar(ScalarKind::Null),
            SampleValue::Bool(_) => TypeShape::Scalar(ScalarKind::Bool),
            SampleValue::Int(_) => TypeShape::Scalar(ScalarKind::Int64),
            SampleValue::Float(_) => TypeShape::Scalar(ScalarKind::Real),
            SampleValue::Complex { .. } => TypeShape::Scalar(ScalarKind::Complex),
            SampleValue::Date(_) => TypeShape::Scalar(ScalarKind::Date),
            SampleValue::Time(_) => TypeShape::Scalar(ScalarKind::Time),
            SampleValue::DateTime(dt) => {
                // A midnight timestamp carries no informative time component.
                let time = dt.time();
                if time.num_seconds_from_midnight() == 0 && time.nanosecond() == 0 {
                    TypeShape::Scalar(ScalarKind::Date)
                } else {
                    TypeShape::Scalar(ScalarKind::DateTime)
                }
            }
            SampleValue::Str(s) => self.discover_str(s),
            SampleValue::Array { dims, dtype } => dtype::array_shape(dims, *dtype),
            SampleValue::Seq(items) => self.discover_seq(items),
            SampleValue::Map(map) => TypeShape::Record(
                map.iter()
                    .map(|(key, val)| (key.clone(), self.discover(val)))
                    .collect(),
            ),
        }
    }

    /// Unify parallel shapes through this engine's generality graph
    pub fn unify(&self, shapes: &[TypeShape]) -> TypeShape {
        unify::unify(shapes, &self.graph)
    }

    /// Discover the shape of an already-parsed JSON value
    pub fn discover_value(&self, value: &Value) -> TypeShape {
        self.discover(&SampleValue::from(value))
    }

    /// Parse a JSON document and discover its shape
    pub fn discover_json(&self, json: &str) -> Result<TypeShape, DiscoverError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.discover_value(&value))
    }

    fn discover_str(&self, s: &str) -> TypeShape {
        if s.is_empty() {
            return if self.config.empty_string_is_null {
                TypeShape::Scalar(ScalarKind::Null)
            } else {
                TypeShape::Scalar(ScalarKind::String)
            };
        }
        if self.config.coerce_strings {
            if let Some(coerced) = coerce::coerce_string(s, self.config.parse_dates) {
                return self.discover(&coerced);
            }
        }
        TypeShape::Scalar(ScalarKind::String)
    }

    fn discover_seq(&self, items: &[SampleValue]) -> TypeShape {
        if items.is_empty() {
            return TypeShape::Tuple(Vec::new());
        }

        if let Some(shape) = self.discover_tuple_columns(items) {
            return shape;
        }
        if let Some(shape) = self.discover_record_columns(items) {
            return shape;
        }

        let shapes: Vec<TypeShape> = items.iter().map(|item| self.discover(item)).collect();
        match unify_element(&shapes, &self.graph) {
            Some(element) => TypeShape::fixed(items.len(), element),
            None => TypeShape::Tuple(shapes),
        }
    }

    /// Column-wise fast path for a sequence of same-arity tuples
    ///
    /// Each position becomes a column unified on its own; any column that
    /// fails to unify abandons the fast path entirely.
    fn discover_tuple_columns(&self, items: &[SampleValue]) -> Option<TypeShape> {
        let rows: Vec<&[SampleValue]> = items
            .iter()
            .map(|item| match item {
                SampleValue::Seq(row) => Some(row.as_slice()),
                _ => None,
            })
            .collect::<Option<_>>()?;
        let arity = rows[0].len();
        if rows.iter().any(|row| row.len() != arity) {
            return None;
        }

        let mut columns = Vec::with_capacity(arity);
        for position in 0..arity {
            let shapes: Vec<TypeShape> = rows
                .iter()
                .map(|row| self.discover(&row[position]))
                .collect();
            match unify_element(&shapes, &self.graph) {
                Some(shape) => columns.push(shape),
                None => {
                    debug!(position, "column did not unify, abandoning tuple fast path");
                    return None;
                }
            }
        }

        Some(TypeShape::fixed(items.len(), self.row_shape(columns)))
    }

    /// Column-wise fast path for a sequence of same-keyed mappings
    fn discover_record_columns(&self, items: &[SampleValue]) -> Option<TypeShape> {
        let maps: Vec<&BTreeMap<String, SampleValue>> = items
            .iter()
            .map(|item| match item {
                SampleValue::Map(map) => Some(map),
                _ => None,
            })
            .collect::<Option<_>>()?;
        if maps.iter().any(|map| !map.keys().eq(maps[0].keys())) {
            return None;
        }

        let mut fields = BTreeMap::new();
        for key in maps[0].keys() {
            let shapes: Vec<TypeShape> = maps
                .iter()
                .map(|map| map.get(key).map(|val| self.discover(val)))
                .collect::<Option<_>>()?;
            match unify_element(&shapes, &self.graph) {
                Some(shape) => {
                    fields.insert(key.clone(), shape);
                }
                None => {
                    debug!(key = %key, "column did not unify, abandoning record fast path");
                    return None;
                }
            }
        }

        Some(TypeShape::fixed(items.len(), TypeShape::Record(fields)))
    }

    /// Combine per-column shapes into a row shape
    ///
    /// All-identical columns collapse into a fixed repetition and columns
    /// that are dimensions of one element type merge; otherwise the row is
    /// the positional tuple of column shapes.
    fn row_shape(&self, columns: Vec<TypeShape>) -> TypeShape {
        if !columns.is_empty() {
            if let Some(element) = unify::unify_identical(&columns)
                .or_else(|| unify::unify_dimensions(&columns, &self.graph))
            {
                return TypeShape::fixed(columns.len(), element);
            }
        }
        TypeShape::Tuple(columns)
    }
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new()
    }
}
