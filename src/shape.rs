//! The structural type-shape data model
//!
//! A [`TypeShape`] is an immutable, value-comparable description of sampled
//! data: a scalar kind, an optional (nullable) shape, a positional tuple, a
//! labeled record, or a repetition dimension. Shapes are built bottom-up
//! during discovery and unification and are never mutated in place.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Base scalar kind of a type shape
///
/// `Null` is the distinguished absence-of-information kind: it is produced
/// for explicit null samples and empty strings, and unification resolves a
/// mix of `Null` and one other kind into an optional shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarKind {
    /// Signed 32-bit integer
    Int32,
    /// Signed 64-bit integer
    Int64,
    /// 64-bit floating point
    Real,
    /// Boolean
    Bool,
    /// Complex number
    Complex,
    /// Opaque string
    String,
    /// Calendar date
    Date,
    /// Time of day
    Time,
    /// Combined date and time
    DateTime,
    /// Absence of informative type
    Null,
}

impl ScalarKind {
    /// All scalar kinds in declaration order
    ///
    /// Declaration order doubles as the deterministic tie-break when the
    /// generality graph builds its topological ordering.
    pub const ALL: &'static [ScalarKind] = &[
        ScalarKind::Int32,
        ScalarKind::Int64,
        ScalarKind::Real,
        ScalarKind::Bool,
        ScalarKind::Complex,
        ScalarKind::String,
        ScalarKind::Date,
        ScalarKind::Time,
        ScalarKind::DateTime,
        ScalarKind::Null,
    ];

    /// Get the display name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Int32 => "int32",
            ScalarKind::Int64 => "int64",
            ScalarKind::Real => "real",
            ScalarKind::Bool => "bool",
            ScalarKind::Complex => "complex",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::DateTime => "datetime",
            ScalarKind::Null => "null",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size of a repetition dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DimSize {
    /// Exactly this many occurrences
    Fixed(usize),
    /// Variable/unknown occurrence count
    Var,
}

impl fmt::Display for DimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimSize::Fixed(n) => write!(f, "{}", n),
            DimSize::Var => f.write_str("var"),
        }
    }
}

/// Structural type description of sampled data
///
/// Equality is structural: two shapes are equal when they describe the same
/// structure, independent of how they were built. Record fields live in a
/// `BTreeMap`, so field order is canonical (lexicographic by name) and does
/// not depend on input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeShape {
    /// A base scalar kind
    Scalar(ScalarKind),
    /// The inner shape, additionally admitting the null value
    Option(Box<TypeShape>),
    /// Fixed-arity positional product; order-sensitive
    Tuple(Vec<TypeShape>),
    /// Labeled product with unique, name-ordered fields
    Record(BTreeMap<String, TypeShape>),
    /// Repetition: `size` occurrences of `element`
    Dimension { size: DimSize, element: Box<TypeShape> },
}

impl TypeShape {
    /// Wrap a shape as optional, normalizing on construction
    ///
    /// `Option(Null)` collapses to `Null` and an already-optional shape is
    /// returned unchanged, so optionality never nests.
    pub fn option(inner: TypeShape) -> TypeShape {
        match inner {
            TypeShape::Scalar(ScalarKind::Null) => inner,
            TypeShape::Option(_) => inner,
            other => TypeShape::Option(Box::new(other)),
        }
    }

    /// Build a record shape from field pairs; fields sort by name
    pub fn record<I>(fields: I) -> TypeShape
    where
        I: IntoIterator<Item = (String, TypeShape)>,
    {
        TypeShape::Record(fields.into_iter().collect())
    }

    /// Build a repetition dimension around an element shape
    pub fn dimension(size: DimSize, element: TypeShape) -> TypeShape {
        TypeShape::Dimension {
            size,
            element: Box::new(element),
        }
    }

    /// Build a fixed-size repetition dimension
    pub fn fixed(count: usize, element: TypeShape) -> TypeShape {
        TypeShape::dimension(DimSize::Fixed(count), element)
    }

    /// Build a variable-size repetition dimension
    pub fn var(element: TypeShape) -> TypeShape {
        TypeShape::dimension(DimSize::Var, element)
    }

    /// Check whether this shape is the null kind
    pub fn is_null(&self) -> bool {
        matches!(self, TypeShape::Scalar(ScalarKind::Null))
    }

    /// Get the scalar kind of this shape, if it is a bare scalar
    pub fn as_scalar(&self) -> Option<ScalarKind> {
        match self {
            TypeShape::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<ScalarKind> for TypeShape {
    fn from(kind: ScalarKind) -> Self {
        TypeShape::Scalar(kind)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Scalar(kind) => write!(f, "{}", kind),
            TypeShape::Option(inner) => write!(f, "?{}", inner),
            TypeShape::Tuple(elements) => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str(")")
            }
            TypeShape::Record(fields) => {
                f.write_str("{")?;
                for (i, (name, shape)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, shape)?;
                }
                f.write_str("}")
            }
            TypeShape::Dimension { size, element } => write!(f, "{} * {}", size, element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_fields_sort_by_name() {
        let a = TypeShape::record(vec![
            ("y".to_string(), TypeShape::Scalar(ScalarKind::String)),
            ("x".to_string(), TypeShape::Scalar(ScalarKind::Int64)),
        ]);
        let b = TypeShape::record(vec![
            ("x".to_string(), TypeShape::Scalar(ScalarKind::Int64)),
            ("y".to_string(), TypeShape::Scalar(ScalarKind::String)),
        ]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "{x: int64, y: string}");
    }

    #[test]
    fn test_option_normalization() {
        let opt = TypeShape::option(TypeShape::Scalar(ScalarKind::Int64));
        assert_eq!(TypeShape::option(opt.clone()), opt);
        assert_eq!(
            TypeShape::option(TypeShape::Scalar(ScalarKind::Null)),
            TypeShape::Scalar(ScalarKind::Null)
        );
    }

    #[test]
    fn test_dimension_sizes_are_distinct() {
        let ten = TypeShape::fixed(10, TypeShape::Scalar(ScalarKind::String));
        let twenty = TypeShape::fixed(20, TypeShape::Scalar(ScalarKind::String));
        assert_ne!(ten, twenty);
        assert_ne!(ten, TypeShape::var(TypeShape::Scalar(ScalarKind::String)));
    }

    #[test]
    fn test_display_rendering() {
        let shape = TypeShape::fixed(
            3,
            TypeShape::Tuple(vec![
                TypeShape::Scalar(ScalarKind::Int64),
                TypeShape::option(TypeShape::Scalar(ScalarKind::Real)),
            ]),
        );
        assert_eq!(shape.to_string(), "3 * (int64, ?real)");

        let ragged = TypeShape::fixed(2, TypeShape::var(TypeShape::Scalar(ScalarKind::String)));
        assert_eq!(ragged.to_string(), "2 * var * string");
    }

    #[test]
    fn test_tuple_order_sensitive() {
        let a = TypeShape::Tuple(vec![
            TypeShape::Scalar(ScalarKind::Int64),
            TypeShape::Scalar(ScalarKind::String),
        ]);
        let b = TypeShape::Tuple(vec![
            TypeShape::Scalar(ScalarKind::String),
            TypeShape::Scalar(ScalarKind::Int64),
        ]);
        assert_ne!(a, b);
    }
}
