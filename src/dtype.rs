//! Numeric-array dtype table
//!
//! Samples originating from a numeric-array library arrive as an element
//! dtype plus dimensions rather than as individual values. The table here
//! maps each element dtype onto the scalar-kind enumeration; the array
//! dimensions wrap the kind in nested fixed repetitions.

use serde::{Deserialize, Serialize};

use crate::shape::{ScalarKind, TypeShape};

/// Element dtype of a numeric-array sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Str,
    Datetime64,
}

impl DType {
    /// The scalar kind this dtype maps onto
    ///
    /// Narrow integer dtypes widen to the closest signed kind; unsigned
    /// dtypes widen one step further so the full value range fits.
    pub fn scalar_kind(&self) -> ScalarKind {
        match self {
            DType::Bool => ScalarKind::Bool,
            DType::Int8 | DType::Int16 | DType::Int32 => ScalarKind::Int32,
            DType::Int64 => ScalarKind::Int64,
            DType::UInt8 | DType::UInt16 => ScalarKind::Int32,
            DType::UInt32 | DType::UInt64 => ScalarKind::Int64,
            DType::Float32 | DType::Float64 => ScalarKind::Real,
            DType::Complex64 | DType::Complex128 => ScalarKind::Complex,
            DType::Str => ScalarKind::String,
            DType::Datetime64 => ScalarKind::DateTime,
        }
    }
}

/// Shape of an array sample: dimensions wrapped around the element kind
///
/// Empty dims describe an array scalar and map to the bare kind.
pub fn array_shape(dims: &[usize], dtype: DType) -> TypeShape {
    dims.iter()
        .rev()
        .fold(TypeShape::Scalar(dtype.scalar_kind()), |element, &count| {
            TypeShape::fixed(count, element)
        })
}
