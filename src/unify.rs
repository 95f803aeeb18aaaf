//! Shape unification
//!
//! Reduces an ordered sequence of shapes, understood as parallel
//! observations of the same logical slot, to a single shape describing all
//! of them. Three strategies are tried in order of cost; when none applies
//! the result degrades to a heterogeneous tuple of the inputs, so
//! unification is total and never loses information.

use tracing::trace;

use crate::graph::GeneralityGraph;
use crate::shape::{DimSize, TypeShape};

/// Unify parallel observations into a single shape
///
/// A single observation comes back verbatim, which makes re-unifying a
/// previous result a no-op. Otherwise a successful strategy yields
/// `N * element`, and the fallback yields the tuple of inputs taken
/// verbatim; the tuple itself already accounts for all N observations and
/// carries no extra dimension.
pub fn unify(shapes: &[TypeShape], graph: &GeneralityGraph) -> TypeShape {
    match shapes {
        [] => TypeShape::Tuple(Vec::new()),
        [single] => single.clone(),
        _ => match unify_element(shapes, graph) {
            Some(element) => TypeShape::fixed(shapes.len(), element),
            None => {
                trace!(count = shapes.len(), "no unification strategy applied");
                TypeShape::Tuple(shapes.to_vec())
            }
        },
    }
}

/// Run the strategy chain, returning the unified element shape
///
/// Strategies in order: identical, base (scalar widening through the
/// generality graph, null-aware), dimension merge. `None` means every
/// strategy failed and the caller decides how to degrade.
pub(crate) fn unify_element(
    shapes: &[TypeShape],
    graph: &GeneralityGraph,
) -> Option<TypeShape> {
    if let Some(shape) = unify_identical(shapes) {
        trace!(strategy = "identical", count = shapes.len(), "unified");
        return Some(shape);
    }
    if let Some(shape) = unify_base(shapes, graph) {
        trace!(strategy = "base", count = shapes.len(), "unified");
        return Some(shape);
    }
    if let Some(shape) = unify_dimensions(shapes, graph) {
        trace!(strategy = "dimensions", count = shapes.len(), "unified");
        return Some(shape);
    }
    None
}

/// All shapes structurally equal: the cheapest strategy, tried first
pub(crate) fn unify_identical(shapes: &[TypeShape]) -> Option<TypeShape> {
    let (first, rest) = shapes.split_first()?;
    if rest.iter().all(|shape| shape == first) {
        Some(first.clone())
    } else {
        None
    }
}

/// Scalar widening through the generality graph, null-aware
///
/// Null members make the result optional; non-scalar members fail the
/// strategy (composites go through dimension merge or the fallback). A
/// group with no non-null members also fails here -- the all-null group is
/// already collapsed by identical unification.
fn unify_base(shapes: &[TypeShape], graph: &GeneralityGraph) -> Option<TypeShape> {
    let (nulls, non_null): (Vec<TypeShape>, Vec<TypeShape>) =
        shapes.iter().cloned().partition(TypeShape::is_null);
    if non_null.is_empty() {
        return None;
    }
    let base = graph.lowest_common_shape(&non_null)?;
    if nulls.is_empty() {
        Some(base)
    } else {
        Some(TypeShape::option(base))
    }
}

/// Merge a group that is dimensions all the way across
///
/// Element shapes recurse through the full strategy chain; sizes that
/// agree are kept, sizes that disagree widen to a variable count. This is
/// how ragged sequences of equal-typed sub-sequences generalize.
pub(crate) fn unify_dimensions(
    shapes: &[TypeShape],
    graph: &GeneralityGraph,
) -> Option<TypeShape> {
    if shapes.is_empty() {
        return None;
    }
    let mut sizes = Vec::with_capacity(shapes.len());
    let mut elements = Vec::with_capacity(shapes.len());
    for shape in shapes {
        match shape {
            TypeShape::Dimension { size, element } => {
                sizes.push(*size);
                elements.push((**element).clone());
            }
            _ => return None,
        }
    }

    let element = unify_element(&elements, graph)?;
    let size = if sizes.windows(2).all(|pair| pair[0] == pair[1]) {
        sizes[0]
    } else {
        DimSize::Var
    };
    Some(TypeShape::dimension(size, element))
}
