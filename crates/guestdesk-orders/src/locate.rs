//! Structural search for arrays of order-like objects.
//!
//! The orders endpoint may wrap its rows as `{"orders": [...]}`,
//! `{"data": {"result": {"rows": [...]}}}`, or any other nesting. An array is
//! a candidate when it is non-empty and its first element is an object.

use serde_json::Value;

/// Deepest object level searched below the payload root.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Lazily yields candidate order arrays in depth-first order, following the
/// payload's own key order.
///
/// Objects deeper than the depth cap are not searched; that branch simply
/// yields nothing.
pub struct OrderArrays<'a> {
    root: Option<&'a [Value]>,
    stack: Vec<(serde_json::map::Values<'a>, usize)>,
    max_depth: usize,
}

impl<'a> Iterator for OrderArrays<'a> {
    type Item = &'a [Value];

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(rows) = self.root.take() {
            return Some(rows);
        }

        while let Some((values, depth)) = self.stack.last_mut() {
            let depth = *depth;
            let Some(child) = values.next() else {
                self.stack.pop();
                continue;
            };

            if let Some(rows) = as_order_rows(child) {
                return Some(rows);
            }
            if let Value::Object(map) = child {
                if depth < self.max_depth {
                    self.stack.push((map.values(), depth + 1));
                }
            }
        }

        None
    }
}

/// Locates candidate order arrays using [`DEFAULT_MAX_DEPTH`].
#[must_use]
pub fn locate_order_arrays(payload: &Value) -> OrderArrays<'_> {
    locate_order_arrays_with_depth(payload, DEFAULT_MAX_DEPTH)
}

/// Locates candidate order arrays, descending at most `max_depth` object
/// levels below the root.
///
/// - An array payload is its own sole candidate when its first element is
///   an object; arrays of scalars yield nothing.
/// - An object payload yields every qualifying array among its values,
///   recursing into object values that are not themselves candidates.
/// - Any other payload yields nothing.
#[must_use]
pub fn locate_order_arrays_with_depth(payload: &Value, max_depth: usize) -> OrderArrays<'_> {
    match payload {
        Value::Array(_) => OrderArrays {
            root: as_order_rows(payload),
            stack: Vec::new(),
            max_depth,
        },
        Value::Object(map) => OrderArrays {
            root: None,
            stack: vec![(map.values(), 0)],
            max_depth,
        },
        _ => OrderArrays {
            root: None,
            stack: Vec::new(),
            max_depth,
        },
    }
}

fn as_order_rows(value: &Value) -> Option<&[Value]> {
    value
        .as_array()
        .filter(|rows| rows.first().is_some_and(Value::is_object))
        .map(Vec::as_slice)
}
