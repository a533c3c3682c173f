use serde_json::Value;

use super::Inference;
use crate::ir::{Scalar, TypeRef};
use crate::naming::to_pascal_case;

impl Inference {
    /// `Container(T)` when every element agrees on `T`, else `Container(object)`.
    ///
    /// Agreement is decided on shallow types, so object elements are compared
    /// by name only. When the agreed element type involves an object, only the
    /// first element is walked to materialize its shape; later elements are
    /// never inspected beyond their kind.
    pub(super) fn observe_array(&mut self, xs: &[Value], key: &str) -> TypeRef {
        let Some(first) = xs.first() else {
            return TypeRef::container(TypeRef::UNKNOWN);
        };

        let element = shallow_type(first, key);
        let agrees = xs[1..].iter().all(|x| shallow_type(x, key) == element);
        if !agrees {
            tracing::trace!(key, len = xs.len(), "mixed array element types");
            return TypeRef::container(TypeRef::UNKNOWN);
        }

        if element.references_object() {
            TypeRef::container(self.observe_value(first, key))
        } else {
            TypeRef::container(element)
        }
    }
}

/// Type of `value` without registering anything: objects become a reference
/// to the name they would be given.
pub fn shallow_type(value: &Value, key: &str) -> TypeRef {
    match value {
        Value::Null => TypeRef::UNKNOWN,
        Value::Bool(_) => TypeRef::Scalar(Scalar::Boolean),
        Value::Number(n) => TypeRef::Scalar(super::num::classify(n)),
        Value::String(s) => TypeRef::Scalar(super::str::classify(s)),
        Value::Object(_) => TypeRef::Reference(to_pascal_case(key)),
        Value::Array(xs) => match xs.split_first() {
            None => TypeRef::container(TypeRef::UNKNOWN),
            Some((first, rest)) => {
                let element = shallow_type(first, key);
                if rest.iter().all(|x| shallow_type(x, key) == element) {
                    TypeRef::container(element)
                } else {
                    TypeRef::container(TypeRef::UNKNOWN)
                }
            }
        },
    }
}
