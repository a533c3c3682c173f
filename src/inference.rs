//! Single-pass type inference over one JSON document.
//!
//! Walk the root object, infer a [`TypeRef`] for every field and register a
//! named [`InferredType`] for every nested object shape encountered.
//!
//! Policy:
//! - Numbers are `int` when they fit an i32, otherwise `double`.
//! - Strings become `DateTime` when the lenient date heuristic accepts them.
//! - Arrays agree on one element type or fall back to `object`.
//! - Arrays of objects take their shape from the first element only.
//! - Nested names come from the introducing key, Pascal-cased, never
//!   singularized. A name already taken by a different shape gets a
//!   numeric suffix; an identical shape reuses the existing type. An
//!   enclosing object keeps the plain name over the objects nested in it.
pub mod arr;
pub mod num;
pub mod obj;
pub mod str;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ConversionError;
use crate::ir::{InferredType, Scalar, TypeRef, TypeSet};
use crate::naming::to_pascal_case;

// ------------------------------- Front API -------------------------------- //

/// Infer the full type list for an object-rooted document.
///
/// The root type is named `root_name` (Pascal-cased); every other entry is a
/// nested shape, listed before the type that introduced it.
pub fn infer(root: &Value, root_name: &str) -> Result<TypeSet, ConversionError> {
    let Value::Object(map) = root else {
        return Err(ConversionError::RootNotObject { found: kind_name(root) });
    };

    let root_name = to_pascal_case(root_name);
    let mut inf = Inference::new(&root_name);
    let fields = inf.observe_fields(map);
    tracing::debug!(name = %root_name, fields = fields.len(), "inferred root type");
    inf.types.insert(root_name.clone(), InferredType { name: root_name.clone(), fields });

    Ok(TypeSet {
        types: inf.types.into_values().collect(),
        root: root_name,
    })
}

/// Accumulates the named types discovered while walking one document.
pub struct Inference {
    types: IndexMap<String, InferredType>,
    reserved: String,
    // base names of the objects currently being walked, outermost first
    pending: Vec<String>,
}

impl Inference {
    fn new(root_name: &str) -> Self {
        Self { types: IndexMap::new(), reserved: root_name.to_string(), pending: Vec::new() }
    }

    /// The single recursive descent: type of `value`, registering any nested
    /// object shapes it contains. `key` is the JSON key that introduced it.
    pub fn observe_value(&mut self, value: &Value, key: &str) -> TypeRef {
        match value {
            Value::Null => TypeRef::UNKNOWN,
            Value::Bool(_) => TypeRef::Scalar(Scalar::Boolean),
            Value::Number(n) => TypeRef::Scalar(num::classify(n)),
            Value::String(s) => TypeRef::Scalar(str::classify(s)),
            Value::Array(xs) => self.observe_array(xs, key),
            Value::Object(map) => TypeRef::Reference(self.observe_object(map, key)),
        }
    }

    /// Pick a free name for a nested shape, or the name of an identical
    /// shape registered earlier. Names held by enclosing objects are skipped.
    fn claim_name(&self, base: &str, fields: &[crate::ir::Field]) -> (String, bool) {
        let mut n = 1usize;
        loop {
            let candidate = if n == 1 { base.to_string() } else { format!("{base}{n}") };
            n += 1;
            if candidate == self.reserved || self.pending.contains(&candidate) {
                continue;
            }
            match self.types.get(&candidate) {
                None => return (candidate, false),
                Some(existing) if existing.fields == fields => return (candidate, true),
                Some(_) => continue,
            }
        }
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field<'a>(set: &'a TypeSet, ty: &str, key: &str) -> &'a TypeRef {
        &set.get(ty)
            .unwrap_or_else(|| panic!("missing type {ty}"))
            .fields
            .iter()
            .find(|f| f.original_key == key)
            .unwrap_or_else(|| panic!("missing field {ty}.{key}"))
            .ty
    }

    #[test]
    fn scalars_are_classified() {
        let doc = json!({
            "name": "John",
            "age": 30,
            "big": 3_000_000_000u64,
            "ratio": 0.5,
            "isEmployee": true,
            "nothing": null,
            "createdAt": "2024-01-11T10:00:00Z"
        });
        let set = infer(&doc, "Person").unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(field(&set, "Person", "name"), &TypeRef::Scalar(Scalar::String));
        assert_eq!(field(&set, "Person", "age"), &TypeRef::Scalar(Scalar::Integer));
        assert_eq!(field(&set, "Person", "big"), &TypeRef::Scalar(Scalar::Float));
        assert_eq!(field(&set, "Person", "ratio"), &TypeRef::Scalar(Scalar::Float));
        assert_eq!(field(&set, "Person", "isEmployee"), &TypeRef::Scalar(Scalar::Boolean));
        assert_eq!(field(&set, "Person", "nothing"), &TypeRef::UNKNOWN);
        assert_eq!(field(&set, "Person", "createdAt"), &TypeRef::Scalar(Scalar::DateTime));
    }

    #[test]
    fn non_object_roots_are_rejected() {
        for doc in [json!([1, 2, 3]), json!("x"), json!(42), json!(null), json!(true)] {
            let err = infer(&doc, "Root").unwrap_err();
            assert!(matches!(err, ConversionError::RootNotObject { .. }), "{doc}");
        }
    }

    #[test]
    fn nested_objects_are_listed_before_their_parent() {
        let doc = json!({
            "person": {
                "name": "John",
                "address": { "street": "Main St", "city": "New York" }
            }
        });
        let set = infer(&doc, "Root").unwrap();
        let names: Vec<_> = set.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Address", "Person", "Root"]);
        let order: Vec<_> = set.declaration_order().map(|t| t.name.as_str()).collect();
        assert_eq!(order, ["Root", "Address", "Person"]);
        assert_eq!(field(&set, "Person", "address"), &TypeRef::Reference("Address".into()));
    }

    #[test]
    fn object_arrays_use_the_first_element_and_keep_the_key_name() {
        let doc = json!({
            "items": [
                { "id": 1, "value": "A" },
                { "id": 2, "extra": true }
            ]
        });
        let set = infer(&doc, "Root").unwrap();
        assert_eq!(
            field(&set, "Root", "items"),
            &TypeRef::container(TypeRef::Reference("Items".into()))
        );
        let items = set.get("Items").unwrap();
        let keys: Vec<_> = items.fields.iter().map(|f| f.original_key.as_str()).collect();
        assert_eq!(keys, ["id", "value"]);
    }

    #[test]
    fn duplicate_nested_names_get_suffixes_unless_identical() {
        let doc = json!({
            "a": { "address": { "city": "X" } },
            "b": { "address": { "city": "Y" } },
            "c": { "address": { "zip": 1 } },
            "root": { "x": 1 }
        });
        let set = infer(&doc, "Root").unwrap();
        assert_eq!(field(&set, "A", "address"), &TypeRef::Reference("Address".into()));
        assert_eq!(field(&set, "B", "address"), &TypeRef::Reference("Address".into()));
        assert_eq!(field(&set, "C", "address"), &TypeRef::Reference("Address2".into()));
        // the root name is reserved up front
        assert_eq!(field(&set, "Root", "root"), &TypeRef::Reference("Root2".into()));
        assert_eq!(set.types.iter().filter(|t| t.name == "Address").count(), 1);
    }

    #[test]
    fn enclosing_objects_keep_the_plain_name() {
        let doc = json!({ "a": { "a": { "x": 1 } } });
        let set = infer(&doc, "Root").unwrap();
        assert_eq!(field(&set, "Root", "a"), &TypeRef::Reference("A".into()));
        assert_eq!(field(&set, "A", "a"), &TypeRef::Reference("A2".into()));
        assert_eq!(field(&set, "A2", "x"), &TypeRef::Scalar(Scalar::Integer));
        let names: Vec<_> = set.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A2", "A", "Root"]);
    }

    #[test]
    fn colliding_sanitized_keys_are_kept() {
        let doc = json!({ "first-name": "a", "firstname": "b" });
        let set = infer(&doc, "Root").unwrap();
        assert_eq!(set.root_type().unwrap().fields.len(), 2);
    }
}
