use serde_json::{Map, Value};

use super::Inference;
use crate::ir::{Field, InferredType};
use crate::naming::to_pascal_case;

impl Inference {
    /// One field per key, in key order. Sanitized-name collisions are kept.
    pub(super) fn observe_fields(&mut self, map: &Map<String, Value>) -> Vec<Field> {
        map.iter()
            .map(|(k, v)| {
                let ty = self.observe_value(v, k);
                tracing::trace!(key = %k, ty = ?ty, "inferred field");
                Field { original_key: k.clone(), ty }
            })
            .collect()
    }

    /// Register the nested shape introduced by `key`; returns its type name.
    pub(super) fn observe_object(&mut self, map: &Map<String, Value>, key: &str) -> String {
        let base = to_pascal_case(key);
        self.pending.push(base.clone());
        let fields = self.observe_fields(map);
        self.pending.pop();
        let (name, reused) = self.claim_name(&base, &fields);
        if reused {
            tracing::debug!(%name, key, "reusing identical nested type");
        } else {
            tracing::debug!(%name, key, fields = fields.len(), "inferred nested type");
            self.types.insert(name.clone(), InferredType { name: name.clone(), fields });
        }
        name
    }
}
