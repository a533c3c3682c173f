use serde_json::Number;

use crate::ir::Scalar;

/// `Integer` when the literal is integral and fits an i32, otherwise `Float`.
///
/// There is no 64-bit integer kind: `3000000000` and `1.0` are both `Float`
/// (serde_json keeps `1.0` as an f64).
pub fn classify(n: &Number) -> Scalar {
    match n.as_i64() {
        Some(i) if i32::try_from(i).is_ok() => Scalar::Integer,
        _ => Scalar::Float,
    }
}
