//! Decimal precision helpers for coordinate keys.

/// Scale for six decimal places (micro-degrees).
pub const MICRO: f64 = 1_000_000.0;

/// Canonicalize a floating-point value for deterministic keys.
///
/// Rules:
/// - `-0.0` becomes `0.0`
/// - all NaNs become a single canonical NaN
pub fn canonical_f64(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v.is_nan() {
        f64::NAN
    } else {
        v
    }
}

/// Round half away from zero to six decimal places, as integer micro-units.
///
/// The scaling multiply rounds before `round` does, so a value whose exact
/// decimal expansion lies just under a half micro-unit can land on the other
/// side. Decimal formatting (`{:.6}`) works on the exact value and may pick
/// the neighbouring micro-unit in those cases.
pub fn to_micro(v: f64) -> i64 {
    (canonical_f64(v) * MICRO).round() as i64
}

pub fn from_micro(v: i64) -> f64 {
    v as f64 / MICRO
}
