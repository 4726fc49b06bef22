//! Parameter validation shared by the injection models.

use bbn_types::error::{BbnError, BbnResult};

pub(crate) fn positive(name: &str, value: f64) -> BbnResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BbnError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn non_negative(name: &str, value: f64) -> BbnResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BbnError::ConfigError(format!(
            "{name} must be finite and >= 0, got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn branching_ratio(name: &str, value: f64) -> BbnResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(BbnError::ConfigError(format!(
            "branching ratio {name} must lie in [0, 1], got {value}"
        )));
    }
    Ok(())
}
