//! Scenario validation logic.

use crate::schema::{ModelDef, Scenario};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Initial state has {actual} values, {model} needs {expected}")]
    StateLength {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    if !scenario.tau_s.is_finite() || scenario.tau_s <= 0.0 {
        return Err(invalid("tau_s", scenario.tau_s, "must be positive and finite"));
    }
    if !scenario.duration_s.is_finite() || scenario.duration_s < 0.0 {
        return Err(invalid(
            "duration_s",
            scenario.duration_s,
            "must be non-negative and finite",
        ));
    }
    if !scenario.force_n.is_finite() {
        return Err(invalid("force_n", scenario.force_n, "must be finite"));
    }
    if scenario.record_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "record_every".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let expected = scenario.model.state_len();
    if scenario.initial_state.len() != expected {
        return Err(ValidationError::StateLength {
            model: scenario.model.label(),
            expected,
            actual: scenario.initial_state.len(),
        });
    }
    for (i, v) in scenario.initial_state.iter().enumerate() {
        if !v.is_finite() {
            return Err(invalid(&format!("initial_state[{i}]"), *v, "must be finite"));
        }
    }

    validate_model(&scenario.model)
}

fn validate_model(model: &ModelDef) -> Result<(), ValidationError> {
    match model {
        ModelDef::SinglePole {
            gravity,
            cart_mass,
            pole_mass,
            pole_length,
            pivot_friction,
            track_friction,
        } => {
            check_finite("gravity", *gravity)?;
            check_positive("cart_mass", *cart_mass)?;
            check_positive("pole_mass", *pole_mass)?;
            check_positive("pole_length", *pole_length)?;
            check_non_negative("pivot_friction", *pivot_friction)?;
            check_non_negative("track_friction", *track_friction)
        }
        ModelDef::DoublePole {
            gravity,
            cart_mass,
            pole1_mass,
            pole1_length,
            pole2_mass,
            pole2_length,
            pivot_friction,
            track_friction,
        } => {
            check_finite("gravity", *gravity)?;
            check_positive("cart_mass", *cart_mass)?;
            check_positive("pole1_mass", *pole1_mass)?;
            check_positive("pole1_length", *pole1_length)?;
            check_positive("pole2_mass", *pole2_mass)?;
            check_positive("pole2_length", *pole2_length)?;
            check_non_negative("pivot_friction", *pivot_friction)?;
            check_non_negative("track_friction", *track_friction)
        }
    }
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_finite(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(invalid(field, v, "must be finite")),
        _ => Ok(()),
    }
}

fn check_positive(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(invalid(field, v, "must be positive and finite"))
        }
        _ => Ok(()),
    }
}

fn check_non_negative(field: &str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(invalid(field, v, "must be non-negative and finite"))
        }
        _ => Ok(()),
    }
}
