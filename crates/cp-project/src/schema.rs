//! Scenario schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub name: String,
    pub model: ModelDef,
    #[serde(default)]
    pub integrator: IntegratorDef,
    #[serde(default)]
    pub precision: PrecisionDef,
    pub tau_s: f64,
    pub duration_s: f64,
    #[serde(default)]
    pub force_n: f64,
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    pub initial_state: Vec<f64>,
}

fn default_record_every() -> usize {
    1
}

/// Physical model. Omitted parameters fall back to the library defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ModelDef {
    SinglePole {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gravity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cart_mass: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pole_mass: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pole_length: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pivot_friction: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        track_friction: Option<f64>,
    },
    DoublePole {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gravity: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cart_mass: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pole1_mass: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pole1_length: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pole2_mass: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pole2_length: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pivot_friction: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        track_friction: Option<f64>,
    },
}

impl ModelDef {
    /// Single pole with every parameter left at its default.
    pub fn single_pole() -> Self {
        Self::SinglePole {
            gravity: None,
            cart_mass: None,
            pole_mass: None,
            pole_length: None,
            pivot_friction: None,
            track_friction: None,
        }
    }

    /// Double pole with every parameter left at its default.
    pub fn double_pole() -> Self {
        Self::DoublePole {
            gravity: None,
            cart_mass: None,
            pole1_mass: None,
            pole1_length: None,
            pole2_mass: None,
            pole2_length: None,
            pivot_friction: None,
            track_friction: None,
        }
    }

    /// Length of the state vector this model integrates.
    pub fn state_len(&self) -> usize {
        match self {
            Self::SinglePole { .. } => 4,
            Self::DoublePole { .. } => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SinglePole { .. } => "single_pole",
            Self::DoublePole { .. } => "double_pole",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum IntegratorDef {
    Euler,
    Rk2,
    #[default]
    Rk4,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PrecisionDef {
    F32,
    #[default]
    F64,
}

impl PrecisionDef {
    pub fn label(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }
}
