//! Build runtime model objects from scenario definitions.

use cp_core::Real;
use cp_dynamics::{DoublePoleParams, PoleParams, SinglePoleParams};
use cp_project::{IntegratorDef, ModelDef};
use cp_sim::IntegratorType;

use crate::error::{AppError, AppResult};

pub fn integrator_type(def: IntegratorDef) -> IntegratorType {
    match def {
        IntegratorDef::Euler => IntegratorType::Euler,
        IntegratorDef::Rk2 => IntegratorType::Rk2,
        IntegratorDef::Rk4 => IntegratorType::Rk4,
    }
}

/// Single-pole parameters with unset fields taken from the defaults.
pub fn single_pole_params<T: Real>(model: &ModelDef) -> AppResult<SinglePoleParams<T>> {
    let ModelDef::SinglePole {
        gravity,
        cart_mass,
        pole_mass,
        pole_length,
        pivot_friction,
        track_friction,
    } = model
    else {
        return Err(AppError::InvalidInput(format!(
            "expected a single pole model, got {}",
            model.label()
        )));
    };

    let d = SinglePoleParams::<f64>::default();
    let params = SinglePoleParams {
        gravity: gravity.unwrap_or(d.gravity),
        cart_mass: cart_mass.unwrap_or(d.cart_mass),
        pole: PoleParams::new(
            pole_mass.unwrap_or(d.pole.mass),
            pole_length.unwrap_or(d.pole.length),
        ),
        pivot_friction: pivot_friction.unwrap_or(d.pivot_friction),
        track_friction: track_friction.unwrap_or(d.track_friction),
    };
    Ok(params.convert())
}

/// Double-pole parameters with unset fields taken from the defaults.
pub fn double_pole_params<T: Real>(model: &ModelDef) -> AppResult<DoublePoleParams<T>> {
    let ModelDef::DoublePole {
        gravity,
        cart_mass,
        pole1_mass,
        pole1_length,
        pole2_mass,
        pole2_length,
        pivot_friction,
        track_friction,
    } = model
    else {
        return Err(AppError::InvalidInput(format!(
            "expected a double pole model, got {}",
            model.label()
        )));
    };

    let d = DoublePoleParams::<f64>::default();
    let params = DoublePoleParams {
        gravity: gravity.unwrap_or(d.gravity),
        cart_mass: cart_mass.unwrap_or(d.cart_mass),
        pole1: PoleParams::new(
            pole1_mass.unwrap_or(d.pole1.mass),
            pole1_length.unwrap_or(d.pole1.length),
        ),
        pole2: PoleParams::new(
            pole2_mass.unwrap_or(d.pole2.mass),
            pole2_length.unwrap_or(d.pole2.length),
        ),
        pivot_friction: pivot_friction.unwrap_or(d.pivot_friction),
        track_friction: track_friction.unwrap_or(d.track_friction),
    };
    Ok(params.convert())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_use_defaults() {
        let params = single_pole_params::<f64>(&ModelDef::single_pole()).unwrap();
        assert_eq!(params, SinglePoleParams::default());

        let params = double_pole_params::<f32>(&ModelDef::double_pole()).unwrap();
        assert_eq!(params, DoublePoleParams::default());
    }

    #[test]
    fn set_fields_override_defaults() {
        let model = ModelDef::SinglePole {
            gravity: Some(1.62),
            cart_mass: None,
            pole_mass: Some(0.5),
            pole_length: None,
            pivot_friction: Some(0.0),
            track_friction: None,
        };
        let params = single_pole_params::<f64>(&model).unwrap();
        assert_eq!(params.gravity, 1.62);
        assert_eq!(params.pole.mass, 0.5);
        assert_eq!(params.pole.length, 1.0);
        assert_eq!(params.pivot_friction, 0.0);
        assert_eq!(params.track_friction, 0.1);
    }

    #[test]
    fn wrong_model_kind_is_rejected() {
        assert!(single_pole_params::<f64>(&ModelDef::double_pole()).is_err());
        assert!(double_pole_params::<f64>(&ModelDef::single_pole()).is_err());
    }

    #[test]
    fn integrator_mapping() {
        assert_eq!(integrator_type(IntegratorDef::Euler), IntegratorType::Euler);
        assert_eq!(integrator_type(IntegratorDef::Rk2), IntegratorType::Rk2);
        assert_eq!(integrator_type(IntegratorDef::Rk4), IntegratorType::Rk4);
    }
}
