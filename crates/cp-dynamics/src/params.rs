//! Physical parameter sets.
//!
//! Defaults are the usual Earth-gravity textbook values. Parameter sets are
//! plain data; they are bound into an equations object at construction and
//! never mutated afterwards.

use cp_core::Real;

pub const DEFAULT_GRAVITY: f64 = 9.8;
pub const DEFAULT_CART_MASS: f64 = 1.0;
pub const DEFAULT_POLE_MASS: f64 = 0.1;
pub const DEFAULT_POLE_LENGTH: f64 = 1.0;
pub const DEFAULT_POLE2_MASS: f64 = 0.01;
pub const DEFAULT_POLE2_LENGTH: f64 = 0.1;
pub const DEFAULT_PIVOT_FRICTION: f64 = 0.001;
pub const DEFAULT_TRACK_FRICTION: f64 = 0.1;

/// Mass and full length of one pole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoleParams<T> {
    /// Pole mass (kg)
    pub mass: T,
    /// Full pole length (m)
    pub length: T,
}

impl<T: Real> PoleParams<T> {
    pub fn new(mass: T, length: T) -> Self {
        Self { mass, length }
    }

    /// Half of the full length, the distance from pivot to centre of mass.
    pub fn half_length(&self) -> T {
        self.length * T::lit(0.5)
    }

    pub fn convert<U: Real>(&self) -> PoleParams<U> {
        PoleParams {
            mass: U::lit(self.mass.as_f64()),
            length: U::lit(self.length.as_f64()),
        }
    }
}

/// Parameters of a cart carrying one pole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinglePoleParams<T> {
    /// Gravitational acceleration (m/s²)
    pub gravity: T,
    /// Cart mass (kg)
    pub cart_mass: T,
    pub pole: PoleParams<T>,
    /// Pivot friction coefficient
    pub pivot_friction: T,
    /// Track friction coefficient
    pub track_friction: T,
}

impl<T: Real> Default for SinglePoleParams<T> {
    fn default() -> Self {
        Self {
            gravity: T::lit(DEFAULT_GRAVITY),
            cart_mass: T::lit(DEFAULT_CART_MASS),
            pole: PoleParams::new(T::lit(DEFAULT_POLE_MASS), T::lit(DEFAULT_POLE_LENGTH)),
            pivot_friction: T::lit(DEFAULT_PIVOT_FRICTION),
            track_friction: T::lit(DEFAULT_TRACK_FRICTION),
        }
    }
}

impl<T: Real> SinglePoleParams<T> {
    /// Same parameters with both friction coefficients set to zero.
    pub fn frictionless(self) -> Self {
        Self {
            pivot_friction: T::zero(),
            track_friction: T::zero(),
            ..self
        }
    }

    /// Cart plus pole mass.
    pub fn total_mass(&self) -> T {
        self.cart_mass + self.pole.mass
    }

    /// Re-express the parameter set in another precision.
    pub fn convert<U: Real>(&self) -> SinglePoleParams<U> {
        SinglePoleParams {
            gravity: U::lit(self.gravity.as_f64()),
            cart_mass: U::lit(self.cart_mass.as_f64()),
            pole: self.pole.convert(),
            pivot_friction: U::lit(self.pivot_friction.as_f64()),
            track_friction: U::lit(self.track_friction.as_f64()),
        }
    }
}

/// Parameters of a cart carrying two independently hinged poles.
///
/// Both poles share the pivot friction coefficient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoublePoleParams<T> {
    pub gravity: T,
    pub cart_mass: T,
    pub pole1: PoleParams<T>,
    pub pole2: PoleParams<T>,
    pub pivot_friction: T,
    pub track_friction: T,
}

impl<T: Real> Default for DoublePoleParams<T> {
    fn default() -> Self {
        Self {
            gravity: T::lit(DEFAULT_GRAVITY),
            cart_mass: T::lit(DEFAULT_CART_MASS),
            pole1: PoleParams::new(T::lit(DEFAULT_POLE_MASS), T::lit(DEFAULT_POLE_LENGTH)),
            pole2: PoleParams::new(T::lit(DEFAULT_POLE2_MASS), T::lit(DEFAULT_POLE2_LENGTH)),
            pivot_friction: T::lit(DEFAULT_PIVOT_FRICTION),
            track_friction: T::lit(DEFAULT_TRACK_FRICTION),
        }
    }
}

impl<T: Real> DoublePoleParams<T> {
    pub fn frictionless(self) -> Self {
        Self {
            pivot_friction: T::zero(),
            track_friction: T::zero(),
            ..self
        }
    }

    /// Cart plus both pole masses.
    pub fn total_mass(&self) -> T {
        self.cart_mass + self.pole1.mass + self.pole2.mass
    }

    pub fn convert<U: Real>(&self) -> DoublePoleParams<U> {
        DoublePoleParams {
            gravity: U::lit(self.gravity.as_f64()),
            cart_mass: U::lit(self.cart_mass.as_f64()),
            pole1: self.pole1.convert(),
            pole2: self.pole2.convert(),
            pivot_friction: U::lit(self.pivot_friction.as_f64()),
            track_friction: U::lit(self.track_friction.as_f64()),
        }
    }
}
