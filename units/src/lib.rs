pub mod todo;

pub use uom;
pub use uom::si::f64::{Frequency, MassDensity, Ratio, Time};

mod units {
  pub use uom::si::{time        ::minute,
                    frequency   ::hertz,
                    mass_density::kilogram_per_cubic_meter,
                    ratio       ::ratio,
  };
}
// Making values from float literals seems to be very long-winded, so provide
// some pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f64) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(minute Time        minute);
wrap!(per_s  Frequency    hertz);
wrap!(ratio  Ratio        ratio);

/// Rate constant given per minute
pub fn per_min(x: f64) -> Frequency { ratio(x) / minute(1.0) }

/// Tissue or blood density in g/mL (1 g/mL = 1000 kg/m^3)
pub fn g_ml(x: f64) -> MassDensity { MassDensity::new::<units::kilogram_per_cubic_meter>(x * 1000.0) }

// Reverse direction of the above.
pub fn per_s_ (x: Frequency  ) -> f64 { x.get::<units::hertz>() }
pub fn ratio_ (x: Ratio      ) -> f64 { x.get::<units::ratio>() }
pub fn g_ml_  (x: MassDensity) -> f64 { x.get::<units::kilogram_per_cubic_meter>() / 1000.0 }

/// Number of events per minute: the clinical convention for rate constants.
pub fn per_min_(x: Frequency) -> f64 { ratio_(x * minute(1.0)) }
