/// Units which are simply type aliases for `f64` rather than having an
/// implementation as a `uom` `Quantity`.
///
/// The kinetic equations are evaluated as `ndarray` expressions over whole
/// time axes, where wrapping every element in a `Quantity` buys nothing, so
/// we use plain `f64`s but still want some clues in the source as to what
/// they represent.

/// Seconds since the start of the acquisition
pub type Timef64          = f64;
/// Rate constant, per second
pub type Ratef64          = f64;
/// Tracer concentration (activity per unit volume), in whatever unit the AIF uses
pub type Concentrationf64 = f64;
pub type Ratiof64         = f64;
