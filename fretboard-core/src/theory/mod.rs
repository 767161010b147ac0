//! Music theory: the chromatic alphabet, major scales, tunings, and scale
//! scanning over the fingerboard.
pub mod chromatic;
pub mod scale;
pub mod scan;
pub mod tuning;
