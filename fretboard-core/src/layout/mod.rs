//! Grid layout: coordinates, stacking layers, and the assembled table.
pub mod assembler;
pub mod coords;
pub mod layer;
