//! Scale highlighting for fretted string instruments.
//!
//! Two halves: [`theory`] works out which notes belong to a key and where
//! they fall on each string, and [`layout`] turns (string, fret) positions
//! into grid cells with a fixed stacking order. [`fretboard::Fretboard`]
//! runs both for one key and fret count.
pub mod color;
pub mod config;
pub mod display;
pub mod error;
pub mod fretboard;
pub mod layout;
pub mod theory;

pub use error::FretboardError;
pub use fretboard::{Fretboard, FretboardView};
