//! Polar-volume data model for the Boreas radar post-processor.
//!
//! A radar volume scan is a stack of conical sweeps, one per antenna
//! elevation. Each sweep samples a polar grid of (azimuth, range) gates.
//! This crate provides the shared containers for that geometry:
//!
//! - [`Moment`] — one radar quantity (reflectivity or radial velocity)
//!   across a full volume, as a NaN-padded `(elevation, azimuth, range)`
//!   cube plus per-elevation geometry vectors;
//! - [`PolarVolume`] — the per-file bundle handed through the processing
//!   stages, which attach their products to it;
//! - [`heights`] — the equivalent-Earth beam-height map;
//! - [`grid`] — small numeric helpers shared by the stages.
//!
//! NaN is the single in-memory sentinel for "missing". Legacy fill values
//! from the input format are converted to NaN at the ingest boundary and
//! never appear inside the cubes.

pub mod grid;
pub mod heights;
mod moment;
mod volume;

pub use moment::{Moment, SweepGeometry};
pub use volume::{BinIndex, HeightSectors, PolarVolume};
