//! Dynamic suture constraints for deformable bodies.
//!
//! Each simulation step a [`synthesizer::SutureSynthesizer`] picks two anchor
//! particles (from a picker or by extremal search along an axis), measures
//! their separation and rewrites a single spring in a
//! [`constraints::spring::ConstraintSink`] so the suture tracks them.
pub mod config;
pub mod constraints;
pub mod error;
pub mod math;
pub mod particle;
pub mod picking;
pub mod selection;
pub mod synthesizer;
