//! CLI library components for the sconv demo.

pub mod demo;
pub mod logging;
