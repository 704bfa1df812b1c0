// src/lib.rs

pub mod config;
pub mod double_buffer;
pub mod driver;
pub mod error;
pub mod exec;
pub mod grid;
pub mod logging;
pub mod mms;
pub mod norm;
pub mod params;
pub mod report;
pub mod scalar_field;
pub mod stencil;
pub mod visualisation;

pub use error::{HeatError, Result};
