//! Checks for the raytracer demo renders: region statistics over a rendered
//! image, and PPM to PNG conversion with a fallback chain.

pub mod basis;
pub mod config;
pub mod encode;
pub mod error;
pub mod image;
pub mod region;
pub mod stats;
pub mod validate;

pub use crate::{
    basis::{Color, Image},
    config::Config,
    error::{Error, Result},
};

#[cfg(test)]
pub(crate) fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("render_check-{}-{}", std::process::id(), name))
}
