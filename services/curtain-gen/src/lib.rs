//! Curtain generation service library.
//!
//! The binary in `main.rs` is a thin CLI over [`pipeline::CurtainPipeline`].

pub mod config;
pub mod pipeline;

pub use config::PipelineConfig;
pub use pipeline::{CurtainPipeline, PipelineError, PipelineReport};
