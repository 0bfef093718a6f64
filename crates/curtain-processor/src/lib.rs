//! Preprocessing for curtain point clouds.
//!
//! Takes a [`RawSensorFrame`] through the three in-memory transforms:
//! attitude-compensated beam projection, time normalization with a global
//! sort, and quality filtering. All three are total functions: invalid
//! navigation propagates as NaN positions and is removed only by the final
//! filter ("compute everything, filter once").
//!
//! [`RawSensorFrame`]: curtain_common::RawSensorFrame

pub mod config;
pub mod filter;
pub mod projection;
pub mod testdata;
pub mod timeline;

pub use config::ProjectionConfig;
pub use filter::filter_valid;
pub use projection::{down_vector, project_frame, ProjectedSweep};
pub use timeline::normalize_and_sort;
