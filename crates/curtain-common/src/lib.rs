//! Common types shared across the curtain pipeline crates.

pub mod bbox;
pub mod frame;
pub mod points;
pub mod stage;

pub use bbox::BoundingBox3;
pub use frame::{FrameError, RawSensorFrame};
pub use points::CurtainPoints;
pub use stage::Stage;
