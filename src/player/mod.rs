//! The player core: frame timing model and animation driver.
//!
//! Everything here is rendering-agnostic. The timing model is pure frame
//! arithmetic; the driver is a state machine over an abstract frame
//! scheduler. The terminal front end lives in [`crate::ui`].

pub mod driver;
pub mod timing;

pub use driver::{Driver, DriverState, FrameScheduler};
pub use timing::{StepCursor, Timing};
