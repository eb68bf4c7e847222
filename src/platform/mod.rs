//! Platform abstraction layer
//!
//! Host-neutral pieces of the frame driver:
//! - Frame pacing (one tick per refresh, or fixed steps)
//! - Input buffering between ticks

pub mod clock;
pub mod input;

pub use clock::{FrameClock, Pacing};
pub use input::InputQueue;
