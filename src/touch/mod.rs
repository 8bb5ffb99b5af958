#[cfg(all(feature = "touch", target_os = "linux"))]
mod handler;
mod mock;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

#[cfg(all(feature = "touch", target_os = "linux"))]
pub use handler::TouchInputHandler;
pub use mock::MockTouchInputHandler;
pub use tracker::{AxisRange, PressTracker, TouchScaler, TouchSignal, DEFAULT_DEBOUNCE};
pub use types::{open_error, TouchErrorExt};
