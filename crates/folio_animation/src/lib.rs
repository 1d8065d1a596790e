//! Folio Animation System
//!
//! Deterministic, explicitly advanced animations.
//!
//! # Features
//!
//! - **Easing**: Linear and CSS-compatible cubic bezier curves
//! - **Timelines**: Eased value segments placed at offsets
//! - **Sweep**: The five-band gradient overlay that masks content swaps
//! - **Volume Ramps**: Stepped fades for looping ambience
//!
//! Nothing here reads a clock. Callers pass elapsed milliseconds to
//! `advance`, which keeps every animation testable without real time.

pub mod easing;
pub mod fade;
pub mod sweep;
pub mod timeline;

pub use easing::Easing;
pub use fade::{FadeSettings, RampDirection, VolumeRamp};
pub use sweep::{
    SweepEffect, SweepFrame, SweepMode, SweepStage, LINK_SWEEP_Z_INDEX, PAGE_SWEEP_Z_INDEX,
};
pub use timeline::Timeline;
