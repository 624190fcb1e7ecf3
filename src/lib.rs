//! A triangle robot with three corner color sensors, driving over a pattern
//! of concentric rings under the control of a pluggable [`ControlLogic`].
//!
//! The world is rasterized into an RGB [`Canvas`] at the simulated screen size
//! and shown in the terminal by [`view::run`]. [`Simulation::run_headless`]
//! drives the same loop without a terminal.

pub mod background;
pub mod canvas;
pub mod clock;
pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod geometry;
pub mod input;
pub mod math;
pub mod sensor;
pub mod simulation;
pub mod view;

pub use canvas::Canvas;
pub use color::Rgb;
pub use config::{Args, Config};
pub use control::{ControlLogic, Idle, NormalStep};
pub use error::SimError;
pub use geometry::{Corner, CornerLabel, Triangle};
pub use input::{ArmMode, TickInput};
pub use math::Vec2;
pub use simulation::{SimState, Simulation};
