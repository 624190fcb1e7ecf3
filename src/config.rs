use crate::color::{Rgb, BAND_COLORS};
use crate::error::SimError;
use crate::geometry::CornerLabel;
use crate::input::ArmMode;
use crate::math::Vec2;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const SCREEN_WIDTH: u32 = 800;
pub const SCREEN_HEIGHT: u32 = 600;
pub const FPS: u32 = 60;
pub const TRIANGLE_SIZE: f64 = 50.0;
pub const CIRCLE_BAND_WIDTH: u32 = 20;
pub const HOLD_WINDOW_MS: u64 = 500;

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Drive a three-sensor triangle robot over a ring pattern in your terminal")]
pub struct Args {
    /// Simulated screen width in pixels
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    pub width: u32,

    /// Simulated screen height in pixels
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    pub height: u32,

    /// Target frame rate
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Distance from the triangle center to each corner, in pixels
    #[arg(long, default_value_t = TRIANGLE_SIZE)]
    pub triangle_size: f64,

    /// Radial thickness of one background ring, in pixels
    #[arg(long, default_value_t = CIRCLE_BAND_WIDTH)]
    pub band_width: u32,

    /// Ring colors from the outside in: names or #rrggbb, comma separated
    #[arg(long, value_delimiter = ',', default_value = "white,black,gray")]
    pub colors: Vec<Rgb>,

    /// Disable moving the triangle with the arrow keys
    #[arg(long)]
    pub no_override: bool,

    /// Corner used as reference for normal-direction movement
    #[arg(long, value_enum, ignore_case = true, default_value_t = CornerLabel::A)]
    pub control_corner: CornerLabel,

    /// How SPACE arms the controller
    #[arg(long, value_enum, default_value_t = ArmMode::Hold)]
    pub arm: ArmMode,

    /// How long a key counts as held after its last press, for terminals without release events
    #[arg(long, default_value_t = HOLD_WINDOW_MS)]
    pub hold_ms: u64,

    /// Log every corner's position and sensor reading each frame
    #[arg(long)]
    pub diagnostics: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Run this many ticks without a terminal, controller always armed
    #[arg(long, value_name = "TICKS")]
    pub headless: Option<u64>,
}

/// Startup configuration; fixed for the lifetime of a simulation
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub triangle_size: f64,
    pub band_width: u32,
    pub colors: Vec<Rgb>,
    /// Whether the arrow keys may move the triangle directly
    pub allow_override: bool,
    pub control_corner: CornerLabel,
    pub arm_mode: ArmMode,
    pub hold_window: Duration,
    pub diagnostics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fps: FPS,
            triangle_size: TRIANGLE_SIZE,
            band_width: CIRCLE_BAND_WIDTH,
            colors: BAND_COLORS.to_vec(),
            allow_override: true,
            control_corner: CornerLabel::A,
            arm_mode: ArmMode::Hold,
            hold_window: Duration::from_millis(HOLD_WINDOW_MS),
            diagnostics: false,
        }
    }
}

impl Config {
    /// Checks that every setting is usable
    pub fn validate(&self) -> Result<(), SimError> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::config(format!(
                "screen size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(SimError::config("frame rate must be positive"));
        }
        if !self.triangle_size.is_finite() || self.triangle_size <= 0.0 {
            return Err(SimError::config(format!(
                "triangle size must be a positive number, got {}",
                self.triangle_size
            )));
        }
        if self.band_width == 0 {
            return Err(SimError::config("band width must be positive"));
        }
        if self.colors.is_empty() {
            return Err(SimError::config("at least one band color is required"));
        }
        Ok(())
    }

    /// Center of the ring pattern
    pub fn screen_center(&self) -> (i64, i64) {
        (i64::from(self.width / 2), i64::from(self.height / 2))
    }

    /// Where the triangle starts: horizontally centered, a quarter of the way down
    pub fn initial_center(&self) -> Vec2 {
        Vec2::new(f64::from(self.width / 2), f64::from(self.height / 4))
    }
}

impl TryFrom<&Args> for Config {
    type Error = SimError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let config = Config {
            width: args.width,
            height: args.height,
            fps: args.fps,
            triangle_size: args.triangle_size,
            band_width: args.band_width,
            colors: args.colors.clone(),
            allow_override: !args.no_override,
            control_corner: args.control_corner,
            arm_mode: args.arm,
            hold_window: Duration::from_millis(args.hold_ms),
            diagnostics: args.diagnostics,
        };
        config.validate()?;
        Ok(config)
    }
}
