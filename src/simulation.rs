use crate::background::ConcentricCircles;
use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::config::Config;
use crate::control::ControlLogic;
use crate::error::SimError;
use crate::geometry::{CornerLabel, Triangle};
use crate::input::TickInput;
use crate::math::Vec2;
use tracing::{debug, info};

/// Distance the arrow keys move the triangle per frame, in pixels
pub const MANUAL_STEP: f64 = 5.0;

/// Width of the triangle outline, in pixels
const OUTLINE_WIDTH: u32 = 3;

/// Offset of a corner label from its corner, in pixels
const LABEL_OFFSET: Vec2 = Vec2::new(-10.0, -10.0);

/// Lifecycle of a simulation run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    Running,
    /// Terminal; no further ticks have any effect
    Stopped,
}

/// Where a corner's label should be printed on the visible surface
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelAnchor {
    pub label: CornerLabel,
    pub position: Vec2,
}

/// The triangle robot, its ring background and the control hook driving it
pub struct Simulation<L> {
    config: Config,
    background: ConcentricCircles,
    /// Ring pattern rendered once, used only for sensor lookups
    surface: Canvas,
    triangle: Triangle,
    logic: L,
    state: SimState,
    armed: bool,
    ticks: u64,
}

impl<L: ControlLogic> Simulation<L> {
    pub fn new(config: &Config, logic: L) -> Result<Self, SimError> {
        config.validate()?;

        let background = ConcentricCircles::new(
            config.screen_center(),
            config.band_width,
            config.colors.clone(),
        )?;
        let surface = background.rasterize(config.width as usize, config.height as usize);

        let mut triangle = Triangle::new(config.initial_center(), config.triangle_size);
        triangle.set_control_corner(config.control_corner);

        info!(
            width = config.width,
            height = config.height,
            band_width = config.band_width,
            triangle_size = config.triangle_size,
            control_corner = %config.control_corner,
            "simulation created"
        );

        Ok(Simulation {
            config: config.clone(),
            background,
            surface,
            triangle,
            logic,
            state: SimState::Running,
            armed: false,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SimState::Running
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn triangle_mut(&mut self) -> &mut Triangle {
        &mut self.triangle
    }

    /// The static surface the sensors read from
    pub fn surface(&self) -> &Canvas {
        &self.surface
    }

    /// Whether the controller ran on the last tick
    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Number of ticks processed while running
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Stops the simulation; this cannot be undone
    pub fn stop(&mut self) {
        if self.state == SimState::Running {
            info!(ticks = self.ticks, "simulation stopped");
        }
        self.state = SimState::Stopped;
    }

    /// Advances the simulation by one frame
    pub fn tick(&mut self, input: &TickInput) -> SimState {
        if !self.is_running() {
            return self.state;
        }
        if input.quit {
            self.stop();
            return self.state;
        }

        if self.config.allow_override {
            self.apply_manual_override(input);
        }

        self.armed = input.activate;

        self.triangle.update_sensor_colors(&self.surface);
        if self.config.diagnostics {
            self.log_corners();
        }

        if self.armed {
            self.logic.step(&mut self.triangle);
        }

        self.ticks += 1;
        self.state
    }

    fn apply_manual_override(&mut self, input: &TickInput) {
        if input.up {
            self.triangle.move_by(0.0, -MANUAL_STEP);
        }
        if input.down {
            self.triangle.move_by(0.0, MANUAL_STEP);
        }
        if input.left {
            self.triangle.move_by(-MANUAL_STEP, 0.0);
        }
        if input.right {
            self.triangle.move_by(MANUAL_STEP, 0.0);
        }
    }

    fn log_corners(&self) {
        for corner in self.triangle.corners() {
            let position = corner.position();
            debug!(
                "{}: ({:.2}, {:.2}) Sensor: {} Changed: {}",
                corner.label(),
                position.x,
                position.y,
                corner.sensor_reading(),
                corner.has_changed()
            );
        }
    }

    /// A canvas sized to the simulated screen
    pub fn blank_canvas(&self) -> Canvas {
        Canvas::filled(
            self.config.width as usize,
            self.config.height as usize,
            Rgb::WHITE,
        )
    }

    /// Draws the rings and triangle outline onto `canvas` and returns where the corner labels go
    pub fn render(&self, canvas: &mut Canvas) -> [LabelAnchor; 3] {
        canvas.fill(Rgb::WHITE);
        self.background.draw(canvas);
        canvas.draw_polygon(&self.triangle.points(), Rgb::RED, OUTLINE_WIDTH);

        self.triangle.corners().clone().map(|corner| LabelAnchor {
            label: corner.label(),
            position: corner.position() + LABEL_OFFSET,
        })
    }

    /// Runs `ticks` frames with the controller armed and no other input
    pub fn run_headless(&mut self, ticks: u64) {
        let input = TickInput {
            activate: true,
            ..TickInput::default()
        };
        info!(ticks, "running headless");
        for _ in 0..ticks {
            if self.tick(&input) == SimState::Stopped {
                break;
            }
        }

        let center = self.triangle.center();
        info!(
            ticks = self.ticks,
            x = center.x,
            y = center.y,
            "headless run finished"
        );
        for corner in self.triangle.corners() {
            info!(
                corner = %corner.label(),
                reading = %corner.sensor_reading(),
                changed = corner.has_changed(),
                "final sensor state"
            );
        }
    }
}
