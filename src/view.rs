use crate::canvas::Canvas;
use crate::clock::{FpsMeter, FrameClock};
use crate::color::Rgb;
use crate::config::Config;
use crate::control::ControlLogic;
use crate::error::SimError;
use crate::input::{ArmMode, InputState, Key};
use crate::math::Vec2;
use crate::simulation::{LabelAnchor, SimState, Simulation};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use std::io::{self, BufRead, Stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Size used when the terminal cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Raw-mode alternate screen, restored when dropped
pub struct TerminalGuard {
    out: Stdout,
    /// Whether the terminal reports key releases
    enhanced_keys: bool,
}

impl TerminalGuard {
    pub fn new() -> Result<Self, SimError> {
        terminal::enable_raw_mode()?;
        // Built before the remaining setup so a failure below still restores the terminal
        let mut guard = TerminalGuard {
            out: io::stdout(),
            enhanced_keys: false,
        };
        execute!(guard.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                guard.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            guard.enhanced_keys = true;
        } else {
            warn!("terminal does not report key releases, keys count as held while repeating");
        }
        Ok(guard)
    }

    pub fn reports_releases(&self) -> bool {
        self.enhanced_keys
    }

    /// Draws one frame: the canvas, corner labels, the debug HUD and the status line
    pub fn present(
        &mut self,
        canvas: &Canvas,
        labels: &[LabelAnchor],
        hud: &[String],
        status: &str,
    ) -> io::Result<()> {
        let (cols, rows) = terminal_size();
        let image_rows = rows.saturating_sub(1);
        let viewport = Viewport::fit(canvas.width(), canvas.height(), cols, image_rows);

        let mut current: Option<(Rgb, Rgb)> = None;
        for row in 0..image_rows {
            queue!(self.out, MoveTo(0, row))?;
            for col in 0..cols {
                let top = viewport.sample(canvas, col, u32::from(row) * 2);
                let bottom = viewport.sample(canvas, col, u32::from(row) * 2 + 1);
                if current != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(top.into()),
                        SetBackgroundColor(bottom.into())
                    )?;
                    current = Some((top, bottom));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }

        for anchor in labels {
            if let Some((col, row)) = viewport.cell_at(anchor.position) {
                queue!(
                    self.out,
                    MoveTo(col, row),
                    SetForegroundColor(Rgb::GREEN.into()),
                    SetBackgroundColor(Color::Black),
                    Print(anchor.label)
                )?;
            }
        }

        for (row, line) in (0..image_rows).zip(hud) {
            queue!(
                self.out,
                MoveTo(0, row),
                SetForegroundColor(Color::White),
                SetBackgroundColor(Color::Black),
                Print(clip(line, cols))
            )?;
        }

        queue!(
            self.out,
            ResetColor,
            MoveTo(0, image_rows),
            Clear(ClearType::CurrentLine),
            Print(clip(status, cols))
        )?;
        self.out.flush()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.enhanced_keys {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Current terminal size in cells
fn terminal_size() -> (u16, u16) {
    termsize::get()
        .map(|size| (size.cols, size.rows))
        .or_else(|| terminal::size().ok())
        .unwrap_or(FALLBACK_SIZE)
}

fn clip(text: &str, cols: u16) -> String {
    text.chars().take(usize::from(cols)).collect()
}

/// Maps canvas pixels onto terminal cells, two pixels per cell stacked vertically
///
/// The canvas is scaled uniformly to fit and centered, leaving black bars on
/// the unused sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    cols: u16,
    rows: u16,
    canvas_width: usize,
    canvas_height: usize,
    /// Sub-pixels per canvas pixel
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    pub fn fit(canvas_width: usize, canvas_height: usize, cols: u16, rows: u16) -> Self {
        let (sub_width, sub_height) = (f64::from(cols), f64::from(rows) * 2.0);
        let (width, height) = (canvas_width as f64, canvas_height as f64);
        let scale = if canvas_width == 0 || canvas_height == 0 {
            0.0
        } else {
            (sub_width / width).min(sub_height / height)
        };
        Viewport {
            cols,
            rows,
            canvas_width,
            canvas_height,
            scale,
            offset_x: (sub_width - width * scale) / 2.0,
            offset_y: (sub_height - height * scale) / 2.0,
        }
    }

    /// Canvas pixel shown in column `col`, sub-row `sub_row`, or `None` in the bars
    pub fn canvas_pixel(&self, col: u16, sub_row: u32) -> Option<(i64, i64)> {
        if self.scale <= 0.0 {
            return None;
        }
        let x = ((f64::from(col) + 0.5 - self.offset_x) / self.scale).floor();
        let y = ((f64::from(sub_row) + 0.5 - self.offset_y) / self.scale).floor();
        let inside = x >= 0.0
            && y >= 0.0
            && x < self.canvas_width as f64
            && y < self.canvas_height as f64;
        inside.then(|| (x as i64, y as i64))
    }

    fn sample(&self, canvas: &Canvas, col: u16, sub_row: u32) -> Rgb {
        self.canvas_pixel(col, sub_row)
            .and_then(|(x, y)| canvas.get(x, y))
            .unwrap_or(Rgb::BLACK)
    }

    /// Terminal cell showing canvas position `position`
    pub fn cell_at(&self, position: Vec2) -> Option<(u16, u16)> {
        let col = (position.x * self.scale + self.offset_x).floor();
        let row = ((position.y * self.scale + self.offset_y) / 2.0).floor();
        let inside =
            col >= 0.0 && row >= 0.0 && col < f64::from(self.cols) && row < f64::from(self.rows);
        inside.then(|| (col as u16, row as u16))
    }
}

/// What a key event asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Press(Key),
    Release(Key),
    ToggleHud,
    Quit,
}

fn key_action(event: &KeyEvent) -> Option<Action> {
    let released = event.kind == KeyEventKind::Release;
    let key = match event.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Activate,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) && !released => {
            return Some(Action::Quit)
        }
        KeyCode::Esc | KeyCode::Char('q' | 'Q') if !released => return Some(Action::Quit),
        KeyCode::Char('d' | 'D') if event.kind == KeyEventKind::Press => {
            return Some(Action::ToggleHud)
        }
        _ => return None,
    };
    Some(if released {
        Action::Release(key)
    } else {
        Action::Press(key)
    })
}

/// Applies every pending terminal event without blocking
fn drain_events(input: &mut InputState, show_hud: &mut bool) -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        match key_action(&key_event) {
            Some(Action::Press(key)) => input.press(key, Instant::now()),
            Some(Action::Release(key)) => input.release(key),
            Some(Action::ToggleHud) => *show_hud = !*show_hud,
            Some(Action::Quit) => input.request_quit(),
            None => {}
        }
    }
    Ok(())
}

/// Debug overlay lines
pub fn hud_lines<L: ControlLogic>(simulation: &Simulation<L>, fps: f64) -> Vec<String> {
    let triangle = simulation.triangle();
    let center = triangle.center();
    let mut lines = vec![
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        format!("FPS: {fps:.2}"),
        format!("Center: ({:.2}, {:.2})", center.x, center.y),
        format!("Control corner: {}", triangle.control_corner().label()),
    ];
    for corner in triangle.corners() {
        let position = corner.position();
        lines.push(format!(
            "{}: ({:.2}, {:.2}) Sensor: {} Changed: {}",
            corner.label(),
            position.x,
            position.y,
            corner.sensor_reading(),
            corner.has_changed()
        ));
    }
    let controller = if simulation.armed() { "running" } else { "idle" };
    lines.push(format!("Controller: {controller}"));
    lines
}

/// Key help for the bottom line of the screen
pub fn status_line(config: &Config) -> String {
    let space = match config.arm_mode {
        ArmMode::Hold => "hold SPACE: run controller",
        ArmMode::Toggle => "SPACE: start/stop controller",
    };
    let mut parts = Vec::with_capacity(4);
    if config.allow_override {
        parts.push("arrows: move");
    }
    parts.extend([space, "d: debug", "q: quit"]);
    parts.join(" | ")
}

/// Instructions printed before the terminal is taken over
pub fn banner(config: &Config) -> String {
    let rule = "=".repeat(60);
    let space = match config.arm_mode {
        ArmMode::Hold => "HOLD 'SPACE' TO RUN CONTROLLER",
        ArmMode::Toggle => "PRESS 'SPACE' TO START OR STOP THE CONTROLLER",
    };
    let mut lines = vec![rule.clone()];
    if config.allow_override {
        lines.push("OVERRIDE IS ENABLED, USE ARROW KEYS TO MOVE THE TRIANGLE".to_string());
    }
    lines.push(space.to_string());
    lines.push("PRESS 'D' FOR DEBUG INFO, 'Q' OR 'ESC' TO QUIT".to_string());
    lines.push(rule);
    lines.push("PRESS ENTER TO START".to_string());
    lines.join("\n")
}

/// Blocks until a line (or end of input) is read, so the banner stays readable
pub fn wait_for_enter(reader: &mut impl BufRead) -> io::Result<()> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(())
}

/// Runs the interactive frame loop until the user quits
pub fn run<L: ControlLogic>(simulation: &mut Simulation<L>) -> Result<(), SimError> {
    let config = simulation.config().clone();
    let mut terminal = TerminalGuard::new()?;
    let mut input = InputState::new(
        config.arm_mode,
        terminal.reports_releases(),
        config.hold_window,
    );

    let start = Instant::now();
    let mut clock = FrameClock::new(config.fps, start);
    let mut fps = FpsMeter::new(start);
    let mut canvas = simulation.blank_canvas();
    let mut show_hud = false;
    let status = status_line(&config);

    info!(fps = config.fps, releases = terminal.reports_releases(), "entering frame loop");
    while simulation.is_running() {
        drain_events(&mut input, &mut show_hud)?;
        if simulation.tick(&input.snapshot(Instant::now())) == SimState::Stopped {
            break;
        }

        let labels = simulation.render(&mut canvas);
        let rate = fps.record_frame(Instant::now());
        let hud = if show_hud {
            hud_lines(simulation, rate)
        } else {
            Vec::new()
        };
        terminal.present(&canvas, &labels, &hud, &status)?;
        clock.tick();
    }
    Ok(())
}
