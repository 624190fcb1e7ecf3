use std::time::{Duration, Instant};

/// Keys the simulation reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Activate,
}

impl Key {
    const COUNT: usize = 5;

    const fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
            Key::Activate => 4,
        }
    }
}

/// How the activation key arms the controller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ArmMode {
    /// Armed only while the key is held
    #[default]
    Hold,
    /// Each press flips the armed state
    Toggle,
}

/// Input snapshot consumed by one simulation tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub quit: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Whether the controller runs this tick
    pub activate: bool,
}

/// Tracks which keys are held between frames
///
/// Terminals that report key releases give exact hold state. Elsewhere a key
/// counts as held while press or auto-repeat events keep arriving within the
/// hold window.
#[derive(Clone, Debug)]
pub struct InputState {
    arm_mode: ArmMode,
    reports_releases: bool,
    hold_window: Duration,
    pressed: [bool; Key::COUNT],
    last_seen: [Option<Instant>; Key::COUNT],
    toggled: bool,
    quit: bool,
}

impl InputState {
    pub fn new(arm_mode: ArmMode, reports_releases: bool, hold_window: Duration) -> Self {
        InputState {
            arm_mode,
            reports_releases,
            hold_window,
            pressed: [false; Key::COUNT],
            last_seen: [None; Key::COUNT],
            toggled: false,
            quit: false,
        }
    }

    /// Whether `key` counts as held at `now`
    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        let i = key.index();
        if self.reports_releases {
            self.pressed[i]
        } else {
            self.last_seen[i]
                .is_some_and(|seen| now.saturating_duration_since(seen) <= self.hold_window)
        }
    }

    /// Records a press or auto-repeat of `key`
    pub fn press(&mut self, key: Key, now: Instant) {
        let fresh = !self.is_held(key, now);
        if key == Key::Activate && fresh {
            self.toggled = !self.toggled;
        }
        let i = key.index();
        self.pressed[i] = true;
        self.last_seen[i] = Some(now);
    }

    /// Records a key release
    pub fn release(&mut self, key: Key) {
        let i = key.index();
        self.pressed[i] = false;
        self.last_seen[i] = None;
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Whether the controller is armed at `now`
    pub fn armed(&self, now: Instant) -> bool {
        match self.arm_mode {
            ArmMode::Hold => self.is_held(Key::Activate, now),
            ArmMode::Toggle => self.toggled,
        }
    }

    /// Builds the input for the tick starting at `now`
    pub fn snapshot(&self, now: Instant) -> TickInput {
        TickInput {
            quit: self.quit,
            up: self.is_held(Key::Up, now),
            down: self.is_held(Key::Down, now),
            left: self.is_held(Key::Left, now),
            right: self.is_held(Key::Right, now),
            activate: self.armed(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn release_events_give_exact_hold_state() {
        let t0 = Instant::now();
        let mut input = InputState::new(ArmMode::Hold, true, WINDOW);
        input.press(Key::Left, t0);
        // Held long past the window because no release arrived
        assert!(input.snapshot(t0 + Duration::from_secs(10)).left);
        input.release(Key::Left);
        assert!(!input.snapshot(t0 + Duration::from_secs(10)).left);
    }

    #[test]
    fn without_releases_keys_expire_after_the_window() {
        let t0 = Instant::now();
        let mut input = InputState::new(ArmMode::Hold, false, WINDOW);
        input.press(Key::Activate, t0);
        assert!(input.snapshot(t0 + Duration::from_millis(100)).activate);
        input.press(Key::Activate, t0 + Duration::from_millis(400));
        assert!(input.snapshot(t0 + Duration::from_millis(800)).activate);
        assert!(!input.snapshot(t0 + Duration::from_millis(1000)).activate);
    }

    #[test]
    fn toggle_mode_flips_on_fresh_presses_only() {
        let t0 = Instant::now();
        let mut input = InputState::new(ArmMode::Toggle, false, WINDOW);
        assert!(!input.armed(t0));

        input.press(Key::Activate, t0);
        // Auto-repeat inside the window must not flip it back
        input.press(Key::Activate, t0 + Duration::from_millis(50));
        assert!(input.armed(t0 + Duration::from_secs(5)));

        input.press(Key::Activate, t0 + Duration::from_secs(6));
        assert!(!input.armed(t0 + Duration::from_secs(6)));
    }

    #[test]
    fn toggle_mode_with_releases() {
        let t0 = Instant::now();
        let mut input = InputState::new(ArmMode::Toggle, true, WINDOW);
        input.press(Key::Activate, t0);
        input.release(Key::Activate);
        assert!(input.armed(t0));
        input.press(Key::Activate, t0);
        assert!(!input.armed(t0));
    }

    #[test]
    fn quit_is_sticky() {
        let t0 = Instant::now();
        let mut input = InputState::new(ArmMode::Hold, true, WINDOW);
        assert!(!input.snapshot(t0).quit);
        input.request_quit();
        assert!(input.snapshot(t0).quit);
        assert!(input.snapshot(t0 + WINDOW).quit);
    }
}
