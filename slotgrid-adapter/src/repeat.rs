use slotgrid::Vec2;

/// Press-and-hold stepping state, polled from the host's frame tick.
///
/// A step is due immediately on press, then whenever `interval_ms` has elapsed since the last
/// one (0 = every tick). Releasing the pointer stops it before the next tick. Once a step
/// reverses the previous one, stepping pauses until the pointer moves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoldRepeat {
    pressed: bool,
    point: Vec2,
    last_step_ms: Option<u64>,
    interval_ms: u64,
    heading: Option<bool>,
}

impl HoldRepeat {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            ..Self::default()
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Where the pointer was pressed (track-local).
    pub fn point(&self) -> Vec2 {
        self.point
    }

    pub fn press(&mut self, point: Vec2) {
        self.pressed = true;
        self.point = point;
        self.last_step_ms = None;
        self.heading = None;
    }

    /// Follows the pointer while held, keeping the step schedule.
    pub fn move_to(&mut self, point: Vec2) {
        if point != self.point {
            self.heading = None;
        }
        self.point = point;
    }

    pub fn release(&mut self) {
        self.pressed = false;
        self.last_step_ms = None;
        self.heading = None;
    }

    /// Records the direction of the next step (`true` = toward higher values).
    ///
    /// Returns `false` if it reverses the previous step: the thumb has jumped past the pointer.
    pub fn steer(&mut self, toward_higher: bool) -> bool {
        match self.heading {
            Some(heading) if heading != toward_higher => false,
            _ => {
                self.heading = Some(toward_higher);
                true
            }
        }
    }

    /// Returns `true` (and records the step) when a repeat step is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.pressed {
            return false;
        }
        let due = match self.last_step_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        };
        if due {
            self.last_step_ms = Some(now_ms);
        }
        due
    }
}
