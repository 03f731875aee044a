//! Move drags and the inertial viewport scroll.

use kurbo::{Point, Vec2};

/// Magnitude a scroll drag's direction is quantized to.
pub const NORMALIZED_VELOCITY: f64 = 2.0;
/// Scale applied to the quantized velocity.
pub const SCROLL_VELOCITY_MULTIPLIER: f64 = 0.5;
/// Per-tick velocity decay factor.
pub const SCROLL_VELOCITY_DECAY: f64 = 0.9;
/// Velocity below which the scroll loop stops.
pub const MIN_SCROLL_VELOCITY: f64 = 0.01;
/// Interval at which the host should reschedule `tick`.
pub const SCROLL_TICK_INTERVAL_MS: u64 = 20;

/// Board units scrolled per velocity unit.
pub const SCROLL_UNIT: f64 = 20.0;
/// Half-extent of the scrollable board region.
pub const SCROLL_REGION: f64 = 5000.0;

/// An active move drag over the selection.
///
/// Deltas are incremental: each update yields the movement since the
/// previous pointer position, so shapes and the frame track the
/// pointer exactly with no accumulation error on release.
#[derive(Debug, Clone, Copy)]
pub struct MoveDrag {
    last: Point,
}

impl MoveDrag {
    pub fn begin(start: Point) -> Self {
        Self { last: start }
    }

    /// Advance to a new pointer position, returning the delta to apply.
    pub fn update(&mut self, position: Point) -> Vec2 {
        let delta = position - self.last;
        self.last = position;
        delta
    }
}

/// The visible window onto the board.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    /// Offset of the view origin from the board center.
    pub offset: Vec2,
}

impl Viewport {
    /// Scroll by whole velocity units, clamped to the board region.
    pub fn scroll_by(&mut self, units_x: i32, units_y: i32) {
        self.offset.x =
            (self.offset.x + units_x as f64 * SCROLL_UNIT).clamp(-SCROLL_REGION, SCROLL_REGION);
        self.offset.y =
            (self.offset.y + units_y as f64 * SCROLL_UNIT).clamp(-SCROLL_REGION, SCROLL_REGION);
    }

    /// Re-center the view on the board middle.
    pub fn return_to_middle(&mut self) {
        self.offset = Vec2::ZERO;
    }
}

/// Inertial scroll driven by move-tool drags on empty canvas.
///
/// A drag quantizes its direction to a fixed velocity opposite the
/// pointer movement; the host then calls [`tick`](Self::tick) every
/// [`SCROLL_TICK_INTERVAL_MS`] while it returns `Some`, applying the
/// returned whole units to the viewport. Re-entrant drags update the
/// velocity without spawning a second loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollEngine {
    velocity_x: f64,
    velocity_y: f64,
    is_scrolling: bool,
}

impl ScrollEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    /// Feed a drag delta. Returns true when the host must start the
    /// tick loop (no loop was running).
    pub fn drag(&mut self, delta: Vec2) -> bool {
        let quantize = |d: f64| {
            if d > 0.0 {
                -NORMALIZED_VELOCITY
            } else if d < 0.0 {
                NORMALIZED_VELOCITY
            } else {
                0.0
            }
        };
        self.velocity_x = quantize(delta.x) * SCROLL_VELOCITY_MULTIPLIER;
        self.velocity_y = quantize(delta.y) * SCROLL_VELOCITY_MULTIPLIER;
        let start = !self.is_scrolling;
        self.is_scrolling = true;
        start
    }

    /// One step of the inertial loop: the whole units to scroll now,
    /// or `None` once the velocity has decayed away.
    pub fn tick(&mut self) -> Option<(i32, i32)> {
        if self.velocity_x.abs() >= MIN_SCROLL_VELOCITY
            || self.velocity_y.abs() >= MIN_SCROLL_VELOCITY
        {
            let step = (self.velocity_x as i32, self.velocity_y as i32);
            self.velocity_x *= SCROLL_VELOCITY_DECAY;
            self.velocity_y *= SCROLL_VELOCITY_DECAY;
            Some(step)
        } else {
            self.is_scrolling = false;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_drag_incremental_deltas() {
        let mut drag = MoveDrag::begin(Point::new(10.0, 10.0));
        assert_eq!(drag.update(Point::new(15.0, 12.0)), Vec2::new(5.0, 2.0));
        assert_eq!(drag.update(Point::new(15.0, 12.0)), Vec2::ZERO);
        assert_eq!(drag.update(Point::new(10.0, 10.0)), Vec2::new(-5.0, -2.0));
    }

    #[test]
    fn test_drag_quantizes_opposite_direction() {
        let mut scroll = ScrollEngine::new();
        assert!(scroll.drag(Vec2::new(30.0, -7.0)));
        // Opposite sign of the drag, scaled to +-1
        assert_eq!(scroll.tick(), Some((-1, 1)));
    }

    #[test]
    fn test_velocity_decays_to_stop() {
        let mut scroll = ScrollEngine::new();
        scroll.drag(Vec2::new(1.0, 0.0));
        let mut ticks = 0;
        while scroll.tick().is_some() {
            ticks += 1;
            assert!(ticks < 100, "scroll loop must terminate");
        }
        assert!(!scroll.is_scrolling());
        // 1.0 * 0.9^n < 0.01 needs n > 43
        assert!(ticks > 40);
    }

    #[test]
    fn test_reentrant_drag_keeps_single_loop() {
        let mut scroll = ScrollEngine::new();
        assert!(scroll.drag(Vec2::new(5.0, 0.0)));
        scroll.tick();
        assert!(!scroll.drag(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_truncated_units_go_quiet_before_stop() {
        let mut scroll = ScrollEngine::new();
        scroll.drag(Vec2::new(-4.0, 0.0));
        assert_eq!(scroll.tick(), Some((1, 0)));
        // After one decay 0.9 truncates to zero units but keeps looping
        assert_eq!(scroll.tick(), Some((0, 0)));
    }

    #[test]
    fn test_viewport_clamps_to_region() {
        let mut view = Viewport::default();
        view.scroll_by(1_000, 0);
        assert_eq!(view.offset.x, SCROLL_REGION);
        view.return_to_middle();
        assert_eq!(view.offset, Vec2::ZERO);
    }
}
