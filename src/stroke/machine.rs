use kurbo::{BezPath, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PointerKind {
    Press,
    Move,
    Release,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Press, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Release, x, y)
    }

    pub fn cancel(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Cancel, x, y)
    }

    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Path-continuity phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracePhase {
    /// No stroke in progress; the start mark may still be shown.
    Idle,
    /// Actively extending a contiguous subpath.
    Tracing,
    /// The last touch was off every drawable color; the next valid sample
    /// opens a new subpath instead of extending the old one.
    Broken,
}

/// What the probe window sampled at the event point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorProbe {
    pub on_trace: bool,
    pub on_material: bool,
}

/// Outcome handed back to the host event loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerResponse {
    /// The event was handled by the engine.
    pub consumed: bool,
    /// The host should redraw the stroke layer.
    pub repaint: bool,
}

impl PointerResponse {
    pub(crate) const IGNORED: Self = Self {
        consumed: false,
        repaint: false,
    };
    pub(crate) const CONSUMED: Self = Self {
        consumed: true,
        repaint: true,
    };
}

/// Whether a resolved material touch may extend the live subpath or must
/// open a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubpathPolicy {
    Extend,
    ForceNew,
}

/// Turns probed pointer events into path mutations.
///
/// The machine never samples anything itself; the engine resolves each event
/// coordinate into a [`ColorProbe`] first. That keeps every transition a pure
/// function of `(phase, probe)` and directly checkable.
#[derive(Clone, Debug)]
pub struct StrokeMachine {
    phase: TracePhase,
    start_mark_visible: bool,
    path: BezPath,
    has_current_point: bool,
    has_drawn: bool,
    last_touch: Option<Point>,
}

impl Default for StrokeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeMachine {
    pub fn new() -> Self {
        Self {
            phase: TracePhase::Idle,
            start_mark_visible: true,
            path: BezPath::new(),
            has_current_point: false,
            has_drawn: false,
            last_touch: None,
        }
    }

    pub fn phase(&self) -> TracePhase {
        self.phase
    }

    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn start_mark_visible(&self) -> bool {
        self.start_mark_visible
    }

    /// Any input occurred since the last reset.
    pub fn has_drawn(&self) -> bool {
        self.has_drawn
    }

    /// Last touch position while a stroke is live; the host draws the cursor
    /// there.
    pub fn cursor(&self) -> Option<Point> {
        if self.phase == TracePhase::Tracing {
            self.last_touch
        } else {
            None
        }
    }

    /// Clear the stroke. `start_mark` is whether the loaded material carries
    /// a usable start offset; without one the mark is never shown and the
    /// trace-first requirement is waived.
    pub fn reset(&mut self, start_mark: bool) {
        *self = Self::new();
        self.start_mark_visible = start_mark;
    }

    /// Stop extending the current subpath without clearing it.
    pub fn stop_tracing(&mut self) {
        self.phase = if self.start_mark_visible {
            TracePhase::Idle
        } else {
            TracePhase::Broken
        };
    }

    pub fn handle(&mut self, event: PointerEvent, probe: ColorProbe) -> PointerResponse {
        self.has_drawn = true;
        let p = event.point();
        match event.kind {
            PointerKind::Cancel => PointerResponse::IGNORED,
            PointerKind::Press => {
                self.last_touch = Some(p);
                self.on_press(p, probe);
                PointerResponse::CONSUMED
            }
            PointerKind::Move => {
                self.last_touch = Some(p);
                self.resolve(p, probe, SubpathPolicy::Extend);
                PointerResponse::CONSUMED
            }
            PointerKind::Release => {
                self.last_touch = Some(p);
                self.on_release(p, probe);
                PointerResponse::CONSUMED
            }
        }
    }

    fn on_press(&mut self, p: Point, probe: ColorProbe) {
        if self.start_mark_visible && probe.on_trace {
            // First correct touch: the mark disappears and tracing begins,
            // but no subpath origin is committed until the stroke moves.
            self.start_mark_visible = false;
            self.phase = TracePhase::Tracing;
            return;
        }
        self.resolve(p, probe, SubpathPolicy::ForceNew);
    }

    fn resolve(&mut self, p: Point, probe: ColorProbe, policy: SubpathPolicy) {
        if !self.start_mark_visible && probe.on_material {
            if policy == SubpathPolicy::Extend
                && self.phase == TracePhase::Tracing
                && self.has_current_point
            {
                self.line_to(p);
            } else {
                self.move_to(p);
                self.phase = TracePhase::Tracing;
            }
        } else if probe.on_trace {
            // Lifting and re-landing on the guide line re-opens the stroke.
            self.start_mark_visible = false;
            self.phase = TracePhase::Tracing;
            self.move_to(p);
        } else {
            self.stop_tracing();
        }
    }

    fn on_release(&mut self, p: Point, probe: ColorProbe) {
        if self.phase == TracePhase::Tracing && self.has_current_point && probe.on_material {
            // Sub-pixel nub so the renderer caps the stroke with a visible
            // dot even when press and release share a point.
            self.line_to(Point::new(p.x + 0.01, p.y + 0.01));
        }
        self.phase = TracePhase::Idle;
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
        self.has_current_point = true;
    }

    fn line_to(&mut self, p: Point) {
        self.path.line_to(p);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/machine.rs"]
mod tests;
