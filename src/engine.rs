use std::time::{Duration, Instant};

use kurbo::{BezPath, Point};

use crate::{
    foundation::core::{PixelRect, Rgb8},
    foundation::error::{ScrawlError, ScrawlResult},
    material::{descriptor::StartPointOffset, settle::SettleGate},
    score::completion::{self, CompletionCounts},
    stroke::machine::{ColorProbe, PointerEvent, PointerResponse, StrokeMachine, TracePhase},
    surface::{sample, snapshot::SurfaceSource},
};

/// Interval during which touches are ignored after a new material loads,
/// so the half-rendered reference image cannot swallow spurious strokes.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// The tracing engine: per-exercise calibration plus the stroke machine.
///
/// The engine never owns the rendered surface; the host lends it per call,
/// and time is injected as `Instant` arguments so the settle gate behaves
/// deterministically under test.
pub struct TraceEngine {
    trace_color: Rgb8,
    material_color: Rgb8,
    tolerance: f32,
    bounds: PixelRect,
    offset: StartPointOffset,
    gate: SettleGate,
    machine: StrokeMachine,
    baseline: Option<u64>,
}

impl TraceEngine {
    pub fn new(trace: Rgb8, material: Rgb8, tolerance: f32) -> ScrawlResult<Self> {
        validate_colors(trace, material)?;
        validate_tolerance(tolerance)?;
        Ok(Self {
            trace_color: trace,
            material_color: material,
            tolerance,
            bounds: PixelRect::ZERO,
            offset: StartPointOffset::UNSET,
            gate: SettleGate::new(),
            machine: StrokeMachine::new(),
            baseline: None,
        })
    }

    /// Load a new exercise: parse start-mark offsets from `identifier`,
    /// store `bounds` as the active region, clear the stroke and close the
    /// input gate for [`SETTLE_DELAY`].
    ///
    /// Returns the settle ticket; hosts with a real timer facility schedule
    /// a callback into [`TraceEngine::settle_complete`] with it, poll-style
    /// hosts just keep feeding events and the deadline opens the gate.
    #[tracing::instrument(skip(self))]
    pub fn load_material(&mut self, identifier: &str, bounds: PixelRect, now: Instant) -> u64 {
        self.offset = StartPointOffset::parse(identifier);
        self.bounds = bounds;
        self.baseline = None;
        self.machine.reset(self.offset.is_set());
        self.gate.arm(now, SETTLE_DELAY)
    }

    /// Open the input gate early iff `ticket` came from the latest load.
    pub fn settle_complete(&mut self, ticket: u64) -> bool {
        self.gate.complete(ticket)
    }

    /// Host override; invalidates any pending settle ticket.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.gate.force(enabled);
    }

    pub fn input_enabled(&self, now: Instant) -> bool {
        self.gate.is_open(now)
    }

    pub fn set_colors(&mut self, trace: Rgb8, material: Rgb8) -> ScrawlResult<()> {
        validate_colors(trace, material)?;
        self.trace_color = trace;
        self.material_color = material;
        Ok(())
    }

    pub fn set_tolerance(&mut self, px: f32) -> ScrawlResult<()> {
        validate_tolerance(px)?;
        self.tolerance = px;
        Ok(())
    }

    pub fn trace_color(&self) -> Rgb8 {
        self.trace_color
    }

    pub fn material_color(&self) -> Rgb8 {
        self.material_color
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn bounds(&self) -> PixelRect {
        self.bounds
    }

    /// The emitted stroke; elements are move-to/line-to records only.
    pub fn path(&self) -> &BezPath {
        self.machine.path()
    }

    pub fn phase(&self) -> TracePhase {
        self.machine.phase()
    }

    pub fn has_drawn(&self) -> bool {
        self.machine.has_drawn()
    }

    /// Where the host should draw the start mark, while it is still shown.
    pub fn start_mark(&self) -> Option<Point> {
        if self.machine.start_mark_visible() {
            self.offset.resolve(self.bounds)
        } else {
            None
        }
    }

    /// Live cursor position while a stroke is in progress.
    pub fn cursor(&self) -> Option<Point> {
        self.machine.cursor()
    }

    /// Clear the stroke and re-show the start mark without touching
    /// calibration.
    pub fn reset_stroke(&mut self) {
        self.machine.reset(self.offset.is_set());
    }

    /// Feed one pointer event.
    ///
    /// Sampling failures are swallowed: the event is discarded, tracing
    /// stops, and the host sees an unconsumed event — the interaction loop
    /// must survive a surface that briefly cannot be captured.
    #[tracing::instrument(skip(self, surface))]
    pub fn pointer_event<S: SurfaceSource + ?Sized>(
        &mut self,
        surface: &mut S,
        event: PointerEvent,
        now: Instant,
    ) -> PointerResponse {
        if !self.gate.is_open(now) {
            return PointerResponse::IGNORED;
        }
        let probe = match self.probe(surface, event) {
            Ok(probe) => probe,
            Err(err) => {
                tracing::debug!(%err, "pointer sample failed; discarding event");
                self.machine.stop_tracing();
                return PointerResponse::IGNORED;
            }
        };
        self.machine.handle(event, probe)
    }

    fn probe<S: SurfaceSource + ?Sized>(
        &self,
        surface: &mut S,
        event: PointerEvent,
    ) -> ScrawlResult<ColorProbe> {
        // One capture serves both color probes: the surface mutates between
        // events, not within one.
        let snap = surface.capture()?;
        let window = PixelRect::around(event.point(), self.tolerance);
        Ok(ColorProbe {
            on_trace: sample::region_contains(&snap, window, self.trace_color),
            on_material: sample::region_contains(&snap, window, self.material_color),
        })
    }

    /// Score the exercise: count remaining guide and background pixels over
    /// the active region.
    #[tracing::instrument(skip(self, surface))]
    pub fn analyze_completion<S: SurfaceSource + ?Sized>(
        &self,
        surface: &mut S,
    ) -> ScrawlResult<CompletionCounts> {
        let snap = surface.capture()?;
        Ok(completion::analyze(
            &snap,
            self.bounds,
            self.trace_color,
            self.material_color,
        ))
    }

    /// Record the pre-stroke background extent; call once after the material
    /// has rendered. The host scores completion percentages against it.
    pub fn capture_background_baseline<S: SurfaceSource + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> ScrawlResult<u64> {
        let snap = surface.capture()?;
        let count = completion::background_baseline(&snap, self.bounds, self.material_color);
        self.baseline = Some(count);
        Ok(count)
    }

    pub fn background_baseline(&self) -> Option<u64> {
        self.baseline
    }
}

fn validate_colors(trace: Rgb8, material: Rgb8) -> ScrawlResult<()> {
    if trace == material {
        return Err(ScrawlError::validation(
            "trace and material colors must differ",
        ));
    }
    Ok(())
}

fn validate_tolerance(px: f32) -> ScrawlResult<()> {
    if !px.is_finite() || px <= 0.0 {
        return Err(ScrawlError::validation("tolerance must be finite and > 0"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
