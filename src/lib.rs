//! Scrawl is a pixel-sampled shape tracing engine.
//!
//! A host application renders a reference shape and forwards pointer events;
//! Scrawl decides whether each touch extends the stroke, restarts it, or is
//! rejected — by sampling the rendered surface and classifying pixels by
//! exact color identity rather than geometric hit-testing.
//!
//! # Event flow
//!
//! 1. **Capture**: the host implements [`SurfaceSource`]; the engine takes
//!    one [`Snapshot`] per pointer event.
//! 2. **Probe**: a window of the configured tolerance around the touch point
//!    is scanned for the guide ("trace") and fillable ("material") colors.
//! 3. **Resolve**: [`StrokeMachine`] turns the probe into move-to/line-to
//!    mutations of a `kurbo::BezPath` and an accept/reject signal.
//! 4. **Score**: [`analyze`] counts remaining guide and background pixels
//!    over the region of interest.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No rendering**: the engine only reads pixels back and emits path
//!   commands; compositing stays with the host.
//! - **No crashes on the interaction path**: sampling failures degrade to
//!   "ignore this input" so the interaction loop stays alive.
#![forbid(unsafe_code)]

mod engine;
mod foundation;
mod material;
mod score;
mod stroke;
mod surface;

pub use engine::{SETTLE_DELAY, TraceEngine};
pub use foundation::core::{BezPath, Canvas, PixelRect, Point, Rgb8};
pub use foundation::error::{ScrawlError, ScrawlResult};
pub use material::descriptor::{OFFSET_UNSET, StartPointOffset};
pub use material::settle::SettleGate;
pub use score::completion::{CompletionCounts, analyze, background_baseline};
pub use stroke::machine::{
    ColorProbe, PointerEvent, PointerKind, PointerResponse, StrokeMachine, TracePhase,
};
pub use surface::sample::{count_matches, region_contains, sample_region};
pub use surface::snapshot::{Snapshot, SurfaceSource, decode_material_image};
