use rayon::prelude::*;

use crate::{
    foundation::core::{PixelRect, Rgb8},
    surface::{sample, snapshot::Snapshot},
};

/// Completion counts over the material region at exercise end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompletionCounts {
    /// Pixels still showing the guide-line color (untraced remainder).
    pub trace_pixels: u64,
    /// Pixels still showing the material color (unfilled background).
    pub background_pixels: u64,
}

/// Count guide and background pixels in one pass over `region`.
///
/// Rows scan in parallel. A pixel counts toward at most one bucket; the two
/// colors are configured distinct.
pub fn analyze(
    snap: &Snapshot,
    region: PixelRect,
    trace: Rgb8,
    material: Rgb8,
) -> CompletionCounts {
    let r = region.clamped(snap.canvas());
    if r.is_empty() {
        return CompletionCounts::default();
    }
    (r.top..r.bottom)
        .into_par_iter()
        .map(|y| {
            let mut row = CompletionCounts::default();
            let base = y as usize * snap.width as usize;
            for x in r.left..r.right {
                let i = (base + x as usize) * 4;
                let px = [
                    snap.data[i],
                    snap.data[i + 1],
                    snap.data[i + 2],
                    snap.data[i + 3],
                ];
                if material.matches_rgba8(px) {
                    row.background_pixels += 1;
                } else if trace.matches_rgba8(px) {
                    row.trace_pixels += 1;
                }
            }
            row
        })
        .reduce(CompletionCounts::default, |a, b| CompletionCounts {
            trace_pixels: a.trace_pixels + b.trace_pixels,
            background_pixels: a.background_pixels + b.background_pixels,
        })
}

/// Background-only count, recorded once per material load as the scoring
/// baseline (completion percentages are computed against it by the host).
pub fn background_baseline(snap: &Snapshot, region: PixelRect, material: Rgb8) -> u64 {
    sample::count_matches(snap, region, material)
}

#[cfg(test)]
#[path = "../../tests/unit/score/completion.rs"]
mod tests;
