use super::*;

use crate::foundation::core::Canvas;

const TRACE: Rgb8 = Rgb8::new(0, 0, 255);
const MATERIAL: Rgb8 = Rgb8::new(204, 204, 204);
const OTHER: Rgb8 = Rgb8::new(255, 255, 255);

/// 10x10 surface: rows 0-2 material (30 px), half of row 3 trace (5 px),
/// everything else a third color.
fn fixture() -> Snapshot {
    let mut snap = Snapshot::filled(
        Canvas {
            width: 10,
            height: 10,
        },
        OTHER,
    );
    snap.fill_rect(PixelRect::new(0, 0, 10, 3), MATERIAL);
    snap.fill_rect(PixelRect::new(0, 3, 5, 4), TRACE);
    snap
}

#[test]
fn counts_trace_and_background_buckets() {
    let snap = fixture();
    let counts = analyze(&snap, PixelRect::new(0, 0, 10, 10), TRACE, MATERIAL);
    assert_eq!(
        counts,
        CompletionCounts {
            trace_pixels: 5,
            background_pixels: 30,
        }
    );
}

#[test]
fn analyze_is_idempotent_on_an_unchanged_surface() {
    let snap = fixture();
    let region = PixelRect::new(0, 0, 10, 10);
    let first = analyze(&snap, region, TRACE, MATERIAL);
    let second = analyze(&snap, region, TRACE, MATERIAL);
    assert_eq!(first, second);
}

#[test]
fn region_is_clamped_to_the_surface() {
    let snap = fixture();
    let counts = analyze(&snap, PixelRect::new(-5, -5, 15, 3), TRACE, MATERIAL);
    assert_eq!(counts.background_pixels, 30);
    assert_eq!(counts.trace_pixels, 0);
}

#[test]
fn empty_region_counts_nothing() {
    let snap = fixture();
    let counts = analyze(&snap, PixelRect::ZERO, TRACE, MATERIAL);
    assert_eq!(counts, CompletionCounts::default());

    let outside = analyze(&snap, PixelRect::new(50, 50, 60, 60), TRACE, MATERIAL);
    assert_eq!(outside, CompletionCounts::default());
}

#[test]
fn baseline_counts_material_only() {
    let snap = fixture();
    let baseline = background_baseline(&snap, PixelRect::new(0, 0, 10, 10), MATERIAL);
    assert_eq!(baseline, 30);
}
