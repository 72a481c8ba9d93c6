use super::*;

use crate::foundation::core::Canvas;

const INK: Rgb8 = Rgb8::new(40, 50, 60);
const PAPER: Rgb8 = Rgb8::new(250, 250, 250);

fn paper(width: u32, height: u32) -> Snapshot {
    Snapshot::filled(Canvas { width, height }, PAPER)
}

#[test]
fn region_outside_surface_yields_nothing() {
    let snap = paper(10, 10);
    let region = PixelRect::new(12, 0, 20, 5);
    assert_eq!(sample_region(&snap, region).next(), None);
    assert_eq!(count_matches(&snap, region, PAPER), 0);
    assert!(!region_contains(&snap, region, PAPER));
}

#[test]
fn degenerate_region_is_empty() {
    let snap = paper(10, 10);
    assert_eq!(count_matches(&snap, PixelRect::new(3, 3, 3, 9), PAPER), 0);
    assert_eq!(count_matches(&snap, PixelRect::new(3, 3, 9, 3), PAPER), 0);
}

#[test]
fn partial_overlap_clamps_silently() {
    let snap = paper(10, 10);
    // hangs off every edge; the intersection is the full 10x10 surface
    let region = PixelRect::new(-5, -5, 15, 15);
    assert_eq!(count_matches(&snap, region, PAPER), 100);
    assert_eq!(sample_region(&snap, region).count(), 100);
}

#[test]
fn counts_exact_channel_matches_only() {
    let mut snap = paper(4, 4);
    snap.put(1, 1, INK);
    snap.put(2, 2, INK);
    snap.put(3, 3, Rgb8::new(40, 50, 61));

    let all = PixelRect::new(0, 0, 4, 4);
    assert_eq!(count_matches(&snap, all, INK), 2);
    assert!(region_contains(&snap, all, INK));
    assert!(!region_contains(&snap, all, Rgb8::new(0, 0, 0)));
}

#[test]
fn alpha_never_participates() {
    let mut snap = paper(2, 2);
    snap.put(0, 0, INK);
    // force a transparent alpha behind the same RGB
    snap.data[3] = 7;
    assert_eq!(count_matches(&snap, PixelRect::new(0, 0, 2, 2), INK), 1);
}

#[test]
fn single_matching_pixel_is_found() {
    let mut snap = paper(50, 50);
    snap.put(31, 17, INK);
    assert!(region_contains(&snap, PixelRect::new(28, 14, 34, 20), INK));
    assert!(!region_contains(&snap, PixelRect::new(0, 0, 30, 16), INK));
}
