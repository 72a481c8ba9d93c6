use crate::{
    foundation::core::{PixelRect, Rgb8},
    surface::snapshot::Snapshot,
};

/// Iterate the raw RGBA pixels of `region`, clamped to the snapshot,
/// row-major. A region fully outside the snapshot yields nothing.
pub fn sample_region<'a>(
    snap: &'a Snapshot,
    region: PixelRect,
) -> impl Iterator<Item = [u8; 4]> + 'a {
    let r = region.clamped(snap.canvas());
    (r.top..r.bottom).flat_map(move |y| {
        (r.left..r.right).map(move |x| {
            // in range: the region was clamped to the snapshot above
            let i = ((y as usize * snap.width as usize) + x as usize) * 4;
            [
                snap.data[i],
                snap.data[i + 1],
                snap.data[i + 2],
                snap.data[i + 3],
            ]
        })
    })
}

/// Number of pixels in `region` whose RGB channels equal `color` exactly.
pub fn count_matches(snap: &Snapshot, region: PixelRect, color: Rgb8) -> u64 {
    sample_region(snap, region)
        .filter(|px| color.matches_rgba8(*px))
        .count() as u64
}

/// Early-exit probe: does any pixel of `region` match `color`?
pub fn region_contains(snap: &Snapshot, region: PixelRect, color: Rgb8) -> bool {
    sample_region(snap, region).any(|px| color.matches_rgba8(px))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/sample.rs"]
mod tests;
