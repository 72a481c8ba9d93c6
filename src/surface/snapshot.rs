use anyhow::Context as _;

use crate::foundation::{
    core::{Canvas, PixelRect, Rgb8},
    error::{ScrawlError, ScrawlResult},
};

/// One captured frame of the host surface, straight-alpha RGBA8, row-major.
///
/// Straight, not premultiplied: the matching contract is exact channel
/// equality against configured reference colors, and premultiplication would
/// rewrite channels wherever the host composites with alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Snapshot {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ScrawlResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(ScrawlError::sampling(format!(
                "snapshot buffer is {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Uniform opaque fill, mostly useful for composing surfaces by hand.
    pub fn filled(canvas: Canvas, color: Rgb8) -> Self {
        let px = [color.r, color.g, color.b, 255];
        Self {
            width: canvas.width,
            height: canvas.height,
            data: px.repeat((canvas.width as usize) * (canvas.height as usize)),
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn rgb_at(&self, x: u32, y: u32) -> Option<Rgb8> {
        self.pixel(x, y).map(Rgb8::from_rgba8)
    }

    /// Overwrite one pixel with an opaque color; out-of-bounds writes are
    /// silently dropped.
    pub fn put(&mut self, x: u32, y: u32, color: Rgb8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y as usize * self.width as usize) + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
    }

    /// Opaque fill of `rect`, clamped to the snapshot.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgb8) {
        let r = rect.clamped(self.canvas());
        for y in r.top..r.bottom {
            for x in r.left..r.right {
                let i = ((y as usize * self.width as usize) + x as usize) * 4;
                self.data[i..i + 4].copy_from_slice(&[color.r, color.g, color.b, 255]);
            }
        }
    }
}

/// The host's rendered surface, as the engine sees it.
///
/// `capture` must rasterize the *current* visual state — the reference
/// material plus any stroke already drawn — because the surface mutates
/// between pointer events. The engine captures once per event and runs all
/// of that event's probes against the one snapshot.
pub trait SurfaceSource {
    fn canvas(&self) -> Canvas;

    fn capture(&mut self) -> ScrawlResult<Snapshot>;
}

/// A snapshot is also a fixed surface: captures return it unchanged. Replay
/// tools and tests use this when the host does not re-composite between
/// events.
impl SurfaceSource for Snapshot {
    fn canvas(&self) -> Canvas {
        Snapshot::canvas(self)
    }

    fn capture(&mut self) -> ScrawlResult<Snapshot> {
        Ok(self.clone())
    }
}

/// Decode an encoded material image (PNG etc.) into a snapshot.
///
/// Pixels stay straight-alpha; see [`Snapshot`].
pub fn decode_material_image(bytes: &[u8]) -> ScrawlResult<Snapshot> {
    let dyn_img = image::load_from_memory(bytes).context("decode material image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Snapshot::new(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/snapshot.rs"]
mod tests;
