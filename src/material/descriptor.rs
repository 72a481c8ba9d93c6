use kurbo::Point;

use crate::foundation::core::PixelRect;

/// Sentinel for an axis with no usable token.
pub const OFFSET_UNSET: f32 = -0.1;

/// Start-mark placement parsed from a material identifier.
///
/// Identifiers may embed a `W<digits>W` and an `H<digits>H` token anywhere,
/// in either order: `shapeW25WH60H.png` puts the mark at 25% of the material
/// width and 60% of its height. A missing or unparseable token leaves that
/// axis unset, and with either axis unset no mark is shown.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StartPointOffset {
    pub width: f32,
    pub height: f32,
}

impl Default for StartPointOffset {
    fn default() -> Self {
        Self::UNSET
    }
}

impl StartPointOffset {
    pub const UNSET: Self = Self {
        width: OFFSET_UNSET,
        height: OFFSET_UNSET,
    };

    pub fn parse(identifier: &str) -> Self {
        Self {
            width: axis_fraction(identifier, 'W'),
            height: axis_fraction(identifier, 'H'),
        }
    }

    /// Both axes carry a usable (positive) fraction.
    pub fn is_set(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Mark position inside `bounds`, if the offset is set.
    pub fn resolve(self, bounds: PixelRect) -> Option<Point> {
        if !self.is_set() {
            return None;
        }
        Some(Point::new(
            f64::from(bounds.right - bounds.left) * f64::from(self.width)
                + f64::from(bounds.left),
            f64::from(bounds.bottom - bounds.top) * f64::from(self.height)
                + f64::from(bounds.top),
        ))
    }
}

/// First shortest `<delim>…<delim>` token, parsed as an integer percentage.
fn axis_fraction(identifier: &str, delim: char) -> f32 {
    let Some(start) = identifier.find(delim) else {
        return OFFSET_UNSET;
    };
    let rest = &identifier[start + delim.len_utf8()..];
    let Some(len) = rest.find(delim) else {
        return OFFSET_UNSET;
    };
    match rest[..len].parse::<i32>() {
        Ok(percent) => percent as f32 / 100.0,
        Err(_) => OFFSET_UNSET,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/material/descriptor.rs"]
mod tests;
