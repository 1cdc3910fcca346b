//! Integer pixel positions and the `px` attribute format.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Unit suffix written after persisted coordinates.
pub const PX_SUFFIX: &str = "px";

/// A `(left, top)` pixel offset relative to the component's positioning context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PositionCoordinates {
    pub left: i32,
    pub top: i32,
}

impl PositionCoordinates {
    /// The origin `(0, 0)`.
    pub const ZERO: Self = Self { left: 0, top: 0 };

    /// Create a new position.
    pub const fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Offset this position by a pixel delta, saturating at the `i32` limits.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
        }
    }

    /// Pixel delta from `other` to `self`.
    pub fn delta_from(self, other: Self) -> (i32, i32) {
        (
            self.left.saturating_sub(other.left),
            self.top.saturating_sub(other.top),
        )
    }

    /// Squared Euclidean distance to another position.
    ///
    /// Saturates at `i64::MAX` for positions at opposite ends of the `i32` range.
    pub fn distance_sq(self, other: Self) -> i64 {
        let dx = i64::from(self.left) - i64::from(other.left);
        let dy = i64::from(self.top) - i64::from(other.top);
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }

    /// Convert to a floating point `kurbo::Point`.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.left), f64::from(self.top))
    }

    /// Convert from a `kurbo::Point`, rounding each axis to the nearest pixel.
    pub fn from_point(point: Point) -> Self {
        Self {
            left: round_px(point.x),
            top: round_px(point.y),
        }
    }
}

impl From<(i32, i32)> for PositionCoordinates {
    fn from((left, top): (i32, i32)) -> Self {
        Self { left, top }
    }
}

/// Round a float coordinate to a whole pixel. `as` saturates and maps NaN to 0.
pub(crate) fn round_px(value: f64) -> i32 {
    value.round() as i32
}

/// Parse the leading integer of an attribute value.
///
/// Leading whitespace is skipped and an optional sign is accepted. Parsing stops
/// at the first non-digit, so `"120px"` and `"12abc"` both yield a value.
/// Returns `None` when there are no digits or the value does not fit an `i32`.
pub fn parse_px(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    let signed = if negative { -magnitude } else { magnitude };
    i32::try_from(signed).ok()
}

/// Format a coordinate for the attribute store, e.g. `120` becomes `"120px"`.
pub fn format_px(value: i32) -> String {
    format!("{value}{PX_SUFFIX}")
}
