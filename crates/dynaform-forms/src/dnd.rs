//! Drop-target detection for drag reordering.
//!
//! When a drag ends, the host reports the dragged element's rectangle and the
//! rectangles of the candidate drop zones. Candidates are the siblings of the
//! dragged field only; cross-container drops are never offered.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn distance_to(&self, other: &Self) -> f64 {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        (ax - bx).hypot(ay - by)
    }
}

/// A candidate drop target: a field id and where it sits on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    /// Id of the field occupying the zone.
    pub id: String,
    /// Its bounding rectangle.
    pub rect: Rect,
}

impl DropZone {
    /// Creates a drop zone.
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Returns the id of the zone whose center is nearest the center of `active`.
///
/// Ties go to the zone listed first. Zones whose distance is not finite
/// (NaN or infinite coordinates) are never chosen. Returns `None` when no
/// zone qualifies.
pub fn closest_center<'z>(active: &Rect, zones: &'z [DropZone]) -> Option<&'z str> {
    let mut best: Option<(&DropZone, f64)> = None;
    for zone in zones {
        let distance = active.distance_to(&zone.rect);
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((zone, distance)),
        }
    }
    best.map(|(zone, _)| zone.id.as_str())
}
