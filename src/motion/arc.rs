//! Arc interpolation in the XY plane.
//!
//! An arc is approximated by chords of equal angular size. The final chord always
//! ends exactly on the requested endpoint.

use core::f32::consts::TAU;

use libm::{atan2f, ceilf, cosf, fabsf, hypotf, sinf};

use crate::config::units::Millimeters;
use crate::config::ArcConfig;
use crate::error::{ConfigError, GeometryError, MotionError, Result};

/// Distance under which two points are considered the same.
pub const POINT_EPSILON_MM: f32 = 1.0e-3;

/// Fraction of a step angle ignored when counting segments, so float noise in the
/// sweep never adds a sliver segment.
const SEGMENT_SLACK: f32 = 1.0e-3;

/// Traversal sense of an arc as seen from above the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Winding {
    /// Decreasing angle (G2).
    Clockwise,
    /// Increasing angle (G3).
    CounterClockwise,
}

impl Winding {
    /// Winding from a clockwise flag.
    #[inline]
    pub fn from_clockwise(is_clockwise: bool) -> Self {
        if is_clockwise {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

/// A point in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanePoint {
    /// X coordinate.
    pub x: Millimeters,
    /// Y coordinate.
    pub y: Millimeters,
}

impl PlanePoint {
    /// Create a point.
    #[inline]
    pub const fn new(x: Millimeters, y: Millimeters) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance_to(&self, other: PlanePoint) -> f32 {
        hypotf(other.x.0 - self.x.0, other.y.0 - self.y.0)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Request for one circular move, starting at the current XY position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArcRequest {
    /// Center of the circle.
    pub center: PlanePoint,
    /// Endpoint of the arc. Equal to the start point for a full circle.
    pub end: PlanePoint,
    /// Traversal sense.
    pub winding: Winding,
}

impl ArcRequest {
    /// Create a request.
    pub fn new(center: PlanePoint, end: PlanePoint, winding: Winding) -> Self {
        Self { center, end, winding }
    }

    /// Clockwise arc around `(center_x, center_y)` ending at `(end_x, end_y)`.
    pub fn clockwise(center_x: f32, center_y: f32, end_x: f32, end_y: f32) -> Self {
        Self::from_coords(center_x, center_y, end_x, end_y, Winding::Clockwise)
    }

    /// Counter-clockwise arc around `(center_x, center_y)` ending at `(end_x, end_y)`.
    pub fn counter_clockwise(center_x: f32, center_y: f32, end_x: f32, end_y: f32) -> Self {
        Self::from_coords(center_x, center_y, end_x, end_y, Winding::CounterClockwise)
    }

    fn from_coords(center_x: f32, center_y: f32, end_x: f32, end_y: f32, winding: Winding) -> Self {
        Self {
            center: PlanePoint::new(Millimeters(center_x), Millimeters(center_y)),
            end: PlanePoint::new(Millimeters(end_x), Millimeters(end_y)),
            winding,
        }
    }
}

/// Interpolation plan for an arc: radius, angular sweep and segment count.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArcPlan {
    center: PlanePoint,
    end: PlanePoint,
    radius: f32,
    start_angle: f32,
    sweep: f32,
    segments: u32,
}

impl ArcPlan {
    /// Plan an arc from `start` according to `request`.
    ///
    /// The sweep always follows the requested winding, taking the long way round
    /// when the endpoint lies behind the start. An endpoint equal to the start
    /// produces a full circle.
    ///
    /// # Errors
    ///
    /// - `MotionError::NonFinite` if any coordinate is NaN or infinite
    /// - `GeometryError::ZeroRadius` if the endpoint coincides with the center
    /// - `GeometryError::RadiusMismatch` if the start and end radii differ by more
    ///   than the configured tolerance
    /// - `ConfigError::InvalidArcStepAngle` for a non-positive step angle
    pub fn new(start: PlanePoint, request: &ArcRequest, config: &ArcConfig) -> Result<Self> {
        let ArcRequest { center, end, winding } = *request;

        if !start.is_finite() || !center.is_finite() || !end.is_finite() {
            return Err(MotionError::NonFinite.into());
        }

        let step = config.step_angle_rad();
        if !(step > 0.0) {
            return Err(ConfigError::InvalidArcStepAngle(config.step_angle.0).into());
        }

        let radius = center.distance_to(end);
        if radius <= POINT_EPSILON_MM {
            return Err(GeometryError::ZeroRadius.into());
        }

        let start_radius = center.distance_to(start);
        if fabsf(start_radius - radius) > config.radius_tolerance.0 {
            return Err(GeometryError::RadiusMismatch {
                start: start_radius,
                end: radius,
            }
            .into());
        }

        let start_angle = atan2f(start.y.0 - center.y.0, start.x.0 - center.x.0);
        let end_angle = atan2f(end.y.0 - center.y.0, end.x.0 - center.x.0);

        let sweep = if start.distance_to(end) <= POINT_EPSILON_MM {
            match winding {
                Winding::Clockwise => -TAU,
                Winding::CounterClockwise => TAU,
            }
        } else {
            let raw = end_angle - start_angle;
            match winding {
                Winding::Clockwise if raw >= 0.0 => raw - TAU,
                Winding::CounterClockwise if raw <= 0.0 => raw + TAU,
                _ => raw,
            }
        };

        let segments = ceilf(fabsf(sweep) / step - SEGMENT_SLACK);
        let segments = if segments < 1.0 { 1 } else { segments as u32 };

        Ok(Self {
            center,
            end,
            radius,
            start_angle,
            sweep,
            segments,
        })
    }

    /// Radius of the circle (center to endpoint).
    #[inline]
    pub fn radius(&self) -> Millimeters {
        Millimeters(self.radius)
    }

    /// Signed angular sweep in radians (negative for clockwise).
    #[inline]
    pub fn sweep(&self) -> f32 {
        self.sweep
    }

    /// Number of interpolation segments.
    #[inline]
    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Length of the ideal arc.
    #[inline]
    pub fn length(&self) -> Millimeters {
        Millimeters(self.radius * fabsf(self.sweep))
    }

    /// End of segment `index` (1-based). The last segment ends exactly on the endpoint.
    pub fn point(&self, index: u32) -> PlanePoint {
        if index >= self.segments {
            return self.end;
        }

        let angle = self.start_angle + self.sweep * (index as f32 / self.segments as f32);
        PlanePoint::new(
            Millimeters(self.center.x.0 + self.radius * cosf(angle)),
            Millimeters(self.center.y.0 + self.radius * sinf(angle)),
        )
    }

    /// Iterate over the segment endpoints, ending on the requested endpoint.
    pub fn points(&self) -> ArcPoints {
        ArcPoints {
            plan: *self,
            next: 1,
        }
    }
}

/// Iterator over the segment endpoints of an [`ArcPlan`].
#[derive(Debug, Clone)]
pub struct ArcPoints {
    plan: ArcPlan,
    next: u32,
}

impl Iterator for ArcPoints {
    type Item = PlanePoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.plan.segments {
            return None;
        }
        let point = self.plan.point(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.plan.segments + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPoints {}
