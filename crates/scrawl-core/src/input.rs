//! Pointer events as delivered by the host input layer.

use crate::geometry::StrokePoint;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifier of a physical pointer (mouse, finger, or stylus).
pub type PointerId = i32;

/// Device category that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
    Enter,
}

/// A single pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer_id: PointerId,
    #[serde(default)]
    pub pointer_type: PointerType,
    #[serde(default)]
    pub button: MouseButton,
    /// Position in screen (client) coordinates.
    pub position: Point,
    /// Raw pressure as reported; 0 means the device has none.
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub tilt_x: f64,
    #[serde(default)]
    pub tilt_y: f64,
    #[serde(default)]
    pub twist: f64,
}

impl PointerEvent {
    /// Create an event with no pressure or stylus data.
    pub fn new(phase: PointerPhase, pointer_id: PointerId, position: Point) -> Self {
        Self {
            phase,
            pointer_id,
            pointer_type: PointerType::Mouse,
            button: MouseButton::Left,
            position,
            pressure: 0.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            twist: 0.0,
        }
    }

    pub fn down(pointer_id: PointerId, position: Point) -> Self {
        Self::new(PointerPhase::Down, pointer_id, position)
    }

    pub fn moved(pointer_id: PointerId, position: Point) -> Self {
        Self::new(PointerPhase::Move, pointer_id, position)
    }

    pub fn up(pointer_id: PointerId, position: Point) -> Self {
        Self::new(PointerPhase::Up, pointer_id, position)
    }

    pub fn cancel(pointer_id: PointerId, position: Point) -> Self {
        Self::new(PointerPhase::Cancel, pointer_id, position)
    }

    pub fn leave(pointer_id: PointerId, position: Point) -> Self {
        Self::new(PointerPhase::Leave, pointer_id, position)
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = pressure;
        self
    }

    pub fn with_pointer_type(mut self, pointer_type: PointerType) -> Self {
        self.pointer_type = pointer_type;
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_tilt(mut self, tilt_x: f64, tilt_y: f64) -> Self {
        self.tilt_x = tilt_x;
        self.tilt_y = tilt_y;
        self
    }

    /// Build the normalized sample for an already-mapped logical position.
    ///
    /// Pressure is recorded only when positive (clamped to 1). Tilt and twist
    /// are recorded only for pens.
    pub fn to_stroke_point(&self, logical: Point) -> StrokePoint {
        let mut point = StrokePoint::new(logical.x, logical.y);

        if self.pressure > 0.0 && self.pressure.is_finite() {
            point.pressure = Some(self.pressure.min(1.0));
        }

        if self.pointer_type == PointerType::Pen {
            point.tilt_x = Some(finite_or_zero(self.tilt_x));
            point.tilt_y = Some(finite_or_zero(self.tilt_y));
            point.twist = Some(finite_or_zero(self.twist));
        }

        point
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_has_no_pressure() {
        let event = PointerEvent::down(1, Point::new(5.0, 5.0));
        let point = event.to_stroke_point(Point::new(1.0, 2.0));
        assert_eq!(point, StrokePoint::new(1.0, 2.0));
    }

    #[test]
    fn test_pressure_clamped() {
        let event = PointerEvent::down(1, Point::ZERO).with_pressure(1.7);
        assert_eq!(event.to_stroke_point(Point::ZERO).pressure, Some(1.0));
    }

    #[test]
    fn test_tilt_only_for_pen() {
        let touch = PointerEvent::moved(2, Point::ZERO)
            .with_pointer_type(PointerType::Touch)
            .with_tilt(10.0, 20.0);
        assert!(touch.to_stroke_point(Point::ZERO).tilt_x.is_none());

        let pen = touch.with_pointer_type(PointerType::Pen);
        let point = pen.to_stroke_point(Point::ZERO);
        assert_eq!(point.tilt_x, Some(10.0));
        assert_eq!(point.tilt_y, Some(20.0));
        assert_eq!(point.twist, Some(0.0));
    }

    #[test]
    fn test_deserialize_minimal_event() {
        let event: PointerEvent = serde_json::from_str(
            r#"{"phase": "down", "pointer_id": 3, "position": {"x": 4.0, "y": 5.0}}"#,
        )
        .unwrap();
        assert_eq!(event.phase, PointerPhase::Down);
        assert_eq!(event.pointer_type, PointerType::Mouse);
        assert_eq!(event.position, Point::new(4.0, 5.0));
    }
}
