//! Viewport module for screen/logical transforms, panning and zooming.

use crate::geometry::Bounds;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// The logical region shown by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Create a view box from its origin and size in logical units.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner in logical coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Default for ViewBox {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }
}

/// Viewport maps between the host surface and logical drawing space.
///
/// The view box is fitted into the surface preserving its aspect ratio and
/// centred, so a surface with a different aspect ratio shows letterbox bars
/// on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub view_box: ViewBox,
    /// Surface rectangle in screen coordinates.
    pub surface: Rect,
    /// Smallest allowed view box width (most zoomed in).
    pub min_width: f64,
    /// Largest allowed view box width (most zoomed out).
    pub max_width: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewBox::default(), Rect::new(0.0, 0.0, 100.0, 100.0))
    }
}

impl Viewport {
    /// Create a viewport showing `view_box` on `surface` with default zoom limits.
    pub fn new(view_box: ViewBox, surface: Rect) -> Self {
        Self {
            view_box,
            surface,
            min_width: 1.0,
            max_width: 100_000.0,
        }
    }

    /// Effective screen pixels per logical unit and the centring offset of
    /// the fitted area inside the surface.
    pub fn letterbox(&self) -> (f64, Vec2) {
        let sw = self.surface.width();
        let sh = self.surface.height();
        let vw = self.view_box.width;
        let vh = self.view_box.height;

        if !(sw > 0.0 && sh > 0.0 && vw > 0.0 && vh > 0.0) {
            return (1.0, Vec2::ZERO);
        }

        let scale = (sw / vw).min(sh / vh);
        let offset = Vec2::new((sw - vw * scale) / 2.0, (sh - vh * scale) / 2.0);
        (scale, offset)
    }

    /// Transform from logical coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        let (scale, offset) = self.letterbox();
        Affine::translate(self.surface.origin().to_vec2() + offset)
            * Affine::scale(scale)
            * Affine::translate(-self.view_box.origin().to_vec2())
    }

    /// Transform from screen coordinates to logical coordinates.
    pub fn inverse_transform(&self) -> Affine {
        let (scale, offset) = self.letterbox();
        Affine::translate(self.view_box.origin().to_vec2())
            * Affine::scale(1.0 / scale)
            * Affine::translate(-(self.surface.origin().to_vec2() + offset))
    }

    /// Convert a screen point to logical coordinates.
    pub fn screen_to_logical(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a logical point to screen coordinates.
    pub fn logical_to_screen(&self, logical_point: Point) -> Point {
        self.transform() * logical_point
    }

    /// Resize the host surface; the view box is left as is.
    pub fn resize(&mut self, surface: Rect) {
        self.surface = surface;
    }

    /// Whether content exceeds the view box on either axis.
    pub fn can_pan(&self, content: Option<Bounds>) -> bool {
        content.is_some_and(|b| b.width > self.view_box.width || b.height > self.view_box.height)
    }

    /// Drag the view by a screen-space delta.
    ///
    /// Each axis moves only if the content is larger than the view box on
    /// that axis, and is then clamped to keep the view inside the content.
    /// Returns whether the view box changed.
    pub fn pan(&mut self, screen_delta: Vec2, content: Option<Bounds>) -> bool {
        let Some(bounds) = content else {
            return false;
        };
        let (scale, _) = self.letterbox();
        let delta = screen_delta / scale;
        if !delta.is_finite() {
            return false;
        }
        let before = self.view_box;
        let vb = &mut self.view_box;

        if bounds.width > vb.width {
            vb.x = (vb.x - delta.x).clamp(bounds.x, bounds.right() - vb.width);
        }
        if bounds.height > vb.height {
            vb.y = (vb.y - delta.y).clamp(bounds.y, bounds.bottom() - vb.height);
        }

        self.view_box != before
    }

    /// Zoom by `factor` (> 1 zooms in), keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        if !(factor > 0.0 && factor.is_finite()) {
            return;
        }
        let new_width = (self.view_box.width / factor).clamp(self.min_width, self.max_width);
        if (new_width - self.view_box.width).abs() < f64::EPSILON {
            return;
        }
        let ratio = new_width / self.view_box.width;

        let anchor = self.screen_to_logical(screen_point);
        let vb = &mut self.view_box;
        vb.x = anchor.x - (anchor.x - vb.x) * ratio;
        vb.y = anchor.y - (anchor.y - vb.y) * ratio;
        vb.width = new_width;
        vb.height *= ratio;
    }
}
