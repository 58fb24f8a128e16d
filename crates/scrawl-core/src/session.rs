//! Pointer session: who owns the pointer, and what their events mean.
//!
//! At most one pointer drives the surface at a time. The first qualifying
//! press starts either a drawing session (routed to the active tool) or a pan
//! session (routed to the viewport); every other pointer is ignored until the
//! session ends. [`SessionMode::step`] decides transitions without side
//! effects and [`Session::handle`] carries them out.

use crate::config::DrawingConfig;
use crate::document::Document;
use crate::geometry::StrokePoint;
use crate::input::{MouseButton, PointerEvent, PointerId, PointerPhase};
use crate::simplify::simplify_stroke;
use crate::tools::{ToolContext, ToolError, ToolHandler};
use crate::viewport::Viewport;
use kurbo::Point;
use thiserror::Error;

/// Errors reported by the host when capturing or releasing a pointer.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Pointer {0} is not active")]
    InactivePointer(PointerId),
    #[error("Capture rejected by host: {0}")]
    Rejected(String),
}

/// Native pointer capture provided by the host.
pub trait PointerCapture {
    fn set_capture(&mut self, pointer_id: PointerId) -> Result<(), CaptureError>;
    fn release_capture(&mut self, pointer_id: PointerId) -> Result<(), CaptureError>;

    /// Suppress default touch gestures (scrolling, zooming) while a session runs.
    fn set_gestures_suppressed(&mut self, _suppressed: bool) {}
}

/// Capture for hosts without a native pointer capture mechanism.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn set_capture(&mut self, _pointer_id: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release_capture(&mut self, _pointer_id: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }
}

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionMode {
    #[default]
    Idle,
    Drawing {
        pointer_id: PointerId,
    },
    /// `anchor` is the screen position of the last processed pan event.
    Panning {
        pointer_id: PointerId,
        anchor: Point,
    },
}

/// Side effect chosen by [`SessionMode::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Ignore,
    Hover,
    ClearHover,
    BeginDraw,
    Extend,
    Commit,
    Discard,
    BeginPan,
    Pan,
    EndPan,
}

impl SessionMode {
    /// The pointer that owns the session, if any.
    pub fn active_pointer(&self) -> Option<PointerId> {
        match *self {
            SessionMode::Idle => None,
            SessionMode::Drawing { pointer_id } | SessionMode::Panning { pointer_id, .. } => {
                Some(pointer_id)
            }
        }
    }

    /// Next mode and the action to perform for `event`.
    pub fn step(
        self,
        event: &PointerEvent,
        pan_trigger: bool,
        commit_on_leave: bool,
    ) -> (SessionMode, SessionAction) {
        use PointerPhase::*;
        use SessionAction as A;

        if self.active_pointer().is_some_and(|id| id != event.pointer_id) {
            return (self, A::Ignore);
        }

        match (self, event.phase) {
            (SessionMode::Idle, Down) => {
                if pan_trigger || event.button == MouseButton::Middle {
                    let mode = SessionMode::Panning {
                        pointer_id: event.pointer_id,
                        anchor: event.position,
                    };
                    (mode, A::BeginPan)
                } else if event.button == MouseButton::Left {
                    let mode = SessionMode::Drawing {
                        pointer_id: event.pointer_id,
                    };
                    (mode, A::BeginDraw)
                } else {
                    (self, A::Ignore)
                }
            }
            (SessionMode::Idle, Move) => (self, A::Hover),
            (SessionMode::Idle, Leave) => (self, A::ClearHover),
            (SessionMode::Idle, _) => (self, A::Ignore),

            (SessionMode::Drawing { .. }, Move) => (self, A::Extend),
            (SessionMode::Drawing { .. }, Up) => (SessionMode::Idle, A::Commit),
            (SessionMode::Drawing { .. }, Leave) if commit_on_leave => {
                (SessionMode::Idle, A::Commit)
            }
            (SessionMode::Drawing { .. }, Leave | Cancel) => (SessionMode::Idle, A::Discard),
            (SessionMode::Drawing { .. }, Down | Enter) => (self, A::Ignore),

            (SessionMode::Panning { pointer_id, .. }, Move) => {
                let mode = SessionMode::Panning {
                    pointer_id,
                    anchor: event.position,
                };
                (mode, A::Pan)
            }
            (SessionMode::Panning { .. }, Up | Cancel | Leave) => (SessionMode::Idle, A::EndPan),
            (SessionMode::Panning { .. }, Down | Enter) => (self, A::Ignore),
        }
    }
}

/// What an event did, for hosts that redraw selectively.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Ignored,
    Hover,
    Started,
    Extended,
    Committed,
    Cancelled,
    /// A tool callback failed and the session was reset to idle.
    Aborted(ToolError),
    PanStarted,
    Panned,
    PanEnded,
}

/// The single mutable pointer session of a surface.
#[derive(Debug, Clone, Default)]
pub struct Session {
    mode: SessionMode,
    raw_path: Vec<StrokePoint>,
    /// Last hover or drawing position in logical coordinates.
    pointer: Option<Point>,
    pan_trigger: bool,
    viewport: Viewport,
    config: DrawingConfig,
}

impl Session {
    pub fn new(viewport: Viewport, config: DrawingConfig) -> Self {
        Self {
            viewport,
            config,
            ..Self::default()
        }
    }

    /// Current session state.
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// True while a drawing or pan session is running.
    pub fn is_active(&self) -> bool {
        self.mode != SessionMode::Idle
    }

    /// Points captured so far in the current drawing session.
    pub fn raw_path(&self) -> &[StrokePoint] {
        &self.raw_path
    }

    /// Last known pointer position in logical coordinates, for overlays.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn pan_trigger(&self) -> bool {
        self.pan_trigger
    }

    /// Set while the host's pan modifier (space) is held.
    pub fn set_pan_trigger(&mut self, active: bool) {
        self.pan_trigger = active;
    }

    /// The view box and surface mapping used for incoming events.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect from the next event.
    pub fn set_config(&mut self, config: DrawingConfig) {
        self.config = config;
    }

    /// Route one pointer event.
    pub fn handle(
        &mut self,
        event: &PointerEvent,
        tool: &mut dyn ToolHandler,
        document: &mut Document,
        capture: &mut dyn PointerCapture,
    ) -> Transition {
        // Up, cancel and leave still end the session.
        if !event.position.is_finite()
            && matches!(
                event.phase,
                PointerPhase::Down | PointerPhase::Move | PointerPhase::Enter
            )
        {
            log::debug!("Ignoring non-finite pointer position {:?}", event.position);
            return Transition::Ignored;
        }

        let (next, action) = self
            .mode
            .step(event, self.pan_trigger, self.config.commit_on_leave);

        match action {
            SessionAction::Ignore => Transition::Ignored,
            SessionAction::Hover => {
                self.pointer = Some(self.viewport.screen_to_logical(event.position));
                Transition::Hover
            }
            SessionAction::ClearHover => {
                self.pointer = None;
                Transition::Hover
            }
            SessionAction::BeginDraw => self.begin_draw(next, event, tool, document, capture),
            SessionAction::Extend => self.extend(event, tool, document),
            SessionAction::Commit => {
                let transition = self.commit(event, tool, document);
                self.finish(capture);
                transition
            }
            SessionAction::Discard => {
                log::debug!("Discarding {} points", self.raw_path.len());
                tool.on_pointer_cancel();
                self.finish(capture);
                Transition::Cancelled
            }
            SessionAction::BeginPan => {
                acquire(event.pointer_id, capture);
                self.mode = next;
                Transition::PanStarted
            }
            SessionAction::Pan => {
                if let SessionMode::Panning { anchor, .. } = self.mode {
                    let delta = event.position - anchor;
                    self.viewport.pan(delta, document.content_bounds());
                }
                self.mode = next;
                Transition::Panned
            }
            SessionAction::EndPan => {
                self.finish(capture);
                Transition::PanEnded
            }
        }
    }

    /// Abandon any running session, e.g. when the tool changes.
    pub fn reset(&mut self, tool: &mut dyn ToolHandler, capture: &mut dyn PointerCapture) {
        match self.mode {
            SessionMode::Idle => {}
            SessionMode::Drawing { .. } => {
                tool.on_pointer_cancel();
                self.finish(capture);
            }
            SessionMode::Panning { .. } => self.finish(capture),
        }
    }

    fn sample(&self, event: &PointerEvent) -> StrokePoint {
        event.to_stroke_point(self.viewport.screen_to_logical(event.position))
    }

    fn begin_draw(
        &mut self,
        next: SessionMode,
        event: &PointerEvent,
        tool: &mut dyn ToolHandler,
        document: &mut Document,
        capture: &mut dyn PointerCapture,
    ) -> Transition {
        acquire(event.pointer_id, capture);
        self.mode = next;

        let point = self.sample(event);
        self.pointer = Some(point.to_point());
        self.raw_path.clear();
        self.raw_path.push(point);

        let mut ctx = ToolContext::new(point, &self.raw_path, document.nodes());
        let result = tool.on_pointer_down(&mut ctx);
        let changes = ctx.into_changes();
        match result {
            Ok(()) => {
                document.apply(changes);
                Transition::Started
            }
            Err(err) => {
                log::warn!("Tool rejected pointer down: {err}");
                tool.on_pointer_cancel();
                self.finish(capture);
                Transition::Aborted(err)
            }
        }
    }

    fn extend(
        &mut self,
        event: &PointerEvent,
        tool: &mut dyn ToolHandler,
        document: &mut Document,
    ) -> Transition {
        let point = self.sample(event);
        if !point.is_finite() {
            log::debug!("Skipping non-finite sample");
            return Transition::Ignored;
        }
        self.pointer = Some(point.to_point());
        self.raw_path.push(point);

        let mut ctx = ToolContext::new(point, &self.raw_path, document.nodes());
        let result = tool.on_pointer_move(&mut ctx);
        let changes = ctx.into_changes();
        match result {
            Ok(()) => document.apply(changes),
            Err(err) => log::warn!("Tool failed on pointer move: {err}"),
        }
        Transition::Extended
    }

    fn commit(
        &mut self,
        event: &PointerEvent,
        tool: &mut dyn ToolHandler,
        document: &mut Document,
    ) -> Transition {
        let raw = std::mem::take(&mut self.raw_path);
        let point = match (self.sample(event), raw.last()) {
            (point, Some(last)) if !point.is_finite() => *last,
            (point, _) => point,
        };
        let tolerance = tool.simplify_tolerance(self.config.simplify_epsilon);
        let path = simplify_stroke(&raw, tolerance);

        let mut ctx = ToolContext::new(point, &path, document.nodes());
        let result = tool.on_pointer_up(&mut ctx);
        let changes = ctx.into_changes();
        match result {
            Ok(()) => {
                document.apply(changes);
                Transition::Committed
            }
            Err(err) => {
                log::warn!("Tool failed on pointer up: {err}");
                tool.on_pointer_cancel();
                Transition::Aborted(err)
            }
        }
    }

    /// Return to idle and release the active pointer.
    fn finish(&mut self, capture: &mut dyn PointerCapture) {
        if let Some(pointer_id) = self.mode.active_pointer() {
            release(pointer_id, capture);
        }
        self.mode = SessionMode::Idle;
        self.raw_path.clear();
    }
}

fn acquire(pointer_id: PointerId, capture: &mut dyn PointerCapture) {
    if let Err(err) = capture.set_capture(pointer_id) {
        log::debug!("Pointer capture failed: {err}");
    }
    capture.set_gestures_suppressed(true);
}

fn release(pointer_id: PointerId, capture: &mut dyn PointerCapture) {
    if let Err(err) = capture.release_capture(pointer_id) {
        log::debug!("Pointer release failed: {err}");
    }
    capture.set_gestures_suppressed(false);
}
