//! Scrawl Core Library
//!
//! Freehand drawing core: stroke capture and simplification, variable-width
//! outlines, and the pointer session that drives pluggable tools.

pub mod canvas;
pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod nodes;
pub mod outline;
pub mod render;
pub mod session;
pub mod simplify;
pub mod smooth;
pub mod tools;
pub mod viewport;

pub use canvas::Canvas;
pub use config::{ConfigError, DrawingConfig};
pub use document::{Document, NodeChange};
pub use geometry::{Bounds, StrokePoint};
pub use input::{MouseButton, PointerEvent, PointerPhase, PointerType};
pub use nodes::{Node, NodeId, SerializableColor};
pub use outline::{Outline, OutlineParams, build_outline};
pub use render::{RenderItem, StrokeGeometry};
pub use session::{CaptureError, PointerCapture, Session, SessionMode, Transition};
pub use simplify::simplify;
pub use smooth::smooth_path;
pub use tools::{Tool, ToolContext, ToolError, ToolHandler, ToolKind};
pub use viewport::{ViewBox, Viewport};
