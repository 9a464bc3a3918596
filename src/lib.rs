//! # Pickframe
//!
//! Core of a minimal widget toolkit: a software rasterizer, the placer geometry
//! manager and a pick-buffer event dispatcher.
//!
//! Widgets live in an arena ([`widget::WidgetTree`]) rooted at a frame spanning the
//! root surface. Each frame, every placed widget is painted twice, back to front:
//! once onto the visible surface and once onto an offscreen pick surface in a flat
//! color encoding its pick id. The dispatcher samples the pick surface to find the
//! topmost widget under the pointer.
//!
//! ## Features
//!
//! - **Pure Rust rasterizer**: Bresenham polylines, scanline polygon filling with an
//!   active-edge table, surface-to-surface copies with optional alpha blending
//! - **Placer**: absolute and relative position and size, nine anchors, resize
//!   propagation to descendants
//! - **Dispatcher**: pick-surface hit testing, input capture, raise-to-front
//! - **Widget classes**: frame, button and toplevel window
//! - **Snapshots**: PNG output of the visible and pick surfaces
//!
//! ## Quick Start
//!
//! ```rust
//! use pickframe::prelude::*;
//!
//! let mut ui = UiContext::new(320, 240, Config::default()).unwrap();
//! let root = ui.root();
//! let button = ui.create(ClassKind::Button, root).unwrap();
//! ui.place(button, &PlaceRequest::new().rel_position(0.5, 0.5).anchor(Anchor::Center));
//! ui.draw();
//!
//! let at = Point::new(160, 120);
//! assert_eq!(hit_test(ui.tree(), ui.pick_surface(), at), Some(button));
//! ```
//!
//! ## Feature Flags
//!
//! - `snapshot`: the `pickframe-snapshot` binary (demo scene + scripted input to PNG)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in raster code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and channel layouts.
pub mod color;

/// Geometric primitives (points, sizes, rectangles).
pub mod geometry;

/// Pixel surfaces with lock guards.
pub mod surface;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rasterization: polylines, polygons, copies, text.
pub mod render;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Toolkit Modules
// ============================================================================

/// Input events.
pub mod event;

/// Widget arena and widget classes.
pub mod widget;

/// The placer geometry manager.
pub mod placer;

/// Pick-buffer event dispatch.
pub mod dispatch;

/// Application context and main loop.
pub mod app;

/// Toolkit configuration.
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for pickframe operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust
/// use pickframe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{InputSource, QuitHandle, ScriptedInput, UiContext};
    pub use crate::color::{ChannelOrder, Rgba};
    pub use crate::config::Config;
    pub use crate::dispatch::{hit_test, Dispatcher};
    pub use crate::error::{Error, Result};
    pub use crate::event::{Event, Key, Modifiers, MouseButton, Shortcut};
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::output::PngEncoder;
    pub use crate::placer::{Anchor, PlaceRequest};
    pub use crate::render::{
        copy_surface, draw_polygon, draw_polyline, draw_text, fill, map_color, BlockTextProvider,
        Font, TextProvider,
    };
    pub use crate::surface::Surface;
    pub use crate::widget::{
        Axes, ButtonConfig, ClassKind, FrameConfig, Relief, ToplevelConfig, WidgetId, WidgetTree,
    };
}

// ============================================================================
// Tests
// ============================================================================
