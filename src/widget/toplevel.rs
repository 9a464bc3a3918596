//! The toplevel class: a decorated window that can be moved, resized and closed.
//!
//! Layout of a toplevel with border `b` and title bar height `t`:
//!
//! ```text
//! +--------------------------------+  ^
//! | (x) Title                      |  t
//! |  +--------------------------+  |  v
//! |  |         content          |  |
//! |  |                          |  |
//! |  +--------------------------+ #|  <- resize grip in the bottom-right corner
//! +--------------------------------+
//!  b                              b
//! ```

use super::{DrawContext, Widget, WidgetId, WidgetTree};
use crate::color::Rgba;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::event::Event;
use crate::geometry::{Point, Rect, Size};
use crate::placer::{self, PlaceRequest};
use crate::render::shapes::{rectangle_path, rounded_frame, FramePart};
use crate::render::{draw_polygon, draw_text};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// Color of the close control.
const CLOSE_COLOR: Rgba = Rgba::rgb(0xD0, 0x40, 0x40);

/// Gap between the close control and the title text.
const TITLE_GAP: i32 = 6;

/// Axes along which a toplevel may be resized by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axes {
    /// Fixed size.
    None,
    /// Width only.
    X,
    /// Height only.
    Y,
    /// Both dimensions.
    #[default]
    Both,
}

impl Axes {
    /// True when the width may change.
    #[must_use]
    pub const fn allows_x(self) -> bool {
        matches!(self, Self::X | Self::Both)
    }

    /// True when the height may change.
    #[must_use]
    pub const fn allows_y(self) -> bool {
        matches!(self, Self::Y | Self::Both)
    }
}

/// Drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Interaction {
    #[default]
    Idle,
    Moving,
    Resizing,
}

/// State of a toplevel widget.
#[derive(Debug, Clone)]
pub struct ToplevelState {
    /// Content background color.
    pub color: Rgba,
    /// Border width around the content.
    pub border_width: i32,
    /// Title bar text.
    pub title: String,
    /// Whether the close control is shown and active.
    pub closable: bool,
    /// Axes the user may resize.
    pub resizable: Axes,
    /// Smallest content size reachable by interactive resizing.
    pub min_size: Size,
    title_bar: Rect,
    close_rect: Rect,
    grip_rect: Rect,
    interaction: Interaction,
}

impl ToplevelState {
    pub(crate) fn defaults(config: &Config) -> Self {
        Self {
            color: config.colors.toplevel,
            border_width: config.toplevel.border_width,
            title: "Toplevel".to_string(),
            closable: true,
            resizable: Axes::Both,
            min_size: config.toplevel.min_size,
            title_bar: Rect::default(),
            close_rect: Rect::default(),
            grip_rect: Rect::default(),
            interaction: Interaction::Idle,
        }
    }

    pub(crate) fn apply(&mut self, config: ToplevelConfig) {
        if let Some(color) = config.color {
            self.color = color;
        }
        if let Some(border_width) = config.border_width {
            self.border_width = border_width.max(0);
        }
        if let Some(title) = config.title {
            self.title = title;
        }
        if let Some(closable) = config.closable {
            self.closable = closable;
        }
        if let Some(resizable) = config.resizable {
            self.resizable = resizable;
        }
        if let Some(min_size) = config.min_size {
            self.min_size = min_size;
        }
    }

    fn title_height(&self, config: &Config) -> i32 {
        config.toplevel.title_height.max(self.border_width)
    }

    /// Outer size of a window whose content is `content`.
    #[must_use]
    pub fn outer_size(&self, content: Size, config: &Config) -> Size {
        Size::new(
            content.width + 2 * self.border_width,
            content.height + self.title_height(config) + self.border_width,
        )
    }

    /// Title bar rectangle, in root coordinates.
    #[must_use]
    pub const fn title_bar(&self) -> Rect {
        self.title_bar
    }

    /// Close control rectangle, in root coordinates.
    #[must_use]
    pub const fn close_rect(&self) -> Rect {
        self.close_rect
    }

    /// Resize grip rectangle, in root coordinates.
    #[must_use]
    pub const fn grip_rect(&self) -> Rect {
        self.grip_rect
    }

    /// Lay out the decorations for a window at `rect` and return its content rectangle.
    ///
    /// Decorations are capped to the space `rect` offers, so the content always lies
    /// inside it, possibly empty.
    pub(crate) fn layout(&mut self, rect: Rect, config: &Config) -> Rect {
        let b = self.border_width.min(rect.size.width / 2).max(0);
        let t = self.title_height(config).min(rect.size.height).max(0);
        let close = config.toplevel.close_size.min(t);
        let grip = config.toplevel.grip_size;

        self.title_bar = Rect::from_xywh(rect.left(), rect.top(), rect.size.width, t);
        self.close_rect = Rect::from_xywh(
            rect.left() + b + (t - close) / 2,
            rect.top() + (t - close) / 2,
            close,
            close,
        );
        self.grip_rect = Rect::from_xywh(rect.right() - grip, rect.bottom() - grip, grip, grip);

        Rect::from_xywh(
            rect.left() + b,
            rect.top() + t,
            (rect.size.width - 2 * b).max(0),
            (rect.size.height - t - b).max(0),
        )
    }
}

/// Toplevel attributes to change; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ToplevelConfig {
    /// Requested content size, decorations excluded.
    pub requested_size: Option<Size>,
    /// Content background color.
    pub color: Option<Rgba>,
    /// Border width.
    pub border_width: Option<i32>,
    /// Title.
    pub title: Option<String>,
    /// Whether the window can be closed.
    pub closable: Option<bool>,
    /// Resizable axes.
    pub resizable: Option<Axes>,
    /// Minimum content size.
    pub min_size: Option<Size>,
}

pub(super) fn draw(
    widget: &Widget,
    state: &ToplevelState,
    surface: &mut Surface,
    pick_surface: &mut Surface,
    ctx: &DrawContext<'_>,
) {
    let rect = widget.screen_location();
    let content = widget.content_rect();
    let decoration = state.color.darken(ctx.config.relief.frame_delta);

    draw_polygon(surface, &rectangle_path(&rect), decoration, ctx.clip);
    if !content.is_empty() {
        draw_polygon(surface, &rectangle_path(&content), state.color, ctx.clip);
    }

    let mut title_x = state.title_bar.left() + state.border_width;
    if state.closable {
        let close = state.close_rect;
        let radius = close.size.width / 2;
        draw_polygon(surface, &rounded_frame(&close, radius, FramePart::Full), CLOSE_COLOR, ctx.clip);
        title_x = close.right() + TITLE_GAP;
    }

    let font = &ctx.config.font;
    let title_size = ctx.text.text_size(&state.title, font);
    let title_at = Point::new(
        title_x,
        state.title_bar.top() + (state.title_bar.size.height - title_size.height) / 2,
    );
    let title_clip = match ctx.clip {
        Some(clip) => state.title_bar.intersect(clip),
        None => Some(state.title_bar),
    };
    if let Some(title_clip) = title_clip {
        draw_text(
            surface,
            title_at,
            &state.title,
            font,
            ctx.config.colors.text,
            Some(&title_clip),
            ctx.text,
        );
    }

    if state.resizable != Axes::None {
        draw_polygon(
            surface,
            &rectangle_path(&state.grip_rect),
            decoration.darken(ctx.config.relief.frame_delta),
            ctx.clip,
        );
    }

    draw_polygon(pick_surface, &rectangle_path(&rect), widget.pick_color(), ctx.clip);
}

/// Left press on the close control destroys the window, on the grip starts a
/// resize, on the title bar starts a move. Pointer motion while captured drives
/// the drag; left release ends it.
pub(super) fn handle(
    tree: &mut WidgetTree,
    dispatcher: &mut Dispatcher,
    id: WidgetId,
    event: &Event,
) -> bool {
    let Some(state) = tree.toplevel(id) else {
        return false;
    };

    match *event {
        Event::MouseDown { at, .. } if event.is_left_press() => {
            if state.closable && state.close_rect.contains(at) {
                dispatcher.release(id);
                tree.destroy(id);
                return true;
            }
            let interaction = if state.resizable != Axes::None && state.grip_rect.contains(at) {
                Interaction::Resizing
            } else if state.title_bar.contains(at) {
                Interaction::Moving
            } else {
                return false;
            };
            if let Some(state) = tree.toplevel_mut(id) {
                state.interaction = interaction;
            }
            dispatcher.capture(id);
            true
        }
        Event::MouseUp { .. } if event.is_left_release() => {
            if state.interaction == Interaction::Idle {
                return false;
            }
            if let Some(state) = tree.toplevel_mut(id) {
                state.interaction = Interaction::Idle;
            }
            dispatcher.release(id);
            true
        }
        Event::MouseMove { at } if dispatcher.active() == Some(id) => {
            let interaction = state.interaction;
            match interaction {
                Interaction::Moving => move_by(tree, id, at - dispatcher.previous_pointer()),
                Interaction::Resizing => resize_to(tree, id, at),
                Interaction::Idle => return false,
            }
            true
        }
        _ => false,
    }
}

/// Shift the window by `delta` if it stays inside the root.
fn move_by(tree: &mut WidgetTree, id: WidgetId, delta: Point) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    let Some(params) = widget.placer_params() else {
        return;
    };
    let moved = Rect::new(widget.screen_location().top_left + delta, widget.screen_location().size);
    if !tree.root_bounds().contains_rect(&moved) {
        return;
    }
    let offset = params.offset();
    placer::place(
        tree,
        id,
        &PlaceRequest::new().position(offset.x + delta.x, offset.y + delta.y),
    );
}

/// Move the bottom-right corner to `at` on the allowed axes, honoring the
/// minimum content size.
fn resize_to(tree: &mut WidgetTree, id: WidgetId, at: Point) {
    let config = tree.config().clone();
    let (Some(widget), Some(state)) = (tree.get(id), tree.toplevel(id)) else {
        return;
    };
    let Some(params) = widget.placer_params() else {
        return;
    };
    let current = widget.screen_location();
    let absolute = params.absolute_size(widget.requested_size());
    let min_outer = state.outer_size(state.min_size, &config);

    let mut request = PlaceRequest::new();
    let new_width = at.x - current.left();
    if state.resizable.allows_x() && new_width >= min_outer.width {
        request.width = Some(absolute.width + new_width - current.size.width);
    }
    let new_height = at.y - current.top();
    if state.resizable.allows_y() && new_height >= min_outer.height {
        request.height = Some(absolute.height + new_height - current.size.height);
    }
    if request.width.is_some() || request.height.is_some() {
        placer::place(tree, id, &request);
    }
}
