//! The placer geometry manager.
//!
//! A placed widget's rectangle is computed from its parent's content rectangle:
//!
//! ```text
//! size       = (width, height) + (rel_width, rel_height) * parent.content.size
//! anchor_ref = (x, y) + (rel_x, rel_y) * parent.content.size + parent.content.top_left
//! top_left   = anchor_ref shifted so that the widget's `anchor` point lands on it
//! ```
//!
//! [`place`] only overwrites the fields a [`PlaceRequest`] sets, so repeated calls
//! refine earlier ones. Defaults are anchor northwest, offsets 0 and relative
//! values 0.0. The first call also fixes width and height: the widget's requested
//! size on each axis without a relative size, else 0. Later changes to the
//! requested size do not move a placed widget's absolute size.

use crate::geometry::{Point, Rect, Size};
use crate::widget::{self, WidgetId, WidgetTree};
use serde::{Deserialize, Serialize};

/// Which point of a rectangle is pinned to a reference position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// No anchor requested; behaves like [`Anchor::NorthWest`].
    None,
    /// Middle of the rectangle.
    Center,
    /// Middle of the top edge.
    North,
    /// Top-right corner.
    NorthEast,
    /// Middle of the right edge.
    East,
    /// Bottom-right corner.
    SouthEast,
    /// Middle of the bottom edge.
    South,
    /// Bottom-left corner.
    SouthWest,
    /// Middle of the left edge.
    West,
    /// Top-left corner.
    #[default]
    NorthWest,
}

impl Anchor {
    /// Fractions of the width and height between the top-left corner and the
    /// anchor point, in halves.
    const fn halves(self) -> (i32, i32) {
        match self {
            Self::None | Self::NorthWest => (0, 0),
            Self::North => (1, 0),
            Self::NorthEast => (2, 0),
            Self::East => (2, 1),
            Self::SouthEast => (2, 2),
            Self::South => (1, 2),
            Self::SouthWest => (0, 2),
            Self::West => (0, 1),
            Self::Center => (1, 1),
        }
    }

    /// Top-left corner of a `size` rectangle whose anchor point sits on `reference`.
    ///
    /// ```
    /// use pickframe::geometry::{Point, Size};
    /// use pickframe::placer::Anchor;
    ///
    /// let top_left = Anchor::SouthEast.top_left(Point::new(95, 95), Size::new(20, 10));
    /// assert_eq!(top_left, Point::new(75, 85));
    /// ```
    #[must_use]
    pub const fn top_left(self, reference: Point, size: Size) -> Point {
        let (hx, hy) = self.halves();
        let dx = match hx {
            0 => 0,
            1 => size.width / 2,
            _ => size.width,
        };
        let dy = match hy {
            0 => 0,
            1 => size.height / 2,
            _ => size.height,
        };
        Point::new(reference.x - dx, reference.y - dy)
    }

    /// Position of a `size` item aligned inside `container` at this anchor.
    ///
    /// Used for text and images inside a widget.
    #[must_use]
    pub const fn align(self, container: &Rect, size: Size) -> Point {
        let (hx, hy) = self.halves();
        let free_x = container.size.width - size.width;
        let free_y = container.size.height - size.height;
        let x = match hx {
            0 => 0,
            1 => free_x / 2,
            _ => free_x,
        };
        let y = match hy {
            0 => 0,
            1 => free_y / 2,
            _ => free_y,
        };
        Point::new(container.top_left.x + x, container.top_left.y + y)
    }
}

/// Placement parameters a caller wants to set; `None` fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaceRequest {
    /// Anchor point.
    pub anchor: Option<Anchor>,
    /// Absolute x offset.
    pub x: Option<i32>,
    /// Absolute y offset.
    pub y: Option<i32>,
    /// Absolute width.
    pub width: Option<i32>,
    /// Absolute height.
    pub height: Option<i32>,
    /// X offset as a fraction of the parent content width.
    pub rel_x: Option<f32>,
    /// Y offset as a fraction of the parent content height.
    pub rel_y: Option<f32>,
    /// Width as a fraction of the parent content width.
    pub rel_width: Option<f32>,
    /// Height as a fraction of the parent content height.
    pub rel_height: Option<f32>,
}

impl PlaceRequest {
    /// An empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Set the absolute offset.
    #[must_use]
    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the absolute size.
    #[must_use]
    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the absolute width only.
    #[must_use]
    pub fn width(mut self, width: i32) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the absolute height only.
    #[must_use]
    pub fn height(mut self, height: i32) -> Self {
        self.height = Some(height);
        self
    }

    /// Set the relative offset.
    #[must_use]
    pub fn rel_position(mut self, rel_x: f32, rel_y: f32) -> Self {
        self.rel_x = Some(rel_x);
        self.rel_y = Some(rel_y);
        self
    }

    /// Set the relative size.
    #[must_use]
    pub fn rel_size(mut self, rel_width: f32, rel_height: f32) -> Self {
        self.rel_width = Some(rel_width);
        self.rel_height = Some(rel_height);
        self
    }
}

/// Placement state stored on a placed widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacerParams {
    anchor: Option<Anchor>,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<i32>,
    height: Option<i32>,
    rel_x: Option<f32>,
    rel_y: Option<f32>,
    rel_width: Option<f32>,
    rel_height: Option<f32>,
}

fn clamp_rel(value: Option<f32>) -> Option<f32> {
    value.map(|v| v.min(1.0))
}

impl PlacerParams {
    /// Parameters of a first placement: `request` with width and height fixed
    /// from `requested` where neither an absolute nor a relative size was given.
    #[must_use]
    pub fn initial(request: &PlaceRequest, requested: Size) -> Self {
        let mut params = Self::default();
        params.merge(request);
        params.width = Some(params.absolute_size(requested).width);
        params.height = Some(params.absolute_size(requested).height);
        params
    }

    /// Overwrite the fields set in `request`. Relative values above 1.0 become 1.0.
    pub fn merge(&mut self, request: &PlaceRequest) {
        self.anchor = request.anchor.or(self.anchor);
        self.x = request.x.or(self.x);
        self.y = request.y.or(self.y);
        self.width = request.width.or(self.width);
        self.height = request.height.or(self.height);
        self.rel_x = clamp_rel(request.rel_x).or(self.rel_x);
        self.rel_y = clamp_rel(request.rel_y).or(self.rel_y);
        self.rel_width = clamp_rel(request.rel_width).or(self.rel_width);
        self.rel_height = clamp_rel(request.rel_height).or(self.rel_height);
    }

    /// Effective anchor.
    #[must_use]
    pub fn anchor(&self) -> Anchor {
        self.anchor.unwrap_or_default()
    }

    /// Effective absolute offset.
    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.x.unwrap_or(0), self.y.unwrap_or(0))
    }

    /// Effective absolute size for a widget with the given requested size.
    #[must_use]
    pub fn absolute_size(&self, requested: Size) -> Size {
        let width = self
            .width
            .unwrap_or(if self.rel_width.is_some() { 0 } else { requested.width });
        let height = self
            .height
            .unwrap_or(if self.rel_height.is_some() { 0 } else { requested.height });
        Size::new(width, height)
    }

    /// Effective relative offset.
    #[must_use]
    pub fn rel_offset(&self) -> (f32, f32) {
        (self.rel_x.unwrap_or(0.0), self.rel_y.unwrap_or(0.0))
    }

    /// Effective relative size.
    #[must_use]
    pub fn rel_size(&self) -> (f32, f32) {
        (self.rel_width.unwrap_or(0.0), self.rel_height.unwrap_or(0.0))
    }

    /// Rectangle for a widget with `requested` size inside `parent_content`.
    #[must_use]
    pub fn resolve(&self, requested: Size, parent_content: &Rect) -> Rect {
        let parent = parent_content.size;
        let absolute = self.absolute_size(requested);
        let (rel_w, rel_h) = self.rel_size();
        let size = Size::new(
            absolute.width + scale(rel_w, parent.width),
            absolute.height + scale(rel_h, parent.height),
        );

        let (rel_x, rel_y) = self.rel_offset();
        let offset = self.offset();
        let reference = Point::new(
            offset.x + scale(rel_x, parent.width) + parent_content.left(),
            offset.y + scale(rel_y, parent.height) + parent_content.top(),
        );
        Rect::new(self.anchor().top_left(reference, size), size)
    }
}

#[inline]
fn scale(fraction: f32, length: i32) -> i32 {
    (fraction * length as f32) as i32
}

/// Configure a widget's placement and recompute its geometry.
///
/// The first call makes the widget placed and links it as its parent's frontmost
/// child. Unknown ids are ignored.
pub fn place(tree: &mut WidgetTree, id: WidgetId, request: &PlaceRequest) {
    let Some(widget) = tree.get_mut(id) else {
        return;
    };
    let newly_placed = widget.placer_params.is_none();
    if newly_placed {
        widget.placer_params = Some(PlacerParams::initial(request, widget.requested_size));
    } else if let Some(params) = widget.placer_params.as_mut() {
        params.merge(request);
    }

    if newly_placed {
        tree.link_to_parent(id);
    }
    run(tree, id);
}

/// Recompute the geometry of a placed widget and of all its placed descendants.
///
/// Descendants are visited in pre-order, so each sees its parent's new content
/// rectangle.
pub fn run(tree: &mut WidgetTree, id: WidgetId) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    let Some(params) = widget.placer_params else {
        return;
    };
    let parent_content = match widget.parent() {
        Some(parent) => match tree.get(parent) {
            Some(parent) => parent.content_rect(),
            None => return,
        },
        None => tree.root_bounds(),
    };

    let rect = params.resolve(widget.requested_size(), &parent_content);
    log::trace!("placer: {id:?} -> {rect:?}");
    widget::geometry_notify(tree, id, rect);

    for child in tree.children(id).to_vec() {
        run(tree, child);
    }
}

/// Stop managing a widget: unlink it from its parent and drop its parameters.
///
/// The widget stays alive and can be placed again later. The root cannot be
/// forgotten.
pub fn forget(tree: &mut WidgetTree, id: WidgetId) {
    if id == tree.root() {
        log::warn!("placer: the root widget cannot be forgotten");
        return;
    }
    tree.unlink_from_parent(id);
    if let Some(widget) = tree.get_mut(id) {
        widget.placer_params = None;
    }
}
