//! The frame class: a filled rectangle with optional relief, text or image.

use super::{DrawContext, Widget, WidgetId, WidgetTree};
use crate::color::Rgba;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::event::Event;
use crate::geometry::{Rect, Size};
use crate::placer::Anchor;
use crate::render::shapes::{rounded_frame, FramePart};
use crate::render::{copy_surface, draw_polygon, draw_text, Font};
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Border appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relief {
    /// Flat border in the fill color.
    #[default]
    None,
    /// Light upper-left half, dark lower-right half.
    Raised,
    /// Dark upper-left half, light lower-right half.
    Sunken,
}

/// Appearance shared by frames and buttons.
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Fill color.
    pub color: Rgba,
    /// Border width in pixels.
    pub border_width: i32,
    /// Border appearance.
    pub relief: Relief,
    /// Text drawn in the content area.
    pub text: Option<String>,
    /// Font of `text`.
    pub font: Font,
    /// Color of `text`.
    pub text_color: Rgba,
    /// Where `text` sits in the content area.
    pub text_anchor: Anchor,
    /// Image drawn in the content area.
    pub image: Option<Rc<Surface>>,
    /// Part of `image` to draw; the whole image when `None`.
    pub image_rect: Option<Rect>,
    /// Where the image sits in the content area.
    pub image_anchor: Anchor,
}

impl FrameState {
    pub(crate) fn defaults(config: &Config) -> Self {
        Self {
            color: config.colors.frame,
            border_width: 0,
            relief: Relief::None,
            text: None,
            font: config.font.clone(),
            text_color: config.colors.text,
            text_anchor: Anchor::Center,
            image: None,
            image_rect: None,
            image_anchor: Anchor::Center,
        }
    }

    pub(crate) fn apply(&mut self, config: FrameConfig) {
        if let Some(color) = config.color {
            self.color = color;
        }
        if let Some(border_width) = config.border_width {
            self.border_width = border_width.max(0);
        }
        if let Some(relief) = config.relief {
            self.relief = relief;
        }
        if let Some(text) = config.text {
            self.text = (!text.is_empty()).then_some(text);
        }
        if let Some(font) = config.font {
            self.font = font;
        }
        if let Some(text_color) = config.text_color {
            self.text_color = text_color;
        }
        if let Some(anchor) = config.text_anchor {
            self.text_anchor = anchor;
        }
        if let Some(image) = config.image {
            self.image = Some(image);
        }
        if let Some(image_rect) = config.image_rect {
            self.image_rect = Some(image_rect);
        }
        if let Some(anchor) = config.image_anchor {
            self.image_anchor = anchor;
        }
    }
}

/// Frame attributes to change; `None` keeps the current value.
///
/// Setting `text` to an empty string removes the text.
#[derive(Debug, Clone, Default)]
pub struct FrameConfig {
    /// Requested size, borders included.
    pub requested_size: Option<Size>,
    /// Fill color.
    pub color: Option<Rgba>,
    /// Border width.
    pub border_width: Option<i32>,
    /// Border appearance.
    pub relief: Option<Relief>,
    /// Text.
    pub text: Option<String>,
    /// Text font.
    pub font: Option<Font>,
    /// Text color.
    pub text_color: Option<Rgba>,
    /// Text anchor.
    pub text_anchor: Option<Anchor>,
    /// Image.
    pub image: Option<Rc<Surface>>,
    /// Sub-rectangle of the image.
    pub image_rect: Option<Rect>,
    /// Image anchor.
    pub image_anchor: Option<Anchor>,
}

pub(super) fn draw(
    widget: &Widget,
    state: &FrameState,
    surface: &mut Surface,
    pick_surface: &mut Surface,
    ctx: &DrawContext<'_>,
) {
    let rect = widget.screen_location();
    draw_relief_box(surface, &rect, 0, state, ctx.config.relief.frame_delta, ctx.clip);
    draw_content(surface, state, &widget.content_rect(), ctx);
    draw_polygon(
        pick_surface,
        &rounded_frame(&rect, 0, FramePart::Full),
        widget.pick_color(),
        ctx.clip,
    );
}

/// Fill `rect` with the state's color and paint its relief border.
pub(super) fn draw_relief_box(
    surface: &mut Surface,
    rect: &Rect,
    radius: i32,
    state: &FrameState,
    delta: u8,
    clip: Option<&Rect>,
) {
    let light = state.color.lighten(delta);
    let dark = state.color.darken(delta);
    let halves = match state.relief {
        Relief::None => None,
        Relief::Raised => Some((light, dark)),
        Relief::Sunken => Some((dark, light)),
    };

    match halves {
        Some((upper, lower)) if state.border_width > 0 => {
            draw_polygon(surface, &rounded_frame(rect, radius, FramePart::Top), upper, clip);
            draw_polygon(surface, &rounded_frame(rect, radius, FramePart::Bottom), lower, clip);
            let inner = rect.inset(state.border_width);
            if !inner.is_empty() {
                let inner_radius = (radius - state.border_width).max(0);
                draw_polygon(
                    surface,
                    &rounded_frame(&inner, inner_radius, FramePart::Full),
                    state.color,
                    clip,
                );
            }
        }
        _ => draw_polygon(surface, &rounded_frame(rect, radius, FramePart::Full), state.color, clip),
    }
}

/// Draw the state's text or image inside `content`.
pub(super) fn draw_content(
    surface: &mut Surface,
    state: &FrameState,
    content: &Rect,
    ctx: &DrawContext<'_>,
) {
    let area = match ctx.clip {
        Some(clip) => content.intersect(clip),
        None => Some(*content),
    };
    let Some(area) = area else {
        return;
    };

    if let Some(text) = &state.text {
        let size = ctx.text.text_size(text, &state.font);
        let at = state.text_anchor.align(content, size);
        draw_text(surface, at, text, &state.font, state.text_color, Some(&area), ctx.text);
    }

    if let Some(image) = &state.image {
        let whole = image.rect();
        let source = state
            .image_rect
            .map_or(Some(whole), |r| r.intersect(&whole));
        let Some(source) = source else {
            return;
        };
        let at = state.image_anchor.align(content, source.size);
        let placed = Rect::new(at, source.size);
        let Some(visible) = placed
            .intersect(&area)
            .and_then(|r| r.intersect(&surface.rect()))
        else {
            return;
        };
        let src_rect = Rect::new(source.top_left + (visible.top_left - at), visible.size);
        if let Err(e) = copy_surface(surface, Some(&visible), image, Some(&src_rect), true) {
            log::debug!("image blit skipped: {e}");
        }
    }
}

/// Frames ignore input.
pub(super) fn handle(
    _tree: &mut WidgetTree,
    _dispatcher: &mut Dispatcher,
    _id: WidgetId,
    _event: &Event,
) -> bool {
    false
}
