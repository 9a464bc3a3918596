//! The button class: a rounded, raised frame that reports clicks.

use super::frame::{draw_content, draw_relief_box};
use super::{DrawContext, FrameConfig, FrameState, Relief, Widget, WidgetId, WidgetTree};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::event::Event;
use crate::render::draw_polygon;
use crate::render::shapes::{rounded_frame, FramePart};
use crate::surface::Surface;
use std::fmt;

/// Click callback: receives the tree, the button and the release event.
///
/// The return value reports whether the callback acted on the click.
pub type ButtonCallback = Box<dyn FnMut(&mut WidgetTree, WidgetId, &Event) -> bool>;

/// State of a button widget.
pub struct ButtonState {
    /// Appearance shared with frames.
    pub frame: FrameState,
    /// Corner radius in pixels.
    pub corner_radius: i32,
    pub(crate) callback: Option<ButtonCallback>,
}

impl fmt::Debug for ButtonState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonState")
            .field("frame", &self.frame)
            .field("corner_radius", &self.corner_radius)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

impl ButtonState {
    pub(crate) fn defaults(config: &Config) -> Self {
        let mut frame = FrameState::defaults(config);
        frame.color = config.colors.button;
        frame.border_width = config.button.border_width;
        frame.relief = Relief::Raised;
        Self {
            frame,
            corner_radius: config.button.corner_radius,
            callback: None,
        }
    }

    pub(crate) fn apply(&mut self, config: ButtonConfig) {
        self.frame.apply(config.frame);
        if let Some(radius) = config.corner_radius {
            self.corner_radius = radius.max(0);
        }
        if let Some(callback) = config.callback {
            self.callback = Some(callback);
        }
    }

    /// True when a click callback is installed.
    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

/// Button attributes to change; `None` keeps the current value.
#[derive(Default)]
pub struct ButtonConfig {
    /// Frame attributes.
    pub frame: FrameConfig,
    /// Corner radius.
    pub corner_radius: Option<i32>,
    /// Click callback.
    pub callback: Option<ButtonCallback>,
}

impl fmt::Debug for ButtonConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonConfig")
            .field("frame", &self.frame)
            .field("corner_radius", &self.corner_radius)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

pub(super) fn draw(
    widget: &Widget,
    state: &ButtonState,
    surface: &mut Surface,
    pick_surface: &mut Surface,
    ctx: &DrawContext<'_>,
) {
    let rect = widget.screen_location();
    draw_relief_box(
        surface,
        &rect,
        state.corner_radius,
        &state.frame,
        ctx.config.relief.button_delta,
        ctx.clip,
    );
    draw_content(surface, &state.frame, &widget.content_rect(), ctx);
    draw_polygon(
        pick_surface,
        &rounded_frame(&rect, state.corner_radius, FramePart::Full),
        widget.pick_color(),
        ctx.clip,
    );
}

/// Press sinks the button and captures input; release raises it, releases the
/// capture and fires the callback when the pointer is still over the button.
///
/// A release is only handled by the button that holds the capture.
pub(super) fn handle(
    tree: &mut WidgetTree,
    dispatcher: &mut Dispatcher,
    id: WidgetId,
    event: &Event,
) -> bool {
    if event.is_left_press() {
        if let Some(state) = tree.button_mut(id) {
            state.frame.relief = Relief::Sunken;
        }
        dispatcher.capture(id);
        return true;
    }

    if event.is_left_release() {
        if dispatcher.active() != Some(id) {
            return false;
        }
        if let Some(state) = tree.button_mut(id) {
            state.frame.relief = Relief::Raised;
        }
        dispatcher.release(id);

        let over = match (event.pointer(), tree.get(id)) {
            (Some(at), Some(widget)) => widget.screen_location().contains(at),
            _ => false,
        };
        if over {
            invoke_callback(tree, id, event);
        }
        return true;
    }

    false
}

fn invoke_callback(tree: &mut WidgetTree, id: WidgetId, event: &Event) {
    let Some(mut callback) = tree.button_mut(id).and_then(|state| state.callback.take()) else {
        return;
    };
    let acted = callback(tree, id, event);
    log::trace!("button {id:?} callback returned {acted}");

    // The callback may have destroyed the button or installed a new callback.
    if let Some(state) = tree.button_mut(id) {
        if state.callback.is_none() {
            state.callback = Some(callback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseButton;
    use crate::geometry::{Point, Size};
    use crate::placer::{self, PlaceRequest};
    use crate::widget::ClassKind;
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() -> (WidgetTree, Dispatcher, WidgetId) {
        let config = Config::default();
        let mut tree = WidgetTree::new(Size::new(200, 200), config.clone());
        let root = tree.root();
        let button = tree.create(ClassKind::Button, root).unwrap();
        placer::place(&mut tree, button, &PlaceRequest::new().position(10, 10));
        (tree, Dispatcher::new(config.close_shortcut), button)
    }

    fn press(x: i32, y: i32) -> Event {
        Event::MouseDown {
            button: MouseButton::Left,
            at: Point::new(x, y),
        }
    }

    fn release(x: i32, y: i32) -> Event {
        Event::MouseUp {
            button: MouseButton::Left,
            at: Point::new(x, y),
        }
    }

    #[test]
    fn test_defaults() {
        let (tree, _, button) = setup();
        let state = tree.button(button).unwrap();
        assert_eq!(state.frame.relief, Relief::Raised);
        assert_eq!(state.frame.border_width, 4);
        assert_eq!(state.corner_radius, 10);
        assert!(!state.has_callback());
    }

    #[test]
    fn test_press_sinks_and_captures() {
        let (mut tree, mut dispatcher, button) = setup();
        assert!(handle(&mut tree, &mut dispatcher, button, &press(20, 20)));
        assert_eq!(tree.button(button).unwrap().frame.relief, Relief::Sunken);
        assert_eq!(dispatcher.active(), Some(button));
    }

    #[test]
    fn test_release_over_button_fires_callback() {
        let (mut tree, mut dispatcher, button) = setup();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        tree.set_button_callback(
            button,
            Box::new(move |_, _, _| {
                counter.set(counter.get() + 1);
                true
            }),
        );

        handle(&mut tree, &mut dispatcher, button, &press(20, 20));
        assert!(handle(&mut tree, &mut dispatcher, button, &release(25, 25)));
        assert_eq!(clicks.get(), 1);
        assert_eq!(dispatcher.active(), None);
        assert_eq!(tree.button(button).unwrap().frame.relief, Relief::Raised);
        assert!(tree.button(button).unwrap().has_callback());

        handle(&mut tree, &mut dispatcher, button, &press(20, 20));
        handle(&mut tree, &mut dispatcher, button, &release(150, 150));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let (mut tree, mut dispatcher, button) = setup();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);
        tree.set_button_callback(
            button,
            Box::new(move |_, _, _| {
                counter.set(counter.get() + 1);
                true
            }),
        );

        assert!(!handle(&mut tree, &mut dispatcher, button, &release(20, 20)));
        assert_eq!(clicks.get(), 0);
        assert_eq!(tree.button(button).unwrap().frame.relief, Relief::Raised);
    }

    #[test]
    fn test_callback_may_destroy_its_button() {
        let (mut tree, mut dispatcher, button) = setup();
        tree.set_button_callback(button, Box::new(|tree, id, _| tree.destroy(id)));
        handle(&mut tree, &mut dispatcher, button, &press(20, 20));
        handle(&mut tree, &mut dispatcher, button, &release(20, 20));
        assert!(!tree.contains(button));
    }

    #[test]
    fn test_other_buttons_ignored() {
        let (mut tree, mut dispatcher, button) = setup();
        let right = Event::MouseDown {
            button: MouseButton::Right,
            at: Point::new(20, 20),
        };
        assert!(!handle(&mut tree, &mut dispatcher, button, &right));
        assert_eq!(dispatcher.active(), None);
    }
}
