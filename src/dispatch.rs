//! Pick-buffer event dispatch.
//!
//! Every frame the widget tree paints each placed widget into the pick surface in
//! its flat pick color, back to front, exactly like the visible pass. Routing a
//! pointer event is then a single pixel read plus a lookup of the widget owning
//! that color.
//!
//! Routing order for pointer events:
//!
//! 1. A capturing (active) widget receives everything until it releases.
//! 2. Otherwise the widget under the pointer receives it. A press first raises
//!    every toplevel between that widget and the root to the front.
//! 3. Events nobody handled go to the default handler, if one is registered.
//!
//! Key events go to the active widget, then to the global close shortcut.

use crate::event::{Event, Shortcut};
use crate::geometry::Point;
use crate::surface::Surface;
use crate::widget::{self, ClassKind, WidgetId, WidgetTree};
use std::fmt;

/// Fallback for events no widget handled. Its result is informational only.
pub type DefaultHandler = Box<dyn FnMut(&Event) -> bool>;

/// Routes input events to widgets.
pub struct Dispatcher {
    active: Option<WidgetId>,
    previous_pointer: Point,
    default_handler: Option<DefaultHandler>,
    close_shortcut: Shortcut,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("active", &self.active)
            .field("previous_pointer", &self.previous_pointer)
            .field("default_handler", &self.default_handler.is_some())
            .field("close_shortcut", &self.close_shortcut)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher that closes the frontmost toplevel on `close_shortcut`.
    #[must_use]
    pub fn new(close_shortcut: Shortcut) -> Self {
        Self {
            active: None,
            previous_pointer: Point::ORIGIN,
            default_handler: None,
            close_shortcut,
        }
    }

    /// Widget currently capturing input.
    #[must_use]
    pub const fn active(&self) -> Option<WidgetId> {
        self.active
    }

    /// Route all following input to `id` until it releases.
    pub fn capture(&mut self, id: WidgetId) {
        if self.active != Some(id) {
            log::debug!("dispatch: {id:?} captures input");
        }
        self.active = Some(id);
    }

    /// End the capture held by `id`. Captures held by other widgets are kept.
    pub fn release(&mut self, id: WidgetId) {
        if self.active == Some(id) {
            log::debug!("dispatch: {id:?} releases input");
            self.active = None;
        }
    }

    /// Pointer position of the previous pointer event, for drag deltas.
    #[must_use]
    pub const fn previous_pointer(&self) -> Point {
        self.previous_pointer
    }

    /// Override the remembered pointer position.
    pub fn set_previous_pointer(&mut self, at: Point) {
        self.previous_pointer = at;
    }

    /// Install the handler for events no widget handled.
    pub fn set_default_handler(&mut self, handler: DefaultHandler) {
        self.default_handler = Some(handler);
    }

    /// Remove the default handler.
    pub fn clear_default_handler(&mut self) {
        self.default_handler = None;
    }

    /// Shortcut closing the frontmost toplevel.
    #[must_use]
    pub const fn close_shortcut(&self) -> Shortcut {
        self.close_shortcut
    }

    /// Route any event. Returns whether a widget handled it.
    pub fn dispatch(&mut self, tree: &mut WidgetTree, pick_surface: &Surface, event: &Event) -> bool {
        if event.pointer().is_some() {
            self.dispatch_pointer(tree, pick_surface, event)
        } else {
            self.dispatch_key(tree, event)
        }
    }

    /// Route a mouse event through capture, then the pick surface.
    pub fn dispatch_pointer(
        &mut self,
        tree: &mut WidgetTree,
        pick_surface: &Surface,
        event: &Event,
    ) -> bool {
        let Some(at) = event.pointer() else {
            return self.unhandled(event);
        };
        self.drop_stale_capture(tree);

        let handled = if let Some(active) = self.active {
            widget::handle(tree, self, active, event)
        } else if let Some(target) = hit_test(tree, pick_surface, at) {
            if matches!(event, Event::MouseDown { .. }) {
                raise_to_front(tree, target);
            }
            widget::handle(tree, self, target, event)
        } else {
            false
        };

        self.previous_pointer = at;
        self.drop_stale_capture(tree);
        if handled {
            true
        } else {
            self.unhandled(event)
        }
    }

    /// Route a keyboard event to the active widget, then to global shortcuts.
    pub fn dispatch_key(&mut self, tree: &mut WidgetTree, event: &Event) -> bool {
        self.drop_stale_capture(tree);

        let handled = match (self.active, *event) {
            (Some(active), _) => widget::handle(tree, self, active, event),
            (None, Event::KeyDown { key, modifiers }) if self.close_shortcut.matches(key, modifiers) => {
                close_frontmost_toplevel(tree)
            }
            _ => false,
        };

        self.drop_stale_capture(tree);
        if handled {
            true
        } else {
            self.unhandled(event)
        }
    }

    fn unhandled(&mut self, event: &Event) -> bool {
        if let Some(handler) = self.default_handler.as_mut() {
            let consumed = handler(event);
            log::trace!("dispatch: default handler returned {consumed} for {event:?}");
        }
        false
    }

    /// Forget the capture if the capturing widget no longer exists.
    pub(crate) fn drop_stale_capture(&mut self, tree: &WidgetTree) {
        if let Some(active) = self.active {
            if !tree.contains(active) {
                log::debug!("dispatch: capturing widget {active:?} is gone");
                self.active = None;
            }
        }
    }
}

/// Placed widget whose pick color sits under `at`, first match in pre-order.
#[must_use]
pub fn hit_test(tree: &WidgetTree, pick_surface: &Surface, at: Point) -> Option<WidgetId> {
    if at.x < 0 || at.y < 0 {
        return None;
    }
    let color = pick_surface.get_pixel(at.x as u32, at.y as u32)?.with_alpha(255);
    tree.placed_pre_order()
        .into_iter()
        .find(|&id| tree.get(id).is_some_and(|w| w.pick_color() == color))
}

/// Raise every toplevel on the path from `id` to the root.
pub fn raise_to_front(tree: &mut WidgetTree, id: WidgetId) {
    let mut current = Some(id);
    while let Some(widget) = current {
        if tree.kind(widget) == Some(ClassKind::Toplevel) {
            log::debug!("dispatch: raising {widget:?}");
            tree.raise(widget);
        }
        current = tree.parent(widget);
    }
}

/// Destroy the placed toplevel with the highest pick id.
fn close_frontmost_toplevel(tree: &mut WidgetTree) -> bool {
    let frontmost = tree
        .placed_pre_order()
        .into_iter()
        .filter(|&id| tree.kind(id) == Some(ClassKind::Toplevel))
        .max_by_key(|&id| tree.get(id).map_or(0, widget::Widget::pick_id));
    match frontmost {
        Some(id) => {
            log::debug!("dispatch: close shortcut destroys {id:?}");
            tree.destroy(id)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::event::{Key, Modifiers, MouseButton};
    use crate::geometry::Size;
    use crate::placer::{self, PlaceRequest};
    use crate::render::BlockTextProvider;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Scene {
        tree: WidgetTree,
        dispatcher: Dispatcher,
        surface: Surface,
        pick: Surface,
    }

    impl Scene {
        fn new() -> Self {
            let config = Config::default();
            Self {
                dispatcher: Dispatcher::new(config.close_shortcut),
                tree: WidgetTree::new(Size::new(400, 300), config),
                surface: Surface::new(400, 300).unwrap(),
                pick: Surface::with_format(400, 300, crate::color::ChannelOrder::RGBA, false)
                    .unwrap(),
            }
        }

        fn add(&mut self, kind: ClassKind, parent: WidgetId, request: &PlaceRequest) -> WidgetId {
            let id = self.tree.create(kind, parent).unwrap();
            placer::place(&mut self.tree, id, request);
            id
        }

        fn repaint(&mut self) {
            self.pick.clear(crate::color::Rgba::BLACK);
            self.tree.draw(&mut self.surface, &mut self.pick, &BlockTextProvider);
        }

        fn send(&mut self, event: Event) -> bool {
            self.repaint();
            self.dispatcher.dispatch(&mut self.tree, &self.pick, &event)
        }
    }

    fn down(x: i32, y: i32) -> Event {
        Event::MouseDown {
            button: MouseButton::Left,
            at: Point::new(x, y),
        }
    }

    fn up(x: i32, y: i32) -> Event {
        Event::MouseUp {
            button: MouseButton::Left,
            at: Point::new(x, y),
        }
    }

    #[test]
    fn test_hit_test_finds_topmost() {
        let mut scene = Scene::new();
        let root = scene.tree.root();
        let back = scene.add(ClassKind::Frame, root, &PlaceRequest::new().size(100, 100));
        let front = scene.add(
            ClassKind::Frame,
            root,
            &PlaceRequest::new().position(50, 50).size(100, 100),
        );
        scene.repaint();

        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(10, 10)), Some(back));
        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(75, 75)), Some(front));
        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(300, 200)), Some(root));
        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(-1, 5)), None);
        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(400, 5)), None);
    }

    #[test]
    fn test_capture_takes_precedence() {
        let mut scene = Scene::new();
        let root = scene.tree.root();
        let button = scene.add(ClassKind::Button, root, &PlaceRequest::new().position(10, 10));
        let other = scene.add(
            ClassKind::Button,
            root,
            &PlaceRequest::new().position(200, 10),
        );

        assert!(scene.send(down(20, 20)));
        assert_eq!(scene.dispatcher.active(), Some(button));

        // Released over another button: the capturing one still gets it.
        assert!(scene.send(up(210, 20)));
        assert_eq!(scene.dispatcher.active(), None);
        assert_eq!(
            scene.tree.button(other).unwrap().frame.relief,
            crate::widget::Relief::Raised
        );
    }

    #[test]
    fn test_press_raises_toplevel_ancestors() {
        let mut scene = Scene::new();
        let root = scene.tree.root();
        let first = scene.add(ClassKind::Toplevel, root, &PlaceRequest::new());
        let second = scene.add(ClassKind::Toplevel, root, &PlaceRequest::new().position(40, 20));
        let inner = scene.add(ClassKind::Frame, first, &PlaceRequest::new().size(20, 20));
        assert_eq!(scene.tree.children(root), &[first, second]);

        // `first` is mostly covered; its content corner at (4,24) stays visible.
        scene.send(down(10, 30));
        assert_eq!(scene.tree.children(root), &[second, first]);
        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(10, 30)), Some(inner));

        scene.repaint();
        assert_eq!(hit_test(&scene.tree, &scene.pick, Point::new(100, 100)), Some(first));
    }

    #[test]
    fn test_unhandled_goes_to_default_handler() {
        let mut scene = Scene::new();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        scene.dispatcher.set_default_handler(Box::new(move |_| {
            counter.set(counter.get() + 1);
            true
        }));

        assert!(!scene.send(down(5, 5)));
        assert!(!scene.send(Event::KeyDown {
            key: Key::Char('x'),
            modifiers: Modifiers::NONE,
        }));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_close_shortcut_destroys_newest_toplevel() {
        let mut scene = Scene::new();
        let root = scene.tree.root();
        let older = scene.add(ClassKind::Toplevel, root, &PlaceRequest::new());
        let newer = scene.add(ClassKind::Toplevel, root, &PlaceRequest::new().position(30, 30));
        scene.tree.raise(older);

        let close = Event::KeyDown {
            key: Key::Char('w'),
            modifiers: Modifiers::CTRL,
        };
        assert!(scene.send(close));
        assert!(!scene.tree.contains(newer));
        assert!(scene.send(close));
        assert!(!scene.tree.contains(older));
        assert!(!scene.send(close));
    }

    #[test]
    fn test_capture_dropped_when_widget_dies() {
        let mut scene = Scene::new();
        let root = scene.tree.root();
        let button = scene.add(ClassKind::Button, root, &PlaceRequest::new().position(10, 10));
        scene.send(down(20, 20));
        assert_eq!(scene.dispatcher.active(), Some(button));

        scene.tree.destroy(button);
        assert!(!scene.send(Event::MouseMove {
            at: Point::new(30, 30)
        }));
        assert_eq!(scene.dispatcher.active(), None);
    }

    #[test]
    fn test_title_drag_through_dispatcher() {
        let mut scene = Scene::new();
        let root = scene.tree.root();
        let top = scene.add(ClassKind::Toplevel, root, &PlaceRequest::new().position(10, 10));

        scene.send(Event::MouseMove {
            at: Point::new(100, 20),
        });
        assert!(scene.send(down(100, 20)));
        assert!(scene.send(Event::MouseMove {
            at: Point::new(120, 35)
        }));
        assert!(scene.send(up(120, 35)));
        assert_eq!(
            scene.tree.get(top).unwrap().screen_location().top_left,
            Point::new(30, 25)
        );
    }
}
