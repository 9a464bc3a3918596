//! Application context and main loop.
//!
//! [`UiContext`] owns everything a running toolkit needs: the widget tree, the
//! dispatcher, the visible root surface and its pick surface, and the text
//! provider. A frame is draw, then block on the input source, then dispatch.

use crate::color::{ChannelOrder, Rgba};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::event::Event;
use crate::geometry::Size;
use crate::placer::{self, PlaceRequest};
use crate::render::{BlockTextProvider, TextProvider};
use crate::surface::Surface;
use crate::widget::{ClassKind, WidgetId, WidgetTree};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Blocking source of input events, typically a windowing backend.
pub trait InputSource {
    /// Wait for the next event. `None` means the source is exhausted.
    fn wait_event(&mut self) -> Option<Event>;
}

/// Replays a fixed list of events, then reports exhaustion.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: std::collections::VecDeque<Event>,
}

impl ScriptedInput {
    /// Create a source that yields `events` in order.
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Events not yet delivered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputSource for ScriptedInput {
    fn wait_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }
}

/// Shared flag asking the main loop to stop after the current event.
///
/// Clones share the flag, so callbacks can capture one.
#[derive(Debug, Clone, Default)]
pub struct QuitHandle(Rc<Cell<bool>>);

impl QuitHandle {
    /// Ask the loop to stop.
    pub fn request(&self) {
        self.0.set(true);
    }

    /// True once a stop was requested.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.get()
    }
}

/// Everything a toolkit instance owns.
pub struct UiContext {
    tree: WidgetTree,
    dispatcher: Dispatcher,
    surface: Surface,
    pick_surface: Surface,
    text: Box<dyn TextProvider>,
    quit: QuitHandle,
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("tree", &self.tree)
            .field("dispatcher", &self.dispatcher)
            .field("size", &self.surface.size())
            .field("quit", &self.quit.is_requested())
            .finish_non_exhaustive()
    }
}

impl UiContext {
    /// Create a context with a `width` x `height` root surface.
    ///
    /// Text is measured and rendered by [`BlockTextProvider`] until
    /// [`UiContext::with_text_provider`] installs another one.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(width: u32, height: u32, config: Config) -> Result<Self> {
        let surface = Surface::new(width, height)?;
        let pick_surface = Surface::with_format(width, height, ChannelOrder::RGBA, false)?;
        let root_size = Size::new(width as i32, height as i32);
        log::debug!("ui context {width}x{height}");
        Ok(Self {
            dispatcher: Dispatcher::new(config.close_shortcut),
            tree: WidgetTree::new(root_size, config),
            surface,
            pick_surface,
            text: Box::new(BlockTextProvider),
            quit: QuitHandle::default(),
        })
    }

    /// Replace the text provider.
    #[must_use]
    pub fn with_text_provider(mut self, text: Box<dyn TextProvider>) -> Self {
        self.text = text;
        self
    }

    /// The widget tree.
    #[must_use]
    pub const fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// Mutable widget tree, for configuration.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Mutable dispatcher, for the default handler.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// The visible root surface.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The pick surface painted alongside the visible one.
    #[must_use]
    pub const fn pick_surface(&self) -> &Surface {
        &self.pick_surface
    }

    /// Handle for stopping [`UiContext::run`].
    #[must_use]
    pub fn quit_handle(&self) -> QuitHandle {
        self.quit.clone()
    }

    /// The root frame.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        self.tree.root()
    }

    /// Create an unplaced widget.
    pub fn create(&mut self, kind: ClassKind, parent: WidgetId) -> Option<WidgetId> {
        self.tree.create(kind, parent)
    }

    /// Create an unplaced widget by class name.
    pub fn create_by_name(&mut self, class_name: &str, parent: WidgetId) -> Option<WidgetId> {
        self.tree.create_by_name(class_name, parent)
    }

    /// Place a widget; see [`placer::place`].
    pub fn place(&mut self, id: WidgetId, request: &PlaceRequest) {
        placer::place(&mut self.tree, id, request);
    }

    /// Stop placing a widget; see [`placer::forget`].
    pub fn forget(&mut self, id: WidgetId) {
        placer::forget(&mut self.tree, id);
    }

    /// Destroy a widget and its descendants.
    ///
    /// A capture held by any of them is released right away.
    pub fn destroy(&mut self, id: WidgetId) -> bool {
        let destroyed = self.tree.destroy(id);
        self.dispatcher.drop_stale_capture(&self.tree);
        destroyed
    }

    /// Repaint the visible and pick surfaces from scratch.
    pub fn draw(&mut self) {
        self.surface.clear(Rgba::BLACK);
        self.pick_surface.clear(Rgba::BLACK);
        self.tree
            .draw(&mut self.surface, &mut self.pick_surface, self.text.as_ref());
    }

    /// Route one event using the pick surface of the last [`UiContext::draw`].
    pub fn dispatch(&mut self, event: &Event) -> bool {
        self.dispatcher
            .dispatch(&mut self.tree, &self.pick_surface, event)
    }

    /// Draw, wait for input and dispatch until the source is exhausted or a quit
    /// is requested. The surfaces hold the final frame on return.
    pub fn run(&mut self, input: &mut dyn InputSource) {
        let mut frames = 0_u64;
        loop {
            self.draw();
            if self.quit.is_requested() {
                break;
            }
            let Some(event) = input.wait_event() else {
                break;
            };
            self.dispatch(&event);
            frames += 1;
        }
        log::debug!("main loop stopped after {frames} events");
    }
}
