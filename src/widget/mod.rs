//! Widget tree: an arena of widgets addressed by generational ids.
//!
//! Each widget holds a non-owning parent id and an ordered list of placed
//! children; the last child is drawn last and therefore frontmost. Widgets start
//! unplaced and only enter their parent's child list when the placer manages
//! them (see [`crate::placer`]).
//!
//! Every widget belongs to one of three classes ([`ClassKind`]). A class supplies
//! defaults, configuration, drawing, geometry notification and event handling;
//! the functions in this module route each of those to the right class.

mod button;
mod frame;
mod toplevel;

pub use button::{ButtonCallback, ButtonConfig, ButtonState};
pub use frame::{FrameConfig, FrameState, Relief};
pub use toplevel::{Axes, ToplevelConfig, ToplevelState};

use crate::color::{Rgba, MAX_PICK_ID};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::event::Event;
use crate::geometry::{Rect, Size};
use crate::placer::{self, PlaceRequest, PlacerParams};
use crate::render::TextProvider;
use crate::surface::Surface;
use std::fmt;

/// Handle to a widget in a [`WidgetTree`].
///
/// Ids of destroyed widgets never match a later widget, even when the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId {
    index: u32,
    generation: u32,
}

/// The widget classes known to the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Rectangle with optional relief border, text or image.
    Frame,
    /// Clickable frame with rounded corners and a callback.
    Button,
    /// Movable, resizable, closable window with a title bar.
    Toplevel,
}

impl ClassKind {
    /// All registered classes.
    pub const ALL: [Self; 3] = [Self::Frame, Self::Button, Self::Toplevel];

    /// Registry name of the class.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Button => "button",
            Self::Toplevel => "toplevel",
        }
    }

    /// Look a class up by its registry name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

/// Class-specific state of a widget.
#[derive(Debug)]
pub enum ClassState {
    /// Frame state.
    Frame(FrameState),
    /// Button state.
    Button(ButtonState),
    /// Toplevel state.
    Toplevel(ToplevelState),
}

impl ClassState {
    fn defaults(kind: ClassKind, config: &Config) -> Self {
        match kind {
            ClassKind::Frame => Self::Frame(FrameState::defaults(config)),
            ClassKind::Button => Self::Button(ButtonState::defaults(config)),
            ClassKind::Toplevel => Self::Toplevel(ToplevelState::defaults(config)),
        }
    }

    /// The class of this state.
    #[must_use]
    pub const fn kind(&self) -> ClassKind {
        match self {
            Self::Frame(_) => ClassKind::Frame,
            Self::Button(_) => ClassKind::Button,
            Self::Toplevel(_) => ClassKind::Toplevel,
        }
    }
}

/// Called with the widget's id right before the widget is freed.
pub type Destructor = Box<dyn FnMut(WidgetId)>;

/// A node of the widget tree.
pub struct Widget {
    class: ClassState,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    pick_id: u32,
    pick_color: Rgba,
    pub(crate) requested_size: Size,
    screen_location: Rect,
    content_rect: Rect,
    pub(crate) placer_params: Option<PlacerParams>,
    destructor: Option<Destructor>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("class", &self.class.kind())
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("pick_id", &self.pick_id)
            .field("screen_location", &self.screen_location)
            .field("content_rect", &self.content_rect)
            .field("placed", &self.placer_params.is_some())
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Class of the widget.
    #[must_use]
    pub const fn kind(&self) -> ClassKind {
        self.class.kind()
    }

    /// Class-specific state.
    #[must_use]
    pub const fn class(&self) -> &ClassState {
        &self.class
    }

    /// Parent widget, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Placed children, back to front.
    #[must_use]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Identifier painted into the pick surface, unique among live widgets.
    #[must_use]
    pub const fn pick_id(&self) -> u32 {
        self.pick_id
    }

    /// Flat color encoding [`Widget::pick_id`].
    #[must_use]
    pub const fn pick_color(&self) -> Rgba {
        self.pick_color
    }

    /// Size the widget asks for when the placer is given no explicit size.
    #[must_use]
    pub const fn requested_size(&self) -> Size {
        self.requested_size
    }

    /// Rectangle the widget occupies, in root surface coordinates.
    #[must_use]
    pub const fn screen_location(&self) -> Rect {
        self.screen_location
    }

    /// Area available to children, inside [`Widget::screen_location`].
    #[must_use]
    pub const fn content_rect(&self) -> Rect {
        self.content_rect
    }

    /// Placement parameters, `None` while unplaced.
    #[must_use]
    pub const fn placer_params(&self) -> Option<&PlacerParams> {
        self.placer_params.as_ref()
    }

    /// True when the placer manages this widget.
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        self.placer_params.is_some()
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    widget: Option<Widget>,
}

/// Owner of every widget, rooted at a frame spanning the root surface.
#[derive(Debug)]
pub struct WidgetTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: WidgetId,
    root_bounds: Rect,
    next_pick_id: u32,
    config: Config,
}

impl WidgetTree {
    /// Create a tree whose root frame covers a `root_size` surface.
    ///
    /// The root is placed from the start, uses the configured background color
    /// and has pick id 0.
    #[must_use]
    pub fn new(root_size: Size, config: Config) -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: WidgetId {
                index: 0,
                generation: 0,
            },
            root_bounds: Rect::new(crate::geometry::Point::ORIGIN, root_size),
            next_pick_id: 0,
            config,
        };

        let mut state = FrameState::defaults(&tree.config);
        state.color = tree.config.colors.background;
        let root = tree.insert(ClassState::Frame(state), None, root_size);
        tree.root = root;
        placer::place(&mut tree, root, &PlaceRequest::new());
        tree
    }

    /// The root frame.
    #[must_use]
    pub const fn root(&self) -> WidgetId {
        self.root
    }

    /// Rectangle of the root surface.
    #[must_use]
    pub const fn root_bounds(&self) -> Rect {
        self.root_bounds
    }

    /// Configuration used for class defaults and decoration metrics.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Number of live widgets, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.widget.is_some()).count()
    }

    /// Never true in practice: the root lives as long as the tree.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while `id` refers to a live widget.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.get(id).is_some()
    }

    /// Borrow a live widget.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_ref())
    }

    /// Mutably borrow a live widget.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.widget.as_mut())
    }

    /// Class of a live widget.
    #[must_use]
    pub fn kind(&self, id: WidgetId) -> Option<ClassKind> {
        self.get(id).map(Widget::kind)
    }

    /// Parent of a live widget.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(Widget::parent)
    }

    /// Placed children of a widget, back to front. Empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).map_or(&[], Widget::children)
    }

    /// Create an unplaced widget of class `kind` under `parent`.
    ///
    /// Returns `None` when `parent` is not a live widget, or once every pick id
    /// has been handed out.
    pub fn create(&mut self, kind: ClassKind, parent: WidgetId) -> Option<WidgetId> {
        if !self.contains(parent) {
            log::warn!("cannot create a {} under dead parent {parent:?}", kind.name());
            return None;
        }
        if self.next_pick_id > MAX_PICK_ID {
            log::warn!("cannot create a {}: pick ids exhausted", kind.name());
            return None;
        }
        let state = ClassState::defaults(kind, &self.config);
        let requested = match &state {
            ClassState::Toplevel(top) => top.outer_size(self.config.sizes.toplevel, &self.config),
            ClassState::Frame(_) => self.config.sizes.frame,
            ClassState::Button(_) => self.config.sizes.button,
        };
        let id = self.insert(state, Some(parent), requested);
        log::debug!("created {} {id:?} under {parent:?}", kind.name());
        Some(id)
    }

    /// Create a widget from its class registry name.
    ///
    /// Returns `None` for unknown class names or a dead parent.
    pub fn create_by_name(&mut self, class_name: &str, parent: WidgetId) -> Option<WidgetId> {
        let Some(kind) = ClassKind::from_name(class_name) else {
            log::warn!("unknown widget class {class_name:?}");
            return None;
        };
        self.create(kind, parent)
    }

    /// Register a callback run right before the widget is freed.
    pub fn set_destructor(&mut self, id: WidgetId, destructor: Destructor) {
        if let Some(widget) = self.get_mut(id) {
            widget.destructor = Some(destructor);
        }
    }

    /// Destroy a widget and all of its descendants, children before parents.
    ///
    /// Returns `false` for dead ids and for the root, which cannot be destroyed.
    pub fn destroy(&mut self, id: WidgetId) -> bool {
        if id == self.root {
            log::warn!("the root widget cannot be destroyed");
            return false;
        }
        if !self.contains(id) {
            return false;
        }
        self.unlink_from_parent(id);

        let mut doomed = Vec::new();
        self.collect_post_order(id, &mut doomed);
        for victim in doomed {
            self.release(victim);
        }
        true
    }

    /// Move a widget to the end of its parent's child list, in front of its siblings.
    pub fn raise(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            if let Some(pos) = parent.children.iter().position(|&c| c == id) {
                let child = parent.children.remove(pos);
                parent.children.push(child);
            }
        }
    }

    /// Placed widgets reachable from the root, in pre-order (children before the
    /// next sibling, back to front).
    #[must_use]
    pub fn placed_pre_order(&self) -> Vec<WidgetId> {
        let mut order = Vec::with_capacity(self.slots.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(widget) = self.get(id) else {
                continue;
            };
            if !widget.is_placed() {
                continue;
            }
            order.push(id);
            stack.extend(widget.children.iter().rev());
        }
        order
    }

    /// Apply a frame configuration. Returns `false` if `id` is not a live frame.
    pub fn configure_frame(&mut self, id: WidgetId, config: FrameConfig) -> bool {
        let requested = config.requested_size;
        let Some(ClassState::Frame(state)) = self.get_mut(id).map(|w| &mut w.class) else {
            return false;
        };
        state.apply(config);
        self.request_size(id, requested);
        true
    }

    /// Apply a button configuration. Returns `false` if `id` is not a live button.
    pub fn configure_button(&mut self, id: WidgetId, config: ButtonConfig) -> bool {
        let requested = config.frame.requested_size;
        let Some(ClassState::Button(state)) = self.get_mut(id).map(|w| &mut w.class) else {
            return false;
        };
        state.apply(config);
        self.request_size(id, requested);
        true
    }

    /// Apply a toplevel configuration. Returns `false` if `id` is not a live toplevel.
    ///
    /// The requested size is the content size; decorations are added to it.
    pub fn configure_toplevel(&mut self, id: WidgetId, config: ToplevelConfig) -> bool {
        let content = config.requested_size;
        match self.toplevel_mut(id) {
            Some(state) => state.apply(config),
            None => return false,
        }
        let outer = content.and_then(|size| {
            self.toplevel(id)
                .map(|state| state.outer_size(size, &self.config))
        });
        if outer.is_some() {
            self.request_size(id, outer);
        } else {
            // Border width feeds the decoration layout even without a size change.
            placer::run(self, id);
        }
        true
    }

    /// Install or replace a button's click callback.
    pub fn set_button_callback(&mut self, id: WidgetId, callback: ButtonCallback) -> bool {
        match self.get_mut(id).map(|w| &mut w.class) {
            Some(ClassState::Button(state)) => {
                state.callback = Some(callback);
                true
            }
            _ => false,
        }
    }

    /// Frame state of a live frame.
    #[must_use]
    pub fn frame(&self, id: WidgetId) -> Option<&FrameState> {
        match self.get(id).map(|w| &w.class) {
            Some(ClassState::Frame(state)) => Some(state),
            _ => None,
        }
    }

    /// Button state of a live button.
    #[must_use]
    pub fn button(&self, id: WidgetId) -> Option<&ButtonState> {
        match self.get(id).map(|w| &w.class) {
            Some(ClassState::Button(state)) => Some(state),
            _ => None,
        }
    }

    /// Toplevel state of a live toplevel.
    #[must_use]
    pub fn toplevel(&self, id: WidgetId) -> Option<&ToplevelState> {
        match self.get(id).map(|w| &w.class) {
            Some(ClassState::Toplevel(state)) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn button_mut(&mut self, id: WidgetId) -> Option<&mut ButtonState> {
        match self.get_mut(id).map(|w| &mut w.class) {
            Some(ClassState::Button(state)) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn toplevel_mut(&mut self, id: WidgetId) -> Option<&mut ToplevelState> {
        match self.get_mut(id).map(|w| &mut w.class) {
            Some(ClassState::Toplevel(state)) => Some(state),
            _ => None,
        }
    }

    /// Paint every placed widget back to front onto the visible and pick surfaces.
    ///
    /// Children are clipped to their parent's content rectangle.
    pub fn draw(&self, surface: &mut Surface, pick_surface: &mut Surface, text: &dyn TextProvider) {
        self.draw_subtree(self.root, surface, pick_surface, None, text);
    }

    fn draw_subtree(
        &self,
        id: WidgetId,
        surface: &mut Surface,
        pick_surface: &mut Surface,
        clip: Option<Rect>,
        text: &dyn TextProvider,
    ) {
        let Some(widget) = self.get(id) else {
            return;
        };
        if !widget.is_placed() {
            return;
        }
        let ctx = DrawContext {
            config: &self.config,
            clip: clip.as_ref(),
            text,
        };
        match &widget.class {
            ClassState::Frame(state) => frame::draw(widget, state, surface, pick_surface, &ctx),
            ClassState::Button(state) => button::draw(widget, state, surface, pick_surface, &ctx),
            ClassState::Toplevel(state) => {
                toplevel::draw(widget, state, surface, pick_surface, &ctx);
            }
        }

        let content = widget.content_rect;
        let child_clip = match clip {
            Some(clip) => content.intersect(&clip),
            None => content.intersect(&self.root_bounds),
        };
        let Some(child_clip) = child_clip else {
            return;
        };
        for &child in &widget.children {
            self.draw_subtree(child, surface, pick_surface, Some(child_clip), text);
        }
    }

    fn insert(&mut self, class: ClassState, parent: Option<WidgetId>, requested: Size) -> WidgetId {
        let pick_id = self.next_pick_id;
        self.next_pick_id += 1;
        let widget = Widget {
            class,
            parent,
            children: Vec::new(),
            pick_id,
            pick_color: Rgba::from_pick_id(pick_id),
            requested_size: requested,
            screen_location: Rect::default(),
            content_rect: Rect::default(),
            placer_params: None,
            destructor: None,
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.widget = Some(widget);
            WidgetId {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                widget: Some(widget),
            });
            WidgetId {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    fn release(&mut self, id: WidgetId) {
        if let Some(mut destructor) = self.get_mut(id).and_then(|w| w.destructor.take()) {
            destructor(id);
        }
        let slot = &mut self.slots[id.index as usize];
        slot.widget = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        log::debug!("destroyed widget {id:?}");
    }

    /// Every descendant of `id` (placed or not) followed by `id` itself.
    fn collect_post_order(&self, id: WidgetId, out: &mut Vec<WidgetId>) {
        for child in self.all_children(id) {
            self.collect_post_order(child, out);
        }
        out.push(id);
    }

    /// Placed children in order, then unplaced ones.
    fn all_children(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut children = self.children(id).to_vec();
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(widget) = &slot.widget else {
                continue;
            };
            let child = WidgetId {
                index: index as u32,
                generation: slot.generation,
            };
            if widget.parent == Some(id) && !children.contains(&child) {
                children.push(child);
            }
        }
        children
    }

    pub(crate) fn link_to_parent(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            if !parent.children.contains(&id) {
                parent.children.push(id);
            }
        }
    }

    pub(crate) fn unlink_from_parent(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.retain(|&c| c != id);
        }
    }

    fn request_size(&mut self, id: WidgetId, size: Option<Size>) {
        let Some(size) = size else {
            return;
        };
        let Some(widget) = self.get_mut(id) else {
            return;
        };
        widget.requested_size = size;
        if widget.is_placed() {
            placer::run(self, id);
        }
    }
}

/// Shared inputs of the class draw functions.
pub(crate) struct DrawContext<'a> {
    pub(crate) config: &'a Config,
    pub(crate) clip: Option<&'a Rect>,
    pub(crate) text: &'a dyn TextProvider,
}

/// Store a new screen location and let the widget's class derive its content
/// rectangle and sub-layout.
pub(crate) fn geometry_notify(tree: &mut WidgetTree, id: WidgetId, rect: Rect) {
    let config = &tree.config;
    let Some(widget) = tree
        .slots
        .get_mut(id.index as usize)
        .filter(|slot| slot.generation == id.generation)
        .and_then(|slot| slot.widget.as_mut())
    else {
        return;
    };

    widget.screen_location = rect;
    widget.content_rect = match &mut widget.class {
        ClassState::Frame(state) => rect.inset(state.border_width),
        ClassState::Button(state) => rect.inset(state.frame.border_width),
        ClassState::Toplevel(state) => state.layout(rect, config),
    };
}

/// Route an event to the class handler of `id`. Returns whether it was handled.
pub(crate) fn handle(
    tree: &mut WidgetTree,
    dispatcher: &mut Dispatcher,
    id: WidgetId,
    event: &Event,
) -> bool {
    match tree.kind(id) {
        Some(ClassKind::Frame) => frame::handle(tree, dispatcher, id, event),
        Some(ClassKind::Button) => button::handle(tree, dispatcher, id, event),
        Some(ClassKind::Toplevel) => toplevel::handle(tree, dispatcher, id, event),
        None => false,
    }
}
