//! Placer and dispatcher behaviour through the public API.
//!
//! Run: cargo test --test toolkit_test

#![allow(clippy::unwrap_used)]

use pickframe::placer::{self, PlacerParams};
use pickframe::prelude::*;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn ui(width: u32, height: u32) -> UiContext {
    UiContext::new(width, height, Config::default()).unwrap()
}

fn left_down(at: Point) -> Event {
    Event::MouseDown {
        button: MouseButton::Left,
        at,
    }
}

fn left_up(at: Point) -> Event {
    Event::MouseUp {
        button: MouseButton::Left,
        at,
    }
}

// ============================================================================
// Placer
// ============================================================================

#[test]
fn placer_southeast_anchor_example() {
    let mut params = PlacerParams::default();
    params.merge(
        &PlaceRequest::new()
            .size(20, 10)
            .rel_position(1.0, 1.0)
            .position(-5, -5)
            .anchor(Anchor::SouthEast),
    );
    let rect = params.resolve(Size::new(1, 1), &Rect::from_xywh(0, 0, 100, 100));
    assert_eq!(rect.top_left, Point::new(75, 85));
    assert_eq!(rect.size, Size::new(20, 10));
}

#[test]
fn placer_propagates_parent_resize() {
    let mut ui = ui(400, 300);
    let root = ui.root();
    let parent = ui.create(ClassKind::Frame, root).unwrap();
    ui.place(parent, &PlaceRequest::new().size(100, 100));
    let child = ui.create(ClassKind::Frame, parent).unwrap();
    ui.place(child, &PlaceRequest::new().rel_size(0.5, 0.5));
    assert_eq!(ui.tree().get(child).unwrap().screen_location().size.width, 50);

    ui.place(parent, &PlaceRequest::new().width(200));
    assert_eq!(ui.tree().get(child).unwrap().screen_location().size.width, 100);
    assert_eq!(ui.tree().get(child).unwrap().screen_location().size.height, 50);
}

#[test]
fn placer_relative_values_clamp_to_parent() {
    let mut ui = ui(200, 100);
    let root = ui.root();
    let frame = ui.create(ClassKind::Frame, root).unwrap();
    ui.place(frame, &PlaceRequest::new().rel_size(3.0, 1.5));
    assert_eq!(
        ui.tree().get(frame).unwrap().screen_location(),
        Rect::from_xywh(0, 0, 200, 100)
    );
}

#[test]
fn forget_then_place_relinks_as_frontmost() {
    let mut ui = ui(200, 100);
    let root = ui.root();
    let a = ui.create(ClassKind::Frame, root).unwrap();
    let b = ui.create(ClassKind::Frame, root).unwrap();
    ui.place(a, &PlaceRequest::new().size(10, 10));
    ui.place(b, &PlaceRequest::new().size(10, 10));
    assert_eq!(ui.tree().children(root), &[a, b]);

    ui.forget(a);
    assert_eq!(ui.tree().children(root), &[b]);
    assert!(ui.tree().contains(a));

    // Earlier parameters are gone: the requested size applies again.
    ui.place(a, &PlaceRequest::new());
    assert_eq!(ui.tree().children(root), &[b, a]);
    assert_eq!(
        ui.tree().get(a).unwrap().screen_location().size,
        Config::default().sizes.frame
    );
}

// ============================================================================
// Dispatcher
// ============================================================================

#[test]
fn pick_ids_pairwise_distinct() {
    let mut ui = ui(200, 200);
    let root = ui.root();
    let mut ids = vec![root];
    for (i, kind) in ClassKind::ALL.iter().cycle().take(12).enumerate() {
        let parent = ids[i / 3];
        if let Some(id) = ui.create(*kind, parent) {
            ids.push(id);
        }
    }
    ui.destroy(ids[3]);

    let live: Vec<_> = ids.iter().filter(|id| ui.tree().contains(**id)).collect();
    let picks: HashSet<u32> = live
        .iter()
        .map(|id| ui.tree().get(**id).unwrap().pick_id())
        .collect();
    assert_eq!(picks.len(), live.len());
    assert!(picks.contains(&0));
}

#[test]
fn capture_precedence_over_hovered_widget() {
    let mut ui = ui(300, 200);
    let root = ui.root();
    let w = ui.create(ClassKind::Toplevel, root).unwrap();
    ui.tree_mut().configure_toplevel(
        w,
        ToplevelConfig {
            requested_size: Some(Size::new(100, 60)),
            ..ToplevelConfig::default()
        },
    );
    ui.place(w, &PlaceRequest::new().position(10, 10));
    let x = ui.create(ClassKind::Button, root).unwrap();
    ui.place(x, &PlaceRequest::new().position(200, 150));

    let clicked = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&clicked);
    ui.tree_mut().set_button_callback(
        x,
        Box::new(move |_, _, _| {
            *flag.borrow_mut() = true;
            true
        }),
    );

    // Grab W's title bar, then move and release over X.
    ui.draw();
    ui.dispatch(&Event::MouseMove {
        at: Point::new(60, 20),
    });
    ui.draw();
    assert!(ui.dispatch(&left_down(Point::new(60, 20))));
    assert_eq!(ui.dispatcher().active(), Some(w));

    ui.draw();
    ui.dispatch(&Event::MouseMove {
        at: Point::new(60, 40),
    });
    ui.draw();
    assert!(ui.dispatch(&left_up(Point::new(210, 160))));

    assert!(!*clicked.borrow());
    assert_eq!(ui.dispatcher().active(), None);
    assert_eq!(
        ui.tree().get(w).unwrap().screen_location().top_left,
        Point::new(10, 30)
    );
}

#[test]
fn release_over_button_without_press_does_not_click() {
    let mut ui = ui(300, 200);
    let root = ui.root();
    let button = ui.create(ClassKind::Button, root).unwrap();
    ui.place(button, &PlaceRequest::new().position(100, 100));

    let clicks = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&clicks);
    ui.tree_mut().set_button_callback(
        button,
        Box::new(move |_, _, _| {
            *counter.borrow_mut() += 1;
            true
        }),
    );

    ui.draw();
    ui.dispatch(&left_down(Point::new(5, 5)));
    assert_eq!(ui.dispatcher().active(), None);
    ui.draw();
    assert!(!ui.dispatch(&left_up(Point::new(110, 110))));
    assert_eq!(*clicks.borrow(), 0);

    // A full click on the button still fires.
    ui.draw();
    ui.dispatch(&left_down(Point::new(110, 110)));
    ui.draw();
    assert!(ui.dispatch(&left_up(Point::new(110, 110))));
    assert_eq!(*clicks.borrow(), 1);
}

#[test]
fn raise_to_front_on_click() {
    let mut ui = ui(400, 300);
    let root = ui.root();
    let b = ui.create(ClassKind::Toplevel, root).unwrap();
    ui.place(b, &PlaceRequest::new().position(60, 40));
    let a = ui.create(ClassKind::Toplevel, root).unwrap();
    ui.place(a, &PlaceRequest::new());

    // A's far corner and B's near corner overlap around (200, 200).
    let overlap = Point::new(200, 200);
    ui.draw();
    assert_eq!(hit_test(ui.tree(), ui.pick_surface(), overlap), Some(a));

    ui.dispatch(&left_down(Point::new(20, 100)));
    ui.dispatch(&left_up(Point::new(20, 100)));
    ui.draw();
    ui.dispatch(&left_down(Point::new(380, 290)));
    ui.dispatch(&left_up(Point::new(380, 290)));

    assert_eq!(ui.tree().children(root).last(), Some(&b));
    ui.draw();
    assert_eq!(hit_test(ui.tree(), ui.pick_surface(), overlap), Some(b));
}

#[test]
fn close_shortcut_and_default_handler() {
    let mut ui = ui(400, 300);
    let root = ui.root();
    let top = ui.create(ClassKind::Toplevel, root).unwrap();
    ui.place(top, &PlaceRequest::new());

    let unhandled = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&unhandled);
    ui.dispatcher_mut().set_default_handler(Box::new(move |event| {
        sink.borrow_mut().push(*event);
        false
    }));

    let ctrl_w = Event::KeyDown {
        key: Key::Char('w'),
        modifiers: Modifiers::CTRL,
    };
    assert!(ui.dispatch(&ctrl_w));
    assert!(!ui.tree().contains(top));
    assert!(!ui.dispatch(&ctrl_w));
    assert_eq!(*unhandled.borrow(), vec![ctrl_w]);
}

#[test]
fn destroying_window_drops_capture_and_descendants() {
    let mut ui = ui(400, 300);
    let root = ui.root();
    let top = ui.create(ClassKind::Toplevel, root).unwrap();
    ui.place(top, &PlaceRequest::new().position(5, 5));
    let button = ui.create(ClassKind::Button, top).unwrap();
    ui.place(button, &PlaceRequest::new());

    let destroyed = Rc::new(RefCell::new(Vec::new()));
    for id in [top, button] {
        let log = Rc::clone(&destroyed);
        ui.tree_mut()
            .set_destructor(id, Box::new(move |dead| log.borrow_mut().push(dead)));
    }

    ui.draw();
    let on_button = ui.tree().get(button).unwrap().screen_location().center();
    ui.dispatch(&left_down(on_button));
    assert_eq!(ui.dispatcher().active(), Some(button));

    // The close control sits in the title bar's left corner.
    let close = ui.tree().toplevel(top).unwrap().close_rect().center();
    ui.destroy(top);
    assert_eq!(*destroyed.borrow(), vec![button, top]);
    assert_eq!(ui.dispatcher().active(), None);
    ui.draw();
    assert!(!ui.dispatch(&left_down(close)));
    assert_eq!(ui.dispatcher().active(), None);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A placed widget fills exactly the rectangle the placer computed, and the
    /// pick surface reports it everywhere inside that is not covered.
    #[test]
    fn prop_placed_frame_is_hit_where_drawn(
        x in 0i32..150,
        y in 0i32..100,
        w in 1i32..50,
        h in 1i32..50,
    ) {
        let mut ui = ui(200, 150);
        let root = ui.root();
        let frame = ui.create(ClassKind::Frame, root).unwrap();
        ui.place(frame, &PlaceRequest::new().position(x, y).size(w, h));
        ui.draw();

        let rect = ui.tree().get(frame).unwrap().screen_location();
        prop_assert_eq!(rect, Rect::from_xywh(x, y, w, h));
        for corner in [rect.top_left, Point::new(rect.right() - 1, rect.bottom() - 1)] {
            if corner.x < 200 && corner.y < 150 {
                prop_assert_eq!(hit_test(ui.tree(), ui.pick_surface(), corner), Some(frame));
            }
        }
        if rect.right() < 200 {
            let outside = Point::new(rect.right(), rect.top());
            prop_assert_eq!(hit_test(ui.tree(), ui.pick_surface(), outside), Some(root));
        }
    }
}
