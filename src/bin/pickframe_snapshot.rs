//! pickframe-snapshot - headless demo of the widget toolkit.
//!
//! Builds a small scene (two toplevel windows holding frames and buttons), replays a
//! scripted input sequence through the dispatcher and writes the final visible and
//! pick surfaces as PNG files.
//!
//! Usage: `pickframe-snapshot [OUTPUT_DIR] [CONFIG.yaml]`
//!
//! Set `RUST_LOG=debug` to trace capture changes, raise-to-front and destruction.

use pickframe::prelude::*;
use std::path::PathBuf;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
    let config = args
        .next()
        .map_or_else(Config::default, Config::load_or_default);

    let mut ui = UiContext::new(WIDTH, HEIGHT, config)?;
    let clicks = build_scene(&mut ui);

    let mut input = ScriptedInput::new(script());
    ui.run(&mut input);
    log::info!(
        "replayed script, {} button clicks, {} widgets alive",
        clicks.get(),
        ui.tree().len()
    );

    std::fs::create_dir_all(&out_dir)?;
    PngEncoder::write_to_file(ui.surface(), out_dir.join("snapshot.png"))?;
    PngEncoder::write_to_file(ui.pick_surface(), out_dir.join("snapshot_pick.png"))?;
    log::info!("snapshots written to {}", out_dir.display());
    Ok(())
}

fn build_scene(ui: &mut UiContext) -> std::rc::Rc<std::cell::Cell<u32>> {
    let root = ui.root();
    let clicks = std::rc::Rc::new(std::cell::Cell::new(0));

    if let Some(editor) = ui.create(ClassKind::Toplevel, root) {
        ui.tree_mut().configure_toplevel(
            editor,
            ToplevelConfig {
                title: Some("Editor".into()),
                requested_size: Some(Size::new(300, 200)),
                ..ToplevelConfig::default()
            },
        );
        ui.place(editor, &PlaceRequest::new().position(20, 20));

        if let Some(panel) = ui.create(ClassKind::Frame, editor) {
            ui.tree_mut().configure_frame(
                panel,
                FrameConfig {
                    relief: Some(Relief::Sunken),
                    border_width: Some(3),
                    text: Some("Hello".into()),
                    ..FrameConfig::default()
                },
            );
            ui.place(panel, &PlaceRequest::new().rel_size(1.0, 0.7));
        }

        if let Some(ok) = ui.create(ClassKind::Button, editor) {
            let counter = std::rc::Rc::clone(&clicks);
            ui.tree_mut().configure_button(
                ok,
                ButtonConfig {
                    frame: FrameConfig {
                        text: Some("OK".into()),
                        ..FrameConfig::default()
                    },
                    callback: Some(Box::new(move |_, id, _| {
                        counter.set(counter.get() + 1);
                        log::info!("button {id:?} clicked");
                        true
                    })),
                    ..ButtonConfig::default()
                },
            );
            ui.place(
                ok,
                &PlaceRequest::new()
                    .rel_position(1.0, 1.0)
                    .position(-10, -10)
                    .anchor(Anchor::SouthEast)
                    .size(80, 30),
            );
        }
    }

    if let Some(palette) = ui.create(ClassKind::Toplevel, root) {
        ui.tree_mut().configure_toplevel(
            palette,
            ToplevelConfig {
                title: Some("Palette".into()),
                requested_size: Some(Size::new(160, 120)),
                resizable: Some(Axes::None),
                ..ToplevelConfig::default()
            },
        );
        ui.place(palette, &PlaceRequest::new().position(360, 200));

        for (i, color) in [Rgba::RED, Rgba::GREEN, Rgba::BLUE].into_iter().enumerate() {
            let Some(swatch) = ui.create(ClassKind::Frame, palette) else {
                continue;
            };
            ui.tree_mut().configure_frame(
                swatch,
                FrameConfig {
                    color: Some(color),
                    ..FrameConfig::default()
                },
            );
            ui.place(
                swatch,
                &PlaceRequest::new()
                    .rel_position(i as f32 / 3.0, 0.0)
                    .rel_size(1.0 / 3.0, 1.0),
            );
        }
    }

    clicks
}

/// Click OK, drag the editor by its title bar, then click a palette swatch so the
/// palette comes to the front.
fn script() -> Vec<Event> {
    let left_click = |at: Point| {
        [
            Event::MouseDown {
                button: MouseButton::Left,
                at,
            },
            Event::MouseUp {
                button: MouseButton::Left,
                at,
            },
        ]
    };

    let mut events = Vec::new();
    // OK button sits at the bottom-right of the editor's content.
    events.extend(left_click(Point::new(280, 225)));
    // Title bar drag.
    events.push(Event::MouseMove {
        at: Point::new(150, 30),
    });
    events.push(Event::MouseDown {
        button: MouseButton::Left,
        at: Point::new(150, 30),
    });
    for step in 1..=4 {
        events.push(Event::MouseMove {
            at: Point::new(150 + step * 10, 30 + step * 5),
        });
    }
    events.push(Event::MouseUp {
        button: MouseButton::Left,
        at: Point::new(190, 50),
    });
    // Click a palette swatch to raise the palette.
    events.extend(left_click(Point::new(400, 260)));
    events
}
