//! Desktop window through eframe/egui
//!
//! eframe owns the event loop here, so the commander is stepped from
//! `App::update` instead of running `Window::start`.

use std::time::Duration;

use eframe::egui;
use glam::Vec2;

use crate::commander::Commander;
use crate::error::{Error, Result};
use crate::graphics::vertex::colors;
use crate::graphics::{Anchor, DrawList, Event, Key};

/// Open a native window and run `commander` until it quits
pub fn run(commander: Commander, title: &str) -> Result<()> {
    let (width, height) = commander.window().window_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_resizable(false)
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(|_cc| Ok(Box::new(EguiApp::new(commander)))),
    )
    .map_err(|e| Error::Platform(e.to_string()))
}

struct EguiApp {
    commander: Commander,
}

impl EguiApp {
    fn new(mut commander: Commander) -> Self {
        commander.open();
        Self { commander }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = collect_events(ctx);
        let delta = ctx.input(|i| i.stable_dt);

        if let Err(e) = self.commander.step(&events, delta) {
            log::error!("Frame failed: {e}");
        }

        if !self.commander.is_running() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let list = self.commander.draw();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(color32(colors::BACKGROUND)))
            .show(ctx, |ui| paint(ui.painter(), &list));

        let frame_rate = self.commander.window().frame_rate().max(1);
        ctx.request_repaint_after(Duration::from_secs_f32(1.0 / frame_rate as f32));
    }
}

fn collect_events(ctx: &egui::Context) -> Vec<Event> {
    ctx.input(|i| {
        let mut events = Vec::new();
        if i.viewport().close_requested() {
            events.push(Event::Quit);
        }

        for event in &i.events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    events.push(Event::MouseMotion(Vec2::new(pos.x, pos.y)));
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } => events.push(Event::MouseClick(Vec2::new(pos.x, pos.y))),
                egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = map_key(*key) {
                        events.push(Event::KeyDown(key));
                    }
                }
                _ => {}
            }
        }
        events
    })
}

fn map_key(key: egui::Key) -> Option<Key> {
    if key == egui::Key::Escape {
        return Some(Key::Escape);
    }

    let mut chars = key.name().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(Key::char(c)),
        _ => None,
    }
}

fn color32(c: [f32; 4]) -> egui::Color32 {
    let [r, g, b, a] = c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

fn paint(painter: &egui::Painter, list: &DrawList) {
    let mut mesh = egui::Mesh::default();
    for v in &list.vertices {
        mesh.colored_vertex(egui::pos2(v.position[0], v.position[1]), color32(v.color));
    }
    mesh.indices = (0..mesh.vertices.len() as u32).collect();
    painter.add(egui::Shape::mesh(mesh));

    for text in &list.texts {
        let align = match text.anchor {
            Anchor::TopLeft => egui::Align2::LEFT_TOP,
            Anchor::Center => egui::Align2::CENTER_CENTER,
        };
        painter.text(
            egui::pos2(text.position.x, text.position.y),
            align,
            &text.text,
            egui::FontId::proportional(text.size),
            color32(text.color),
        );
    }
}
