use flow_core::camera::{Camera, Viewport};
use flow_core::consts::PHOTO_BORDER;
use flow_core::picking::{plane_half_extents, resolve_pointer, PickTarget};
use flow_core::session::GallerySession;
use tracing::warn;

use crate::app::FlowApp;
use crate::states::ViewportState;

/// World units moved toward the gallery per point of scroll.
const DOLLY_PER_POINT: f64 = 0.05;
/// Planes projected larger than this many points are skipped.
const MAX_PLANE_POINTS: f32 = 50_000.0;

const BORDER_COLOR: egui::Color32 = egui::Color32::from_gray(235);
const SELECTED_BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 196, 64);
const PLACEHOLDER_COLOR: egui::Color32 = egui::Color32::from_gray(70);

pub fn show(ctx: &egui::Context, app: &mut FlowApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some(ref mut session) = app.session else {
            show_placeholder(ui, app.ui_state.is_busy());
            return;
        };
        if session.is_empty() {
            show_placeholder(ui, app.ui_state.is_busy());
            return;
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let viewport = Viewport::new(
            rect.left() as f64,
            rect.top() as f64,
            rect.width() as f64,
            rect.height() as f64,
        );

        handle_keys(ctx, session);
        handle_dolly(ui, &response, &mut app.viewport.camera);
        handle_pan(&response, &mut app.viewport.camera, rect);

        // The animation runs every frame whether or not anything changed.
        let dt = ctx.input(|i| i.stable_dt) as f64;
        session.tick(app.viewport.camera.position, dt);

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let targets = pick_targets(session, &app.viewport);
                let event = resolve_pointer(
                    &app.viewport.camera,
                    &viewport,
                    (pos.x as f64, pos.y as f64),
                    &targets,
                );
                if let Err(e) = session.handle_pointer(event) {
                    warn!(error = %e, "Ignoring pointer event");
                }
            }
        }

        draw_photos(ui, rect, &viewport, session, &app.viewport);
        draw_mode_label(ui, rect, session);

        ctx.request_repaint();
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(20));
}

fn handle_keys(ctx: &egui::Context, session: &mut GallerySession) {
    if ctx.input(|i| i.key_pressed(egui::Key::G)) {
        session.toggle_mode();
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        session.clear_selection();
    }
}

fn handle_dolly(ui: &egui::Ui, response: &egui::Response, camera: &mut Camera) {
    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    if scroll_delta == 0.0 || !response.hovered() {
        return;
    }
    camera.dolly(scroll_delta as f64 * DOLLY_PER_POINT);
}

/// Drag moves the scene under the cursor, measured on the z=0 plane.
fn handle_pan(response: &egui::Response, camera: &mut Camera, rect: egui::Rect) {
    if !response.dragged_by(egui::PointerButton::Primary)
        && !response.dragged_by(egui::PointerButton::Middle)
    {
        return;
    }
    let delta = response.drag_delta();
    let world_per_point = camera.world_per_pixel(rect.height() as f64, camera.position.z);
    camera.pan(
        -delta.x as f64 * world_per_point,
        delta.y as f64 * world_per_point,
    );
}

fn pick_targets(session: &GallerySession, state: &ViewportState) -> Vec<PickTarget> {
    session
        .render_items()
        .map(|item| {
            let aspect = state.aspects.get(item.index).copied().flatten();
            let (half_width, half_height) = plane_half_extents(aspect);
            PickTarget {
                index: item.index,
                center: item.position,
                half_width,
                half_height,
            }
        })
        .collect()
}

/// Paint every photo plane, farthest first so nearer planes cover it.
fn draw_photos(
    ui: &egui::Ui,
    rect: egui::Rect,
    viewport: &Viewport,
    session: &GallerySession,
    state: &ViewportState,
) {
    let painter = ui.painter_at(rect);
    let camera = &state.camera;

    let mut visible: Vec<_> = session
        .render_items()
        .filter_map(|item| {
            viewport
                .project(camera, item.position)
                .map(|p| (item.index, item.is_selected, p))
        })
        .collect();
    visible.sort_by(|a, b| b.2.depth.total_cmp(&a.2.depth));

    for (index, is_selected, p) in visible {
        let aspect = state.aspects.get(index).copied().flatten();
        let (half_width, half_height) = plane_half_extents(aspect);
        let scale = p.scale as f32;
        let center = egui::pos2(p.x as f32, p.y as f32);

        let outer = egui::Rect::from_center_size(
            center,
            egui::vec2(half_width as f32 * 2.0 * scale, half_height as f32 * 2.0 * scale),
        );
        if outer.width() > MAX_PLANE_POINTS || !outer.intersects(rect) {
            continue;
        }

        let inner = outer.shrink(PHOTO_BORDER as f32 / 2.0 * scale);

        let border = if is_selected {
            SELECTED_BORDER_COLOR
        } else {
            BORDER_COLOR
        };
        painter.rect_filled(outer, 0.0, border);

        match state.textures.get(index).and_then(|t| t.as_ref()) {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    inner,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(inner, 0.0, PLACEHOLDER_COLOR);
            }
        }
    }
}

fn draw_mode_label(ui: &egui::Ui, rect: egui::Rect, session: &GallerySession) {
    let label = match session.selected() {
        Some(index) => format!("{} layout  |  photo #{index} focused", session.mode()),
        None => format!("{} layout", session.mode()),
    };
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn show_placeholder(ui: &mut egui::Ui, busy: bool) {
    let text = if busy {
        "Loading photos..."
    } else {
        "Open a folder of photos to begin"
    };
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
