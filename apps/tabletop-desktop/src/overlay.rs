use egui::Context as EguiContext;
use glam::Vec3;
use tabletop_render::RenderPath;
use tabletop_scene::ProgramState;
use tabletop_tools::CameraInfo;

use crate::app::AppState;

const DRAG_SPEED: f32 = 0.05;

fn drag_vec3(ui: &mut egui::Ui, label: &str, v: &mut Vec3) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(&mut v.x).prefix("x: ").speed(DRAG_SPEED));
        ui.add(egui::DragValue::new(&mut v.y).prefix("y: ").speed(DRAG_SPEED));
        ui.add(egui::DragValue::new(&mut v.z).prefix("z: ").speed(DRAG_SPEED));
    });
}

fn drag_unit(ui: &mut egui::Ui, label: &str, value: &mut f32) {
    ui.add(
        egui::DragValue::new(value)
            .prefix(format!("{label}: "))
            .speed(DRAG_SPEED)
            .range(0.0..=1.0),
    );
}

/// Draw the debug overlay windows.
pub fn draw_ui(ctx: &EguiContext, app: &mut AppState) {
    egui::Window::new("Settings").show(ctx, |ui| {
        let state = &mut app.state;

        let mut color = state.clear_color.to_array();
        ui.horizontal(|ui| {
            ui.label("Background color");
            ui.color_edit_button_rgb(&mut color);
        });
        state.clear_color = Vec3::from_array(color);

        drag_vec3(ui, "Cup position", &mut state.cup_position);

        let mut scale = state.cup_scale;
        ui.add(
            egui::DragValue::new(&mut scale)
                .prefix("Cup scale: ")
                .speed(DRAG_SPEED)
                .range(ProgramState::CUP_SCALE_MIN..=ProgramState::CUP_SCALE_MAX),
        );
        state.set_cup_scale(scale);

        ui.separator();
        ui.label("Point light attenuation");
        let attenuation = &mut state.point_light.attenuation;
        drag_unit(ui, "constant", &mut attenuation.constant);
        drag_unit(ui, "linear", &mut attenuation.linear);
        drag_unit(ui, "quadratic", &mut attenuation.quadratic);

        ui.separator();
        egui::ComboBox::from_label("Render path")
            .selected_text(app.path.as_str())
            .show_ui(ui, |ui| {
                for path in RenderPath::ALL {
                    ui.selectable_value(&mut app.path, path, path.as_str());
                }
            });
        ui.checkbox(&mut app.skybox, "Skybox");
        ui.label(format!("{:.1} FPS", app.timer.fps()));
    });

    egui::Window::new("Camera info").show(ctx, |ui| {
        let info = CameraInfo::from_camera(&app.state.camera);
        ui.label(info.position_line());
        ui.label(info.angles_line());
        ui.label(info.front_line());
        ui.checkbox(&mut app.state.camera_mouse_look, "Camera mouse update");
    });
}
