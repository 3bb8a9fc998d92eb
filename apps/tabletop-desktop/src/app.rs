use tabletop_input::{Action, HeldMovement, Key, action_for_key, look_offsets};
use tabletop_persist::StateFile;
use tabletop_render::{FrameInputs, FrameOptions, FramePlan, RenderPath, plan_frame};
use tabletop_scene::ProgramState;
use tabletop_tools::FrameTimer;

/// What the window layer has to do after a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    None,
    /// Cursor grab must follow the new overlay visibility.
    OverlayChanged,
    Quit,
}

/// Application state that lives independently of the window and GPU.
pub struct AppState {
    pub state: ProgramState,
    pub state_file: StateFile,
    pub held: HeldMovement,
    pub timer: FrameTimer,
    pub path: RenderPath,
    pub skybox: bool,
}

impl AppState {
    pub fn new(state_file: StateFile, path: RenderPath, skybox: bool) -> Self {
        let state = state_file.load_or_default();
        tracing::info!(
            path = %state_file.path().display(),
            overlay = state.overlay_enabled,
            spotlight = state.spotlight_enabled,
            "program state loaded"
        );
        Self {
            state,
            state_file,
            held: HeldMovement::new(),
            timer: FrameTimer::new(),
            path,
            skybox,
        }
    }

    pub fn handle_key(&mut self, key: Key, pressed: bool) -> KeyOutcome {
        self.held.set_key(key, pressed);
        match action_for_key(key, pressed) {
            Action::ToggleOverlay => {
                let shown = self.state.toggle_overlay();
                tracing::debug!(shown, "overlay toggled");
                KeyOutcome::OverlayChanged
            }
            Action::ToggleSpotlight => {
                let on = self.state.toggle_spotlight();
                tracing::debug!(on, "spotlight toggled");
                KeyOutcome::None
            }
            Action::Quit => KeyOutcome::Quit,
            Action::Move(_) | Action::Noop => KeyOutcome::None,
        }
    }

    /// Raw mouse motion. Ignored while the overlay owns the mouse.
    pub fn mouse_motion(&mut self, dx: f64, dy: f64) {
        if !self.state.mouse_look_active() {
            return;
        }
        let offset = look_offsets(dx, dy);
        self.state
            .camera
            .process_mouse_movement(offset.x, offset.y, true);
    }

    pub fn scroll(&mut self, lines: f32) {
        self.state.camera.process_mouse_scroll(lines);
    }

    /// Advance one frame: measure the delta and apply held movement keys.
    pub fn update(&mut self) -> f32 {
        let dt = self.timer.tick();
        self.held.apply(&mut self.state.camera, dt);
        dt
    }

    pub fn frame(&self, aspect: f32) -> (FramePlan, FrameInputs) {
        let plan = plan_frame(FrameOptions {
            path: self.path,
            overlay: self.state.overlay_enabled,
            skybox: self.skybox,
        });
        (plan, FrameInputs::from_state(&self.state, aspect))
    }

    pub fn save(&self) {
        match self.state_file.save(&self.state) {
            Ok(()) => tracing::info!(path = %self.state_file.path().display(), "program state saved"),
            Err(e) => tracing::error!("failed to save program state: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use tabletop_render::PassKind;

    fn app_in(dir: &tempfile::TempDir) -> AppState {
        AppState::new(
            StateFile::in_dir(dir.path()),
            RenderPath::Deferred,
            true,
        )
    }

    #[test]
    fn starts_from_defaults_without_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = app_in(&dir);
        assert_eq!(app.state, ProgramState::default());
    }

    #[test]
    fn f1_frees_the_mouse_and_shows_the_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.handle_key(Key::F1, true), KeyOutcome::OverlayChanged);
        assert!(app.state.overlay_enabled);

        let before = app.state.camera.clone();
        app.mouse_motion(50.0, 20.0);
        assert_eq!(app.state.camera, before);

        assert_eq!(app.handle_key(Key::F1, false), KeyOutcome::None);
        assert_eq!(app.handle_key(Key::F1, true), KeyOutcome::OverlayChanged);
        assert!(app.state.mouse_look_active());
    }

    #[test]
    fn mouse_up_pitches_up() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.mouse_motion(0.0, -100.0);
        assert!(app.state.camera.pitch() > 0.0);
    }

    #[test]
    fn escape_quits_and_f_toggles_spotlight() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        assert_eq!(app.handle_key(Key::Escape, true), KeyOutcome::Quit);
        app.handle_key(Key::F, true);
        assert!(app.state.spotlight_enabled);
    }

    #[test]
    fn overlay_adds_an_overlay_pass() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        let (plan, _) = app.frame(4.0 / 3.0);
        assert!(plan.pass(PassKind::Overlay).is_none());
        app.handle_key(Key::F1, true);
        let (plan, inputs) = app.frame(4.0 / 3.0);
        assert!(plan.has_overlay());
        assert_eq!(inputs.eye, app.state.camera.position);
    }

    #[test]
    fn save_round_trips_through_the_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(&dir);
        app.state.cup_position = Vec3::new(1.0, 2.0, 3.0);
        app.state.clear_color = Vec3::new(0.25, 0.5, 0.75);
        app.save();

        let reloaded = app_in(&dir);
        assert_eq!(reloaded.state.cup_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(reloaded.state.clear_color, Vec3::new(0.25, 0.5, 0.75));
    }
}
