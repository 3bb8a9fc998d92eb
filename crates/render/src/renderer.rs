use std::fmt::Write as _;

use crate::RenderError;
use crate::frame::FrameInputs;
use crate::plan::{DrawItem, FramePlan};

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer reads a frame plan and the inputs derived from program
/// state, then produces output. It never mutates program state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Execute one frame.
    fn render(&mut self, plan: &FramePlan, inputs: &FrameInputs)
    -> Result<Self::Output, RenderError>;
}

/// Reference backend that describes a frame as text.
///
/// Used by the CLI and by tests of the render interface.
#[derive(Debug, Default)]
pub struct PlanTextRenderer {
    frames: u64,
}

impl PlanTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Renderer for PlanTextRenderer {
    type Output = String;

    fn render(&mut self, plan: &FramePlan, inputs: &FrameInputs) -> Result<String, RenderError> {
        plan.validate()?;
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame {} ===", self.frames);
        let e = inputs.eye;
        let _ = writeln!(out, "eye=({:.2}, {:.2}, {:.2})", e.x, e.y, e.z);
        let c = inputs.clear_color;
        let _ = writeln!(out, "clear=({:.2}, {:.2}, {:.2})", c.x, c.y, c.z);
        let p = inputs.point_light.position;
        let _ = writeln!(out, "point light=({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        let _ = writeln!(
            out,
            "spotlight={}",
            if inputs.spot_light.diffuse.max_element() > 0.0 {
                "on"
            } else {
                "off"
            }
        );
        let _ = write!(out, "{plan}");

        for (_, draw) in plan.draws() {
            if let DrawItem::Object(obj) = draw.item {
                if let Some(inst) = inputs.instance(obj) {
                    let t = inst.model.w_axis;
                    let _ = writeln!(
                        out,
                        "  {:<10} at ({:.2}, {:.2}, {:.2})",
                        obj.name(),
                        t.x,
                        t.y,
                        t.z
                    );
                }
            }
        }

        self.frames += 1;
        tracing::debug!(frame = self.frames, draws = plan.draw_count(), "text frame");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{FrameOptions, PassKind, plan_frame};
    use crate::path::RenderPath;
    use glam::Vec3;
    use tabletop_scene::ProgramState;

    #[test]
    fn text_renderer_describes_frame() {
        let state = ProgramState::default();
        let inputs = FrameInputs::from_state(&state, 4.0 / 3.0);
        let plan = plan_frame(FrameOptions::default());
        let mut renderer = PlanTextRenderer::new();

        let out = renderer.render(&plan, &inputs).unwrap();
        assert!(out.contains("=== Frame 0 ==="));
        assert!(out.contains("eye=(0.00, 0.00, 3.00)"));
        assert!(out.contains("spotlight=off"));
        assert!(out.contains("cup        at (0.00, 0.00, -4.00)"));
        assert_eq!(renderer.frames_rendered(), 1);
    }

    #[test]
    fn text_renderer_follows_state() {
        let mut state = ProgramState::default();
        state.cup_position = Vec3::new(1.0, 2.0, 3.0);
        state.toggle_spotlight();
        let inputs = FrameInputs::from_state(&state, 1.0);
        let plan = plan_frame(FrameOptions {
            path: RenderPath::Forward,
            ..FrameOptions::default()
        });
        let out = PlanTextRenderer::new().render(&plan, &inputs).unwrap();
        assert!(out.contains("frame path=forward"));
        assert!(out.contains("spotlight=on"));
        assert!(out.contains("cup        at (1.00, 2.00, 3.00)"));
    }

    #[test]
    fn invalid_plan_is_refused() {
        let inputs = FrameInputs::from_state(&ProgramState::default(), 1.0);
        let mut plan = plan_frame(FrameOptions::default());
        plan.passes.retain(|p| p.kind != PassKind::DepthCopy);
        let mut renderer = PlanTextRenderer::new();
        assert!(renderer.render(&plan, &inputs).is_err());
        assert_eq!(renderer.frames_rendered(), 0);
    }
}
