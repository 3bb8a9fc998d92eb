use std::fmt;
use tabletop_scene::SceneObject;

use crate::RenderError;
use crate::path::RenderPath;
use crate::shading::{RenderTarget, Shading};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Deferred objects into the G-buffer.
    Geometry,
    /// Full-screen lighting of the G-buffer onto the surface.
    LightingResolve,
    /// G-buffer depth copied into the surface depth buffer.
    DepthCopy,
    /// Forward-shaded objects, cutouts, then the sky.
    Forward,
    /// Debug UI on top of the finished frame.
    Overlay,
}

impl PassKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PassKind::Geometry => "geometry",
            PassKind::LightingResolve => "lighting-resolve",
            PassKind::DepthCopy => "depth-copy",
            PassKind::Forward => "forward",
            PassKind::Overlay => "overlay",
        }
    }

    /// Colour target written by draws in this pass, if any.
    pub fn target(self) -> Option<RenderTarget> {
        match self {
            PassKind::Geometry => Some(RenderTarget::GBuffer),
            PassKind::LightingResolve | PassKind::Forward | PassKind::Overlay => {
                Some(RenderTarget::Surface)
            }
            PassKind::DepthCopy => None,
        }
    }
}

/// What happens to an attachment when a pass begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Load {
    Clear,
    Keep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawItem {
    Object(SceneObject),
    /// One triangle covering the viewport.
    FullScreen,
}

impl fmt::Display for DrawItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawItem::Object(obj) => f.write_str(&obj.name()),
            DrawItem::FullScreen => f.write_str("fullscreen"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Draw {
    pub item: DrawItem,
    pub shading: Shading,
}

impl Draw {
    pub fn object(obj: SceneObject, shading: Shading) -> Self {
        Self {
            item: DrawItem::Object(obj),
            shading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pass {
    pub kind: PassKind,
    /// `None` when the pass has no colour attachment.
    pub color: Option<Load>,
    /// `None` when the pass has no depth attachment.
    pub depth: Option<Load>,
    pub draws: Vec<Draw>,
}

impl Pass {
    fn new(kind: PassKind, color: Option<Load>, depth: Option<Load>) -> Self {
        Self {
            kind,
            color,
            depth,
            draws: Vec::new(),
        }
    }

    fn with_draws(mut self, draws: impl IntoIterator<Item = Draw>) -> Self {
        self.draws.extend(draws);
        self
    }
}

/// Per-frame switches that shape the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    pub path: RenderPath,
    pub overlay: bool,
    pub skybox: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            path: RenderPath::Deferred,
            overlay: false,
            skybox: true,
        }
    }
}

/// Ordered passes that make up one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    pub path: RenderPath,
    pub passes: Vec<Pass>,
}

/// Build the pass list for one frame.
pub fn plan_frame(options: FrameOptions) -> FramePlan {
    let mut passes = Vec::new();

    let cup_shading = match options.path {
        RenderPath::Deferred => {
            passes.push(
                Pass::new(PassKind::Geometry, Some(Load::Clear), Some(Load::Clear))
                    .with_draws([Draw::object(SceneObject::Cup, Shading::GBuffer)]),
            );
            passes.push(
                Pass::new(PassKind::LightingResolve, Some(Load::Clear), None).with_draws([Draw {
                    item: DrawItem::FullScreen,
                    shading: Shading::DeferredResolve,
                }]),
            );
            passes.push(Pass::new(PassKind::DepthCopy, None, None));
            None
        }
        RenderPath::Forward => Some(Shading::Lit),
    };

    let (color, depth) = match options.path {
        RenderPath::Deferred => (Load::Keep, Load::Keep),
        RenderPath::Forward => (Load::Clear, Load::Clear),
    };
    let mut forward = Pass::new(PassKind::Forward, Some(color), Some(depth));
    if let Some(shading) = cup_shading {
        forward.draws.push(Draw::object(SceneObject::Cup, shading));
    }
    forward
        .draws
        .extend(SceneObject::furniture().map(|obj| Draw::object(obj, Shading::Lit)));
    forward
        .draws
        .push(Draw::object(SceneObject::Grass, Shading::Cutout));
    if options.skybox {
        forward
            .draws
            .push(Draw::object(SceneObject::Skybox, Shading::Sky));
    }
    passes.push(forward);

    if options.overlay {
        passes.push(Pass::new(PassKind::Overlay, Some(Load::Keep), None));
    }

    FramePlan {
        path: options.path,
        passes,
    }
}

impl FramePlan {
    pub fn pass(&self, kind: PassKind) -> Option<&Pass> {
        self.passes.iter().find(|p| p.kind == kind)
    }

    pub fn has_overlay(&self) -> bool {
        self.pass(PassKind::Overlay).is_some()
    }

    /// Every draw in submission order, with the pass it belongs to.
    pub fn draws(&self) -> impl Iterator<Item = (PassKind, &Draw)> {
        self.passes
            .iter()
            .flat_map(|p| p.draws.iter().map(move |d| (p.kind, d)))
    }

    pub fn draw_count(&self) -> usize {
        self.passes.iter().map(|p| p.draws.len()).sum()
    }

    /// Check the ordering rules every backend relies on.
    pub fn validate(&self) -> Result<(), RenderError> {
        let invalid = |msg: String| Err(RenderError::InvalidPlan(msg));

        let sky_draws = self
            .draws()
            .filter(|(_, d)| d.shading == Shading::Sky)
            .count();
        if sky_draws > 1 {
            return invalid(format!("{sky_draws} sky draws"));
        }
        if sky_draws == 1 && self.draws().last().map(|(_, d)| d.shading) != Some(Shading::Sky) {
            return invalid("sky is not the last world draw".into());
        }

        let mut geometry_done = false;
        let mut depth_copied = false;
        for (i, pass) in self.passes.iter().enumerate() {
            match pass.kind {
                PassKind::Geometry => geometry_done = true,
                PassKind::DepthCopy if !geometry_done => {
                    return invalid("depth copy before geometry pass".into());
                }
                PassKind::DepthCopy => depth_copied = true,
                PassKind::Overlay if i + 1 != self.passes.len() => {
                    return invalid("overlay is not the final pass".into());
                }
                _ => {}
            }

            if pass.depth == Some(Load::Keep) && !depth_copied {
                return invalid(format!(
                    "{} pass keeps depth that was never copied",
                    pass.kind.as_str()
                ));
            }

            let mut cutout_seen = false;
            for draw in &pass.draws {
                if pass.kind.target() != Some(draw.shading.target()) {
                    return invalid(format!(
                        "{} draw of {} in {} pass",
                        draw.shading,
                        draw.item,
                        pass.kind.as_str()
                    ));
                }
                if draw.shading == Shading::Cutout {
                    cutout_seen = true;
                } else if cutout_seen && draw.shading.is_opaque() {
                    return invalid(format!("opaque {} drawn after a cutout", draw.item));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for FramePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frame path={}", self.path)?;
        for pass in &self.passes {
            let load = |l: Option<Load>| match l {
                None => "-",
                Some(Load::Clear) => "clear",
                Some(Load::Keep) => "keep",
            };
            writeln!(
                f,
                "  pass {} color={} depth={}",
                pass.kind.as_str(),
                load(pass.color),
                load(pass.depth)
            )?;
            for draw in &pass.draws {
                writeln!(
                    f,
                    "    draw {:<10} {:<16} {}",
                    draw.item.to_string(),
                    draw.shading.as_str(),
                    draw.shading.state()
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(plan: &FramePlan) -> Vec<PassKind> {
        plan.passes.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn deferred_pass_order() {
        let plan = plan_frame(FrameOptions::default());
        assert_eq!(
            kinds(&plan),
            vec![
                PassKind::Geometry,
                PassKind::LightingResolve,
                PassKind::DepthCopy,
                PassKind::Forward,
            ]
        );
        let geometry = plan.pass(PassKind::Geometry).unwrap();
        assert_eq!(
            geometry.draws,
            vec![Draw::object(SceneObject::Cup, Shading::GBuffer)]
        );
        let forward = plan.pass(PassKind::Forward).unwrap();
        assert_eq!(forward.color, Some(Load::Keep));
        assert_eq!(forward.depth, Some(Load::Keep));
        assert!(
            forward
                .draws
                .iter()
                .all(|d| d.item != DrawItem::Object(SceneObject::Cup))
        );
        plan.validate().unwrap();
    }

    #[test]
    fn forward_path_draws_cup_lit() {
        let plan = plan_frame(FrameOptions {
            path: RenderPath::Forward,
            ..FrameOptions::default()
        });
        assert_eq!(kinds(&plan), vec![PassKind::Forward]);
        let forward = &plan.passes[0];
        assert_eq!(forward.color, Some(Load::Clear));
        assert_eq!(
            forward.draws[0],
            Draw::object(SceneObject::Cup, Shading::Lit)
        );
        assert_eq!(plan.draw_count(), 1 + 7 + 1 + 1);
        plan.validate().unwrap();
    }

    #[test]
    fn skybox_is_last_world_draw() {
        for path in RenderPath::ALL {
            let plan = plan_frame(FrameOptions {
                path,
                overlay: true,
                skybox: true,
            });
            let (_, last) = plan.draws().last().unwrap();
            assert_eq!(last.item, DrawItem::Object(SceneObject::Skybox));
            assert_eq!(plan.passes.last().unwrap().kind, PassKind::Overlay);
            plan.validate().unwrap();
        }
    }

    #[test]
    fn grass_follows_furniture() {
        let plan = plan_frame(FrameOptions::default());
        let forward = plan.pass(PassKind::Forward).unwrap();
        let grass = forward
            .draws
            .iter()
            .position(|d| d.shading == Shading::Cutout)
            .unwrap();
        assert!(forward.draws[..grass].iter().all(|d| d.shading.is_opaque()));
        assert!(forward.draws[grass + 1..].iter().all(|d| d.shading == Shading::Sky));
    }

    #[test]
    fn skybox_can_be_disabled() {
        let plan = plan_frame(FrameOptions {
            skybox: false,
            ..FrameOptions::default()
        });
        assert!(plan.draws().all(|(_, d)| d.shading != Shading::Sky));
        assert!(!plan.has_overlay());
        plan.validate().unwrap();
    }

    #[test]
    fn validate_rejects_kept_depth_without_copy() {
        let mut plan = plan_frame(FrameOptions::default());
        plan.passes.retain(|p| p.kind != PassKind::DepthCopy);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn validate_rejects_opaque_after_cutout() {
        let mut plan = plan_frame(FrameOptions {
            skybox: false,
            ..FrameOptions::default()
        });
        let forward = plan.passes.last_mut().unwrap();
        forward
            .draws
            .push(Draw::object(SceneObject::Pot, Shading::Lit));
        assert!(plan.validate().is_err());
    }

    #[test]
    fn validate_rejects_gbuffer_draw_on_surface() {
        let mut plan = plan_frame(FrameOptions {
            path: RenderPath::Forward,
            skybox: false,
            ..FrameOptions::default()
        });
        plan.passes[0].draws[0].shading = Shading::GBuffer;
        assert!(plan.validate().is_err());
    }

    #[test]
    fn display_lists_every_pass() {
        let text = plan_frame(FrameOptions::default()).to_string();
        assert!(text.starts_with("frame path=deferred"));
        for kind in ["geometry", "lighting-resolve", "depth-copy", "forward"] {
            assert!(text.contains(&format!("pass {kind}")), "{kind} missing");
        }
        assert!(text.contains("grass"));
        assert!(text.contains("cull=none blend=alpha"));
    }
}
