//! Fixed-function state from the frame plan, translated to wgpu.

use tabletop_render::{Blend, Cull, DepthTest, DrawState};

use crate::gbuffer::DEPTH_FORMAT;

pub fn primitive_state(cull: Cull) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: match cull {
            Cull::None => None,
            Cull::Back => Some(wgpu::Face::Back),
        },
        ..Default::default()
    }
}

pub fn blend_state(blend: Blend) -> wgpu::BlendState {
    match blend {
        Blend::Replace => wgpu::BlendState::REPLACE,
        Blend::Alpha => wgpu::BlendState::ALPHA_BLENDING,
    }
}

pub fn depth_stencil_state(depth: DepthTest) -> Option<wgpu::DepthStencilState> {
    let (depth_write_enabled, depth_compare) = match depth {
        DepthTest::Disabled => return None,
        DepthTest::Less => (true, wgpu::CompareFunction::Less),
        DepthTest::LessEqualReadOnly => (false, wgpu::CompareFunction::LessEqual),
    };
    Some(wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled,
        depth_compare,
        stencil: Default::default(),
        bias: Default::default(),
    })
}

/// Colour target states for `formats`, all sharing one blend mode.
pub fn color_targets(
    formats: &[wgpu::TextureFormat],
    state: DrawState,
) -> Vec<Option<wgpu::ColorTargetState>> {
    formats
        .iter()
        .map(|&format| {
            Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend_state(state.blend)),
                write_mask: wgpu::ColorWrites::ALL,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_render::Shading;

    #[test]
    fn cutout_pipeline_state() {
        let state = Shading::Cutout.state();
        assert_eq!(primitive_state(state.cull).cull_mode, None);
        assert_eq!(blend_state(state.blend), wgpu::BlendState::ALPHA_BLENDING);
        let depth = depth_stencil_state(state.depth).unwrap();
        assert!(depth.depth_write_enabled);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Less);
    }

    #[test]
    fn sky_pipeline_state() {
        let depth = depth_stencil_state(Shading::Sky.state().depth).unwrap();
        assert!(!depth.depth_write_enabled);
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::LessEqual);
    }

    #[test]
    fn resolve_has_no_depth() {
        assert!(depth_stencil_state(Shading::DeferredResolve.state().depth).is_none());
    }

    #[test]
    fn lit_culls_back_faces() {
        let prim = primitive_state(Shading::Lit.state().cull);
        assert_eq!(prim.cull_mode, Some(wgpu::Face::Back));
        assert_eq!(prim.front_face, wgpu::FrontFace::Ccw);
    }

    #[test]
    fn gbuffer_targets_replace() {
        let targets = color_targets(
            &crate::gbuffer::COLOR_FORMATS,
            Shading::GBuffer.state(),
        );
        assert_eq!(targets.len(), 3);
        assert!(
            targets
                .iter()
                .flatten()
                .all(|t| t.blend == Some(wgpu::BlendState::REPLACE))
        );
    }
}
