use std::fmt;

/// Shader program family used by a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Writes position, normal and albedo+specular into the G-buffer.
    GBuffer,
    /// Full-screen resolve of the G-buffer against one point light.
    DeferredResolve,
    /// Forward Phong shading with directional, point and spot lights.
    Lit,
    /// Unlit texture with alpha cutout.
    Cutout,
    /// Cube-map background.
    Sky,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cull {
    None,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blend {
    Replace,
    Alpha,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthTest {
    /// No depth attachment is touched.
    Disabled,
    /// Less-than compare with depth writes.
    Less,
    /// Less-or-equal compare, depth left untouched. Lets geometry at the
    /// far plane pass where nothing else was drawn.
    LessEqualReadOnly,
}

/// Fixed-function state a draw needs from its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawState {
    pub cull: Cull,
    pub blend: Blend,
    pub depth: DepthTest,
}

/// Where a draw's colour output lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    GBuffer,
    Surface,
}

impl Shading {
    pub fn state(self) -> DrawState {
        match self {
            Shading::GBuffer | Shading::Lit => DrawState {
                cull: Cull::Back,
                blend: Blend::Replace,
                depth: DepthTest::Less,
            },
            Shading::Cutout => DrawState {
                cull: Cull::None,
                blend: Blend::Alpha,
                depth: DepthTest::Less,
            },
            Shading::Sky => DrawState {
                cull: Cull::None,
                blend: Blend::Replace,
                depth: DepthTest::LessEqualReadOnly,
            },
            Shading::DeferredResolve => DrawState {
                cull: Cull::None,
                blend: Blend::Replace,
                depth: DepthTest::Disabled,
            },
        }
    }

    pub fn target(self) -> RenderTarget {
        match self {
            Shading::GBuffer => RenderTarget::GBuffer,
            _ => RenderTarget::Surface,
        }
    }

    /// Solid scene geometry. Cutout and sky draws are ordered after it.
    pub fn is_opaque(self) -> bool {
        matches!(
            self,
            Shading::GBuffer | Shading::DeferredResolve | Shading::Lit
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shading::GBuffer => "gbuffer",
            Shading::DeferredResolve => "deferred-resolve",
            Shading::Lit => "lit",
            Shading::Cutout => "cutout",
            Shading::Sky => "sky",
        }
    }
}

impl fmt::Display for Shading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DrawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cull = match self.cull {
            Cull::None => "none",
            Cull::Back => "back",
        };
        let blend = match self.blend {
            Blend::Replace => "replace",
            Blend::Alpha => "alpha",
        };
        let depth = match self.depth {
            DepthTest::Disabled => "off",
            DepthTest::Less => "less",
            DepthTest::LessEqualReadOnly => "lequal/ro",
        };
        write!(f, "cull={cull} blend={blend} depth={depth}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutout_disables_culling_and_blends() {
        let s = Shading::Cutout.state();
        assert_eq!(s.cull, Cull::None);
        assert_eq!(s.blend, Blend::Alpha);
        assert_eq!(s.depth, DepthTest::Less);
    }

    #[test]
    fn sky_tests_lequal_without_writing() {
        assert_eq!(Shading::Sky.state().depth, DepthTest::LessEqualReadOnly);
    }

    #[test]
    fn only_gbuffer_targets_gbuffer() {
        for shading in [
            Shading::DeferredResolve,
            Shading::Lit,
            Shading::Cutout,
            Shading::Sky,
        ] {
            assert_eq!(shading.target(), RenderTarget::Surface);
        }
        assert_eq!(Shading::GBuffer.target(), RenderTarget::GBuffer);
        assert_eq!(Shading::GBuffer.state(), Shading::Lit.state());
    }
}
