//! CPU mirrors of the WGSL uniform blocks. Every vec3 is padded to a vec4.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};
use tabletop_render::{FrameInputs, ObjectInstance};
use tabletop_scene::{DeferredLight, DirLight, PointLight, SpotLight};

fn v4(v: Vec3, w: f32) -> [f32; 4] {
    v.extend(w).to_array()
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GlobalsUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub sky_view: [[f32; 4]; 4],
    pub view_pos: [f32; 4],
}

impl GlobalsUniform {
    pub fn from_inputs(inputs: &FrameInputs) -> Self {
        Self {
            view: inputs.view.to_cols_array_2d(),
            projection: inputs.projection.to_cols_array_2d(),
            sky_view: inputs.sky_view.to_cols_array_2d(),
            view_pos: v4(inputs.eye, 1.0),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct DirLightUniform {
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

impl From<&DirLight> for DirLightUniform {
    fn from(l: &DirLight) -> Self {
        Self {
            direction: v4(l.direction, 0.0),
            ambient: v4(l.ambient, 0.0),
            diffuse: v4(l.diffuse, 0.0),
            specular: v4(l.specular, 0.0),
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
}

impl From<&PointLight> for PointLightUniform {
    fn from(l: &PointLight) -> Self {
        let a = l.attenuation;
        Self {
            position: v4(l.position, 1.0),
            ambient: v4(l.ambient, 0.0),
            diffuse: v4(l.diffuse, 0.0),
            specular: v4(l.specular, 0.0),
            attenuation: [a.constant, a.linear, a.quadratic, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 4],
    pub direction: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub attenuation: [f32; 4],
    pub cut_off: [f32; 4],
}

impl From<&SpotLight> for SpotLightUniform {
    fn from(l: &SpotLight) -> Self {
        let a = l.attenuation;
        Self {
            position: v4(l.position, 1.0),
            direction: v4(l.direction, 0.0),
            ambient: v4(l.ambient, 0.0),
            diffuse: v4(l.diffuse, 0.0),
            specular: v4(l.specular, 0.0),
            attenuation: [a.constant, a.linear, a.quadratic, 0.0],
            cut_off: [l.cut_off, l.outer_cut_off, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct DeferredLightUniform {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub falloff: [f32; 4],
}

impl From<&DeferredLight> for DeferredLightUniform {
    fn from(l: &DeferredLight) -> Self {
        Self {
            position: v4(l.position, 1.0),
            color: v4(l.color, 1.0),
            falloff: [l.linear, l.quadratic, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct LightsUniform {
    pub dir: DirLightUniform,
    pub point: PointLightUniform,
    pub spot: SpotLightUniform,
    pub deferred: DeferredLightUniform,
    pub material: [f32; 4],
}

impl LightsUniform {
    pub fn from_inputs(inputs: &FrameInputs) -> Self {
        Self {
            dir: (&inputs.dir_light).into(),
            point: (&inputs.point_light).into(),
            spot: (&inputs.spot_light).into(),
            deferred: (&inputs.deferred_light).into(),
            material: [inputs.shininess, 0.0, 0.0, 0.0],
        }
    }
}

/// Model and normal matrix. WGSL lays out `mat3x3<f32>` as three padded
/// columns.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
}

impl ModelUniform {
    pub fn new(model: Mat4, normal: Mat3) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal: [
                v4(normal.x_axis, 0.0),
                v4(normal.y_axis, 0.0),
                v4(normal.z_axis, 0.0),
            ],
        }
    }
}

impl From<&ObjectInstance> for ModelUniform {
    fn from(inst: &ObjectInstance) -> Self {
        Self::new(inst.model, inst.normal)
    }
}

/// Round `size` up to the next multiple of `alignment`.
pub fn align_to(size: u64, alignment: u64) -> u64 {
    if alignment == 0 {
        return size;
    }
    size.div_ceil(alignment) * alignment
}

/// sRGB-encoded channel to linear, for clear colours picked in sRGB space.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_scene::ProgramState;

    #[test]
    fn uniform_sizes_match_wgsl() {
        assert_eq!(std::mem::size_of::<GlobalsUniform>(), 208);
        assert_eq!(std::mem::size_of::<DirLightUniform>(), 64);
        assert_eq!(std::mem::size_of::<PointLightUniform>(), 80);
        assert_eq!(std::mem::size_of::<SpotLightUniform>(), 112);
        assert_eq!(std::mem::size_of::<DeferredLightUniform>(), 48);
        assert_eq!(std::mem::size_of::<LightsUniform>(), 320);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 112);
    }

    #[test]
    fn lights_carry_state() {
        let mut state = ProgramState::default();
        state.toggle_spotlight();
        let inputs = FrameInputs::from_state(&state, 1.0);
        let lights = LightsUniform::from_inputs(&inputs);
        assert_eq!(lights.material[0], 32.0);
        assert_eq!(lights.point.position, [4.0, 4.0, 0.0, 1.0]);
        assert_eq!(lights.point.attenuation, [1.0, 0.09, 0.032, 0.0]);
        assert_eq!(lights.spot.diffuse, [1.0, 1.0, 1.0, 0.0]);
        assert_eq!(lights.deferred.falloff, [0.7, 1.8, 0.0, 0.0]);
        assert!(lights.spot.cut_off[0] > lights.spot.cut_off[1]);
    }

    #[test]
    fn model_uniform_pads_normal_columns() {
        let m = ModelUniform::new(Mat4::IDENTITY, Mat3::IDENTITY);
        assert_eq!(m.normal[1], [0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn alignment() {
        assert_eq!(align_to(112, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(7, 0), 7);
    }

    #[test]
    fn srgb_conversion_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
