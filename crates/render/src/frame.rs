use glam::{Mat3, Mat4, Vec3};
use tabletop_scene::{
    DeferredLight, DirLight, MATERIAL_SHININESS, PointLight, ProgramState, SceneObject, SpotLight,
};

/// Model and normal matrix for one placed object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectInstance {
    pub object: SceneObject,
    pub model: Mat4,
    /// Inverse-transpose of the model matrix's upper 3x3.
    pub normal: Mat3,
}

impl ObjectInstance {
    pub fn new(object: SceneObject, model: Mat4) -> Self {
        Self {
            object,
            model,
            normal: Mat3::from_mat4(model).inverse().transpose(),
        }
    }
}

/// Per-frame values every backend needs, derived from program state.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInputs {
    pub view: Mat4,
    pub projection: Mat4,
    /// View without translation, so the sky stays at infinity.
    pub sky_view: Mat4,
    pub eye: Vec3,
    pub clear_color: Vec3,
    pub dir_light: DirLight,
    pub point_light: PointLight,
    pub spot_light: SpotLight,
    pub deferred_light: DeferredLight,
    pub shininess: f32,
    pub instances: Vec<ObjectInstance>,
}

impl FrameInputs {
    pub fn from_state(state: &ProgramState, aspect: f32) -> Self {
        let camera = &state.camera;
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect),
            sky_view: camera.rotation_only_view(),
            eye: camera.position,
            clear_color: state.clear_color,
            dir_light: DirLight::default(),
            point_light: state.point_light,
            spot_light: state.spot_light(),
            deferred_light: DeferredLight::at(state.point_light.position),
            shininess: MATERIAL_SHININESS,
            instances: SceneObject::placed()
                .map(|obj| ObjectInstance::new(obj, obj.model_matrix(state)))
                .collect(),
        }
    }

    pub fn instance(&self, object: SceneObject) -> Option<&ObjectInstance> {
        self.instances.iter().find(|i| i.object == object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_follow_state() {
        let mut state = ProgramState::default();
        state.clear_color = Vec3::new(0.1, 0.2, 0.3);
        state.toggle_spotlight();
        let inputs = FrameInputs::from_state(&state, 800.0 / 600.0);

        assert_eq!(inputs.eye, state.camera.position);
        assert_eq!(inputs.clear_color, state.clear_color);
        assert_eq!(inputs.spot_light.diffuse, Vec3::ONE);
        assert_eq!(inputs.deferred_light.position, state.point_light.position);
        assert_eq!(inputs.instances.len(), SceneObject::placed().count());
        assert!(inputs.instance(SceneObject::Skybox).is_none());
    }

    #[test]
    fn sky_view_has_no_translation() {
        let mut state = ProgramState::default();
        state.camera.position = Vec3::new(10.0, -3.0, 7.0);
        let inputs = FrameInputs::from_state(&state, 1.0);
        assert_eq!(inputs.sky_view.w_axis.truncate(), Vec3::ZERO);
        assert_ne!(inputs.view.w_axis.truncate(), Vec3::ZERO);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let inst = ObjectInstance::new(
            SceneObject::Platform,
            Mat4::from_scale(Vec3::new(15.0, 2.0, 15.0)),
        );
        let n = (inst.normal * Vec3::Y).normalize();
        assert!((n - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let inputs = FrameInputs::from_state(&ProgramState::default(), 0.0);
        assert!(inputs.projection.is_finite());
    }
}
