use tabletop_render::Shading;

/// Frame and light uniforms shared by every program (group 0).
pub const COMMON: &str = r#"
struct Globals {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    sky_view: mat4x4<f32>,
    view_pos: vec4<f32>,
};

struct DirLight {
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
};

struct PointLight {
    position: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    // constant, linear, quadratic
    attenuation: vec4<f32>,
};

struct SpotLight {
    position: vec4<f32>,
    direction: vec4<f32>,
    ambient: vec4<f32>,
    diffuse: vec4<f32>,
    specular: vec4<f32>,
    attenuation: vec4<f32>,
    // cos(inner), cos(outer)
    cut_off: vec4<f32>,
};

struct DeferredLight {
    position: vec4<f32>,
    color: vec4<f32>,
    // linear, quadratic
    falloff: vec4<f32>,
};

struct Lights {
    dir: DirLight,
    point: PointLight,
    spot: SpotLight,
    deferred: DeferredLight,
    // x = shininess
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(0) @binding(1)
var<uniform> lights: Lights;
"#;

/// Per-object transform, material textures and the shared mesh vertex stage.
pub const MESH: &str = r#"
struct ModelData {
    model: mat4x4<f32>,
    normal: mat3x3<f32>,
};

@group(1) @binding(0)
var<uniform> model_data: ModelData;

@group(2) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(2) @binding(1)
var t_specular: texture_2d<f32>;
@group(2) @binding(2)
var s_material: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = model_data.model * vec4<f32>(vertex.position, 1.0);
    var out: VertexOutput;
    out.clip_position = globals.projection * globals.view * world;
    out.world_pos = world.xyz;
    out.normal = model_data.normal * vertex.normal;
    out.uv = vertex.uv;
    return out;
}
"#;

/// Writes world position, normal and albedo+specular into the G-buffer.
pub const GBUFFER: &str = r#"
struct GBufferOutput {
    @location(0) position: vec4<f32>,
    @location(1) normal: vec4<f32>,
    @location(2) albedo_spec: vec4<f32>,
};

@fragment
fn fs_main(in: VertexOutput) -> GBufferOutput {
    let albedo = textureSample(t_diffuse, s_material, in.uv).rgb;
    let spec = textureSample(t_specular, s_material, in.uv).r;

    var out: GBufferOutput;
    // w = 1 marks covered pixels for the lighting pass.
    out.position = vec4<f32>(in.world_pos, 1.0);
    out.normal = vec4<f32>(normalize(in.normal), 0.0);
    out.albedo_spec = vec4<f32>(albedo, spec);
    return out;
}
"#;

/// Phong shading with one directional, one point and one spot light.
pub const LIT: &str = r#"
fn falloff(att: vec4<f32>, distance: f32) -> f32 {
    let denom = att.x + att.y * distance + att.z * distance * distance;
    return select(1.0 / denom, 0.0, denom <= 1e-6);
}

fn dir_light(light: DirLight, normal: vec3<f32>, view_dir: vec3<f32>, albedo: vec3<f32>, spec_map: vec3<f32>) -> vec3<f32> {
    let light_dir = normalize(-light.direction.xyz);
    let diff = max(dot(normal, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, normal);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), lights.material.x);
    return light.ambient.rgb * albedo
        + light.diffuse.rgb * diff * albedo
        + light.specular.rgb * spec * spec_map;
}

fn point_light(light: PointLight, normal: vec3<f32>, frag_pos: vec3<f32>, view_dir: vec3<f32>, albedo: vec3<f32>, spec_map: vec3<f32>) -> vec3<f32> {
    let light_dir = normalize(light.position.xyz - frag_pos);
    let diff = max(dot(normal, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, normal);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), lights.material.x);
    let attenuation = falloff(light.attenuation, length(light.position.xyz - frag_pos));
    return (light.ambient.rgb * albedo
        + light.diffuse.rgb * diff * albedo
        + light.specular.rgb * spec * spec_map) * attenuation;
}

fn spot_light(light: SpotLight, normal: vec3<f32>, frag_pos: vec3<f32>, view_dir: vec3<f32>, albedo: vec3<f32>, spec_map: vec3<f32>) -> vec3<f32> {
    let light_dir = normalize(light.position.xyz - frag_pos);
    let diff = max(dot(normal, light_dir), 0.0);
    let reflect_dir = reflect(-light_dir, normal);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), lights.material.x);
    let attenuation = falloff(light.attenuation, length(light.position.xyz - frag_pos));
    let theta = dot(light_dir, normalize(-light.direction.xyz));
    let epsilon = light.cut_off.x - light.cut_off.y;
    let intensity = clamp((theta - light.cut_off.y) / epsilon, 0.0, 1.0);
    return (light.ambient.rgb * albedo
        + light.diffuse.rgb * diff * albedo
        + light.specular.rgb * spec * spec_map) * attenuation * intensity;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let albedo = textureSample(t_diffuse, s_material, in.uv).rgb;
    let spec_map = textureSample(t_specular, s_material, in.uv).rgb;
    let normal = normalize(in.normal);
    let view_dir = normalize(globals.view_pos.xyz - in.world_pos);

    var result = dir_light(lights.dir, normal, view_dir, albedo, spec_map);
    result += point_light(lights.point, normal, in.world_pos, view_dir, albedo, spec_map);
    result += spot_light(lights.spot, normal, in.world_pos, view_dir, albedo, spec_map);
    return vec4<f32>(result, 1.0);
}
"#;

/// Unlit texture; fragments below the alpha threshold are dropped.
pub const CUTOUT: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(t_diffuse, s_material, in.uv);
    if color.a < 0.1 {
        discard;
    }
    return color;
}
"#;

/// Full-screen resolve of the G-buffer against the deferred point light.
pub const DEFERRED_LIGHTING: &str = r#"
@group(1) @binding(0)
var g_position: texture_2d<f32>;
@group(1) @binding(1)
var g_normal: texture_2d<f32>;
@group(1) @binding(2)
var g_albedo_spec: texture_2d<f32>;

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4<f32> {
    // One triangle that covers the whole viewport.
    let uv = vec2<f32>(f32((index << 1u) & 2u), f32(index & 2u));
    return vec4<f32>(uv * 2.0 - 1.0, 0.0, 1.0);
}

@fragment
fn fs_main(@builtin(position) coord: vec4<f32>) -> @location(0) vec4<f32> {
    let texel = vec2<i32>(coord.xy);
    let position = textureLoad(g_position, texel, 0);
    if position.w == 0.0 {
        discard;
    }
    let frag_pos = position.xyz;
    let normal = normalize(textureLoad(g_normal, texel, 0).xyz);
    let albedo_spec = textureLoad(g_albedo_spec, texel, 0);
    let albedo = albedo_spec.rgb;

    var lighting = albedo * 0.1;
    let view_dir = normalize(globals.view_pos.xyz - frag_pos);

    let light = lights.deferred;
    let light_dir = normalize(light.position.xyz - frag_pos);
    let diffuse = max(dot(normal, light_dir), 0.0) * albedo * light.color.rgb;
    let halfway = normalize(light_dir + view_dir);
    let spec = pow(max(dot(normal, halfway), 0.0), 16.0);
    let specular = light.color.rgb * spec * albedo_spec.a;
    let distance = length(light.position.xyz - frag_pos);
    let attenuation = 1.0 / (1.0 + light.falloff.x * distance + light.falloff.y * distance * distance);
    lighting += (diffuse + specular) * attenuation;

    return vec4<f32>(lighting, 1.0);
}
"#;

/// Cube-map background pinned to the far plane.
pub const SKYBOX: &str = r#"
@group(1) @binding(0)
var t_sky: texture_cube<f32>;
@group(1) @binding(1)
var s_sky: sampler;

struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) direction: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> SkyOutput {
    let clip = globals.projection * globals.sky_view * vec4<f32>(position, 1.0);
    var out: SkyOutput;
    // z = w puts every sky fragment at depth 1.0.
    out.clip_position = clip.xyww;
    out.direction = position;
    return out;
}

@fragment
fn fs_main(in: SkyOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(textureSample(t_sky, s_sky, in.direction).rgb, 1.0);
}
"#;

/// Complete WGSL module for a shading family.
pub fn source(shading: Shading) -> String {
    match shading {
        Shading::GBuffer => format!("{COMMON}{MESH}{GBUFFER}"),
        Shading::Lit => format!("{COMMON}{MESH}{LIT}"),
        Shading::Cutout => format!("{COMMON}{MESH}{CUTOUT}"),
        Shading::DeferredResolve => format!("{COMMON}{DEFERRED_LIGHTING}"),
        Shading::Sky => format!("{COMMON}{SKYBOX}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Shading; 5] = [
        Shading::GBuffer,
        Shading::DeferredResolve,
        Shading::Lit,
        Shading::Cutout,
        Shading::Sky,
    ];

    #[test]
    fn every_module_has_both_entry_points() {
        for shading in ALL {
            let src = source(shading);
            assert_eq!(src.matches("fn vs_main").count(), 1, "{shading}");
            assert_eq!(src.matches("fn fs_main").count(), 1, "{shading}");
        }
    }

    #[test]
    fn gbuffer_writes_three_targets() {
        let src = source(Shading::GBuffer);
        for loc in 0..3 {
            assert!(src.contains(&format!("@location({loc}) ")));
        }
    }

    #[test]
    fn cutout_and_resolve_discard() {
        assert!(source(Shading::Cutout).contains("discard"));
        assert!(source(Shading::DeferredResolve).contains("discard"));
        assert!(!source(Shading::Lit).contains("discard"));
    }
}
