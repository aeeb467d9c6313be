//! WGSL sources for the mesh and particle pipelines.
//!
//! Both pipelines share the same uniform block, so the Rust-side
//! [`Uniforms`](super::Uniforms) struct matches the WGSL layout exactly.

/// Shared uniform block, mirrored by `gpu::Uniforms`.
const UNIFORMS_WGSL: &str = r#"struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec3<f32>,
    time: f32,
    base_color: vec3<f32>,
    emissive: f32,
    fog_near: f32,
    fog_far: f32,
    ambient: f32,
    key_intensity: f32,
    rim_intensity: f32,
    metalness: f32,
    roughness: f32,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;
"#;

const MESH_BODY: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

@vertex
fn vs_main(
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(position, 1.0);
    out.world_pos = position;
    out.normal = normal;
    return out;
}

const KEY_LIGHT_POS: vec3<f32> = vec3<f32>(10.0, 10.0, 10.0);
const RIM_LIGHT_POS: vec3<f32> = vec3<f32>(-10.0, -10.0, 10.0);
const BACKGROUND: vec3<f32> = vec3<f32>(0.02, 0.02, 0.05);

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.normal);
    let view_dir = normalize(uniforms.camera_pos - in.world_pos);

    var color = uniforms.base_color * uniforms.ambient;

    // Key light: diffuse plus a roughness-widened specular lobe.
    let key_dir = normalize(KEY_LIGHT_POS - in.world_pos);
    let key_diffuse = max(dot(n, key_dir), 0.0);
    let half_vec = normalize(key_dir + view_dir);
    let shininess = mix(64.0, 8.0, uniforms.roughness);
    let specular = pow(max(dot(n, half_vec), 0.0), shininess);
    let spec_tint = mix(vec3<f32>(1.0, 1.0, 1.0), uniforms.base_color, uniforms.metalness);
    color += uniforms.base_color * key_diffuse * uniforms.key_intensity;
    color += spec_tint * specular * uniforms.key_intensity;

    // Rim light, diffuse only.
    let rim_dir = normalize(RIM_LIGHT_POS - in.world_pos);
    color += uniforms.base_color * max(dot(n, rim_dir), 0.0) * uniforms.rim_intensity;

    color += uniforms.base_color * uniforms.emissive;

    // Linear fog toward the clear color.
    let dist = length(uniforms.camera_pos - in.world_pos);
    let fog = clamp(
        (dist - uniforms.fog_near) / max(uniforms.fog_far - uniforms.fog_near, 0.001),
        0.0,
        1.0,
    );
    color = mix(color, BACKGROUND, fog);

    return vec4<f32>(color, 1.0);
}
"#;

const PARTICLE_BODY: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
    @location(2) fog: f32,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) particle_pos: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];
    let particle_size = 0.02;

    var clip_pos = uniforms.view_proj * vec4<f32>(particle_pos, 1.0);
    clip_pos.x += quad_pos.x * particle_size * clip_pos.w;
    clip_pos.y += quad_pos.y * particle_size * clip_pos.w;

    let dist = length(uniforms.camera_pos - particle_pos);
    let fog = clamp(
        (dist - uniforms.fog_near) / max(uniforms.fog_far - uniforms.fog_near, 0.001),
        0.0,
        1.0,
    );

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = min(uniforms.base_color + vec3<f32>(0.25, 0.25, 0.25), vec3<f32>(1.0, 1.0, 1.0));
    out.uv = quad_pos;
    out.fog = fog;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let alpha = (1.0 - smoothstep(0.5, 1.0, dist)) * (1.0 - in.fog);
    return vec4<f32>(in.color, alpha);
}
"#;

/// Full shader for the deformed mesh pipeline.
pub fn mesh_shader() -> String {
    format!("{UNIFORMS_WGSL}{MESH_BODY}")
}

/// Full shader for the particle billboard pipeline.
pub fn particle_shader() -> String {
    format!("{UNIFORMS_WGSL}{PARTICLE_BODY}")
}
