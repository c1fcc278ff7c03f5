//! WGSL source for the point-cloud shader.
//!
//! Vertex stage contract: three instance-step attribute buffers
//! (`origin`, `final_position`, `random_move`) plus the uniform block
//! (time, point size, pointer world position, camera matrix, viewport).
//! Each particle is expanded into a screen-aligned quad whose center morphs
//! from `origin` toward `final_position` over time, with drift-modulated
//! jitter and a repulsion term around the pointer. The fragment stage draws
//! a soft disc; additive blending is configured on the pipeline, not here.

pub const SHADER_SOURCE: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    pointer_world: vec3<f32>,
    time: f32,
    point_size: f32,
    viewport: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
    @location(1) color: vec3<f32>,
};

const INSIDE_COLOR: vec3<f32> = vec3<f32>(1.0, 0.376, 0.188);
const OUTSIDE_COLOR: vec3<f32> = vec3<f32>(0.106, 0.224, 0.518);

// Time for a particle to travel from its origin to the surface target.
const MORPH_SECONDS: f32 = 4.0;
// Pointer repulsion radius and strength in world units.
const POINTER_RADIUS: f32 = 0.75;
const POINTER_PUSH: f32 = 0.6;

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) origin: vec3<f32>,
    @location(1) final_position: vec3<f32>,
    @location(2) random_move: vec3<f32>,
) -> VertexOutput {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );
    let corner = corners[vertex_index];

    // Morph from the random cloud toward the sampled surface.
    let progress = smoothstep(0.0, MORPH_SECONDS, u.time);
    var world = mix(origin, final_position, progress);

    // Drift-modulated jitter, dephased per particle by its origin.
    let phase = dot(origin.xy, vec2<f32>(12.9898, 78.233));
    world += random_move * sin(u.time * 1.5 + phase) * 0.12;

    // Push particles away from the pointer.
    let away = world - u.pointer_world;
    let dist = length(away);
    if dist < POINTER_RADIUS {
        world += (away / max(dist, 1e-4)) * (POINTER_RADIUS - dist) * POINTER_PUSH;
    }

    var clip = u.view_proj * vec4<f32>(world, 1.0);

    // Constant clip-space offset; the perspective divide then shrinks the
    // on-screen quad by 1/w, so distant particles render smaller.
    let radius_ndc = u.point_size / u.viewport;
    clip = vec4<f32>(clip.xy + corner * radius_ndc * 2.0, clip.z, clip.w);

    var out: VertexOutput;
    out.clip_position = clip;
    out.uv = corner;
    out.color = mix(INSIDE_COLOR, OUTSIDE_COLOR, progress);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let dist = length(in.uv);
    if dist > 1.0 {
        discard;
    }
    let alpha = 1.0 - smoothstep(0.0, 1.0, dist);
    return vec4<f32>(in.color * alpha, alpha);
}
"#;
