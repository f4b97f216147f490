//! GLSL ES 3.00 sources and the quad geometry for the backdrop program.

/// Passes clip-space positions straight through and hands the fragment stage
/// the position as a uv coordinate.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec4 a_position;
out vec2 uv;
void main() {
    uv = a_position.xy;
    gl_Position = a_position;
}"#;

/// Banded gradient-noise field drifting along a fixed direction over time.
pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec2 uv;
out vec4 outColor;

uniform vec2 u_res;
uniform float u_time;

vec2 random2(vec2 st){
    st = vec2( dot(st,vec2(127.1,311.7)),
              dot(st,vec2(269.5,183.3)) );
    return -1.0 + 2.0*fract(sin(st)*43758.5453123);
}

float noise(vec2 st) {
    vec2 i = floor(st);
    vec2 f = fract(st);

    vec2 u = f*f*(3.0-2.0*f);

    return mix( mix( dot( random2(i + vec2(0.0,0.0) ), f - vec2(0.0,0.0) ),
                     dot( random2(i + vec2(1.0,0.0) ), f - vec2(1.0,0.0) ), u.x),
                mix( dot( random2(i + vec2(0.0,1.0) ), f - vec2(0.0,1.0) ),
                     dot( random2(i + vec2(1.0,1.0) ), f - vec2(1.0,1.0) ), u.x), u.y);
}

void main()
{
    vec2 pos = uv * u_res;

    vec3 c1 = vec3(0.0, 0.15, 0.25);
    vec3 c2 = vec3(0.05, 0.05, 0.1);

    vec2 dir = normalize(vec2(1.0, 2.0));
    float zoom = 2.5;

    float t = u_time * 0.1;

    float n = sin(noise(noise(noise(pos * zoom + dir * t) * uv * uv) * uv * uv));
    float div = 8.;

    float m = floor(div * n) / div;
    float k = n - m;
    vec3 color = mix(c1, c2, m);
    color = mix(color, color * 1.2, k * div);
    outColor = vec4(color, 1.0);
}"#;

/// Full-screen quad, drawn as a triangle fan. Uploaded once, never rewritten.
pub const QUAD_VERTICES: [f32; 8] = [
    -1.0, -1.0, //
    -1.0, 1.0, //
    1.0, 1.0, //
    1.0, -1.0, //
];
