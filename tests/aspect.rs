use backdrop_wasm::aspect::{aspect_resolution, DisplaySize};
use backdrop_wasm::frame::plan_frame;

fn approx_eq2(a: (f32, f32), b: (f32, f32), eps: f32) -> bool {
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

#[test]
fn mirrored_aspects_swap_axes() {
    let wide = aspect_resolution(DisplaySize::new(1920, 1080));
    let tall = aspect_resolution(DisplaySize::new(1080, 1920));
    assert!(approx_eq2(wide, (tall.1, tall.0), 1e-6));
    assert_eq!(wide.1, 1.0);
    assert_eq!(tall.0, 1.0);
}

#[test]
fn resolution_is_scale_invariant() {
    // the same aspect at different pixel densities maps to the same pair
    let samples = [(1920, 1080), (960, 540), (480, 270), (192, 108)];
    let reference = aspect_resolution(DisplaySize::new(16, 9));
    for &(w, h) in &samples {
        let res = aspect_resolution(DisplaySize::new(w, h));
        assert!(approx_eq2(res, reference, 1e-5), "{w}x{h} -> {res:?}");
    }
}

#[test]
fn shorter_side_is_always_unit() {
    let samples = [(300, 150), (150, 300), (1024, 1024), (2560, 1440)];
    for &(w, h) in &samples {
        let (x, y) = aspect_resolution(DisplaySize::new(w, h));
        assert_eq!(if w > h { y } else { x }, 1.0, "{w}x{h}");
    }
}

#[test]
fn frame_plan_carries_the_normalized_resolution() {
    let plan = plan_frame(500.0, 1.0, DisplaySize::new(1080, 1920));
    assert!(approx_eq2(plan.resolution, (1.0, 1920.0 / 1080.0), 1e-6));
    assert_eq!(plan.viewport, DisplaySize::new(1080, 1920));
}
