use moon_orbit::core::{Canvas, DrawOp};
use moon_orbit::math::Rgba;

const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
const RED: Rgba = Rgba::new(255, 0, 0, 255);

#[test]
fn canvas_starts_transparent() {
    let canvas = Canvas::new(16, 9);
    assert_eq!(canvas.dimensions(), (16, 9));
    assert!(canvas.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
    assert!(canvas.alpha().iter().all(|&a| a == 0.0));
}

#[test]
fn clear_sets_every_pixel_and_alpha() {
    let canvas = Canvas::new(10, 10).draw(DrawOp::Clear(RED)).execute_ops();

    assert_eq!(&canvas.as_bytes()[0..4], &[255, 0, 0, 255]);
    let last = canvas.as_bytes().len() - 4;
    assert_eq!(&canvas.as_bytes()[last..], &[255, 0, 0, 255]);
    assert!(canvas.alpha().iter().all(|&a| a == 1.0));
}

#[test]
fn transparent_clear_leaves_alpha_zero() {
    let canvas = Canvas::new(10, 10)
        .draw(DrawOp::Clear(Rgba::new(255, 255, 255, 0)))
        .execute_ops();

    for alpha in canvas.alpha() {
        assert_eq!(*alpha, 0.0);
    }
}

#[test]
fn ops_apply_in_order() {
    let canvas = Canvas::new(20, 20)
        .draw(DrawOp::Clear(Rgba::new(0, 0, 0, 255)))
        .draw(DrawOp::FilledCircle { cx: 10.0, cy: 10.0, radius: 5.0, color: RED })
        .draw(DrawOp::Point { x: 10, y: 10, color: WHITE })
        .execute_ops();

    assert_eq!(canvas.pixel(10, 10), Some(WHITE));
    assert_eq!(canvas.pixel(12, 10), Some(RED));
    assert_eq!(canvas.pixel(0, 0), Some(Rgba::new(0, 0, 0, 255)));
}

#[test]
fn translucent_points_accumulate() {
    let dim = Rgba::new(255, 255, 255, 100);
    let once = Canvas::new(1, 1).draw(DrawOp::Point { x: 0, y: 0, color: dim }).execute_ops();
    let twice = Canvas::new(1, 1)
        .draw(DrawOp::Point { x: 0, y: 0, color: dim })
        .draw(DrawOp::Point { x: 0, y: 0, color: dim })
        .execute_ops();

    assert!(twice.alpha()[0] > once.alpha()[0]);
    assert!(twice.alpha()[0] < 1.0);
}

#[test]
fn circle_clipped_at_edges() {
    let canvas = Canvas::new(8, 8)
        .draw(DrawOp::FilledCircle { cx: 0.0, cy: 0.0, radius: 3.0, color: RED })
        .execute_ops();

    assert_eq!(canvas.pixel(0, 0), Some(RED));
    assert_eq!(canvas.pixel(7, 7), Some(Rgba::TRANSPARENT));
    assert_eq!(canvas.pixel(8, 0), None);
}

#[test]
fn output_carries_alpha_mask() {
    let output = Canvas::new(2, 1)
        .draw(DrawOp::Point { x: 1, y: 0, color: WHITE })
        .execute_ops()
        .into_output();

    assert_eq!(output.coverage(0), 0.0);
    assert_eq!(output.coverage(1), 1.0);
}
