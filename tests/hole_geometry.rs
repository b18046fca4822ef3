use hamaguri_overlay::geometry::{compute_geometry, round_half_up, to_logical, MaskRect};
use hamaguri_overlay::{LogicalRect, PhysicalRect, ScaleFactor, Viewport};

fn scale(value: f64) -> ScaleFactor {
    ScaleFactor::new(value).unwrap()
}

fn covered_by(rect: &MaskRect, x: i32, y: i32) -> usize {
    usize::from(rect.contains(x, y))
}

#[test]
fn masks_and_hole_tile_the_viewport() {
    let viewport = Viewport::new(64, 48);
    let holes = [
        PhysicalRect::new(10, 8, 30, 20),
        PhysicalRect::new(0, 0, 64, 48),
        PhysicalRect::new(0, 5, 20, 48),
        PhysicalRect::new(40, 0, 64, 10),
        PhysicalRect::new(63, 47, 64, 48),
    ];

    for physical in holes {
        let geometry = compute_geometry(Some(&physical), scale(1.0), viewport).unwrap();
        let hole = MaskRect::from(geometry.hole);

        for y in 0..viewport.height {
            for x in 0..viewport.width {
                let count = covered_by(&hole, x, y)
                    + geometry
                        .masks
                        .iter()
                        .map(|mask| covered_by(mask, x, y))
                        .sum::<usize>();
                assert_eq!(count, 1, "pixel ({x}, {y}) covered {count} times for {physical:?}");
            }
        }
    }
}

#[test]
fn scale_two_halves_the_rectangle() {
    let physical = PhysicalRect::new(100, 50, 500, 450);
    let geometry = compute_geometry(Some(&physical), scale(2.0), Viewport::new(960, 540)).unwrap();

    assert_eq!(
        geometry.hole,
        LogicalRect {
            left: 50,
            top: 25,
            width: 200,
            height: 200
        }
    );
    assert_eq!(geometry.hole.right(), 250);
    assert_eq!(geometry.hole.bottom(), 225);

    assert_eq!(geometry.masks.top, MaskRect::new(0, 0, 960, 25));
    assert_eq!(geometry.masks.bottom, MaskRect::new(0, 225, 960, 315));
    assert_eq!(geometry.masks.left, MaskRect::new(0, 25, 50, 200));
    assert_eq!(geometry.masks.right, MaskRect::new(250, 25, 710, 200));
}

#[test]
fn fractional_scale_rounds_each_edge_independently() {
    // 1.25: 101/1.25 = 80.8, 203/1.25 = 162.4, width 301/1.25 = 240.8
    let physical = PhysicalRect::new(101, 203, 402, 603);
    let hole = to_logical(&physical, scale(1.25));
    assert_eq!(hole.left, 81);
    assert_eq!(hole.top, 162);
    assert_eq!(hole.width, 241);
    assert_eq!(hole.height, 320);
    assert_eq!(round_half_up(162.5), 163);
}

#[test]
fn zero_width_rectangle_is_rendered_as_is() {
    let physical = PhysicalRect::new(200, 100, 200, 300);
    let geometry = compute_geometry(Some(&physical), scale(1.0), Viewport::new(800, 600)).unwrap();

    assert_eq!(geometry.hole.width, 0);
    assert!(geometry.hole.is_degenerate());
    // Left and right masks meet where the hole would be
    assert_eq!(geometry.masks.left.left + geometry.masks.left.width, geometry.masks.right.left);
    assert_eq!(geometry.masks.top.width, 800);
    assert_eq!(geometry.masks.bottom.width, 800);
}

#[test]
fn hole_outside_viewport_keeps_masks_non_negative() {
    let physical = PhysicalRect::new(-50, -20, 100, 80);
    let geometry = compute_geometry(Some(&physical), scale(1.0), Viewport::new(640, 480)).unwrap();

    assert_eq!(geometry.hole.left, -50);
    assert_eq!(geometry.hole.top, -20);
    assert!(geometry.masks.iter().all(|mask| mask.width >= 0 && mask.height >= 0));
    assert_eq!(geometry.masks.top.height, 0);
    assert_eq!(geometry.masks.left.width, 0);
}

#[test]
fn no_rectangle_means_no_geometry() {
    assert!(compute_geometry(None, scale(1.5), Viewport::new(100, 100)).is_none());
}
