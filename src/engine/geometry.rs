//! Plain geometry used by the evasion logic. Coordinates are CSS pixels;
//! positions are relative to the bounding container's top-left corner.

use rand::Rng;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// False for sizes coming from detached or not-yet-laid-out elements.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Axis-aligned box in viewport coordinates (what `getBoundingClientRect` returns).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Upper bounds of the draw range for a control inside a container. Negative
/// room (control wider than the container minus margin) collapses to 0.
pub fn draw_range(container: Size, control: Size, margin: f64) -> (f64, f64) {
    let max_x = (container.width - control.width - margin).max(0.0);
    let max_y = (container.height - control.height - margin).max(0.0);
    (max_x, max_y)
}

/// Uniform random top-left position keeping `control` inside `container`.
/// Returns `None` when either size cannot be measured.
pub fn draw_position<R: Rng>(
    container: Size,
    control: Size,
    margin: f64,
    rng: &mut R,
) -> Option<Point> {
    if !container.is_measurable() || !control.is_measurable() || !margin.is_finite() {
        return None;
    }
    let (max_x, max_y) = draw_range(container, control, margin);
    Some(Point::new(rng.gen_range(0.0..=max_x), rng.gen_range(0.0..=max_y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(r.center(), Point::new(60.0, 40.0));
    }

    #[test]
    fn test_draw_position_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let container = Size::new(rng.gen_range(0.0..800.0), rng.gen_range(0.0..800.0));
            let control = Size::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..80.0));
            let (max_x, max_y) = draw_range(container, control, 10.0);
            let p = draw_position(container, control, 10.0, &mut rng).unwrap();
            assert!(p.x >= 0.0 && p.x <= max_x, "x {} outside 0..={}", p.x, max_x);
            assert!(p.y >= 0.0 && p.y <= max_y, "y {} outside 0..={}", p.y, max_y);
        }
    }

    #[test]
    fn test_degenerate_range_collapses_to_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let size = Size::new(120.0, 40.0);
        let p = draw_position(size, size, 10.0, &mut rng).unwrap();
        assert_eq!(p, Point::new(0.0, 0.0));

        // exact fit including margin
        let p = draw_position(Size::new(130.0, 50.0), size, 10.0, &mut rng).unwrap();
        assert_eq!(p, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_unmeasurable_sizes_are_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let ok = Size::new(100.0, 100.0);
        assert!(draw_position(Size::new(f64::NAN, 10.0), ok, 10.0, &mut rng).is_none());
        assert!(draw_position(ok, Size::new(-1.0, 10.0), 10.0, &mut rng).is_none());
    }
}
