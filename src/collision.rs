//! Collision detection and push-out resolution
//!
//! Pure pairwise geometry over `Positioned` bodies. Detection is symmetric;
//! the resolving variants move only the first argument, so a caller can
//! consistently treat `a` as the movable body and `b` as terrain without any
//! notion of mass or velocity.

use glam::Vec2;

use crate::center_of;
use crate::entity::Positioned;

/// Face of separation for a rectangle contact, named from `a`'s perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// Result of a rectangle overlap test
///
/// Transient: consumed immediately by the caller or by
/// [`resolve_rectangles`], never persisted.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Center-to-center delta on x, `b` relative to `a`
    pub dx: f32,
    /// Center-to-center delta on y, `b` relative to `a`
    pub dy: f32,
    /// Face with the smallest overlap magnitude
    pub side: Side,
    pub overlap_x: f32,
    pub overlap_y: f32,
}

/// Test two axis-aligned rectangles for overlap.
///
/// Overlap exists iff the center distance is strictly less than the summed
/// half-extents on both axes. The reported `side` is the axis with the
/// smaller overlap; an exact tie goes horizontal.
pub fn rectangles(
    a: &(impl Positioned + ?Sized),
    b: &(impl Positioned + ?Sized),
) -> Option<Contact> {
    let half_a = Vec2::new(a.width(), a.height()) * 0.5;
    let half_b = Vec2::new(b.width(), b.height()) * 0.5;
    let half_total = half_a + half_b;

    let delta = center_of(b) - center_of(a);

    if delta.x.abs() >= half_total.x || delta.y.abs() >= half_total.y {
        return None;
    }

    let overlap_x = half_total.x - delta.x.abs();
    let overlap_y = half_total.y - delta.y.abs();

    let side = if overlap_y < overlap_x {
        if delta.y > 0.0 { Side::Bottom } else { Side::Top }
    } else if delta.x > 0.0 {
        Side::Right
    } else {
        Side::Left
    };

    Some(Contact {
        dx: delta.x,
        dy: delta.y,
        side,
        overlap_x,
        overlap_y,
    })
}

/// Test two bodies as circles.
///
/// Each body's radius is half its **width**; height plays no part (bodies
/// are assumed square for circular collision). Overlap iff the center
/// distance is strictly less than the radius sum.
pub fn circles(a: &(impl Positioned + ?Sized), b: &(impl Positioned + ?Sized)) -> bool {
    let delta = center_of(b) - center_of(a);
    let radius_sum = (a.width() + b.width()) * 0.5;
    delta.length() < radius_sum
}

/// As [`circles`], but on overlap pushes `a` directly away from `b` along the
/// center-to-center axis by the penetration depth. `b` is never moved.
///
/// Concentric centers (distance exactly zero) leave the push direction
/// undefined: the division below yields non-finite coordinates. Callers that
/// can reach that configuration must separate the pair themselves.
pub fn resolve_circles(a: &mut (impl Positioned + ?Sized), b: &(impl Positioned + ?Sized)) {
    let delta = center_of(b) - center_of(a);
    let distance = delta.length();
    let radius_sum = (a.width() + b.width()) * 0.5;

    if distance < radius_sum {
        let depth = radius_sum - distance;
        a.set_x(a.x() - depth * delta.x / distance);
        a.set_y(a.y() - depth * delta.y / distance);
    }
}

/// As [`rectangles`], but on overlap moves `a` out along the contact side by
/// exactly the matching overlap, separating the pair in one step. Returns the
/// same contact as detection so callers can branch on the side. `b` is never
/// moved.
pub fn resolve_rectangles(
    a: &mut (impl Positioned + ?Sized),
    b: &(impl Positioned + ?Sized),
) -> Option<Contact> {
    let contact = rectangles(a, b)?;

    match contact.side {
        Side::Top => a.set_y(a.y() + contact.overlap_y),
        Side::Bottom => a.set_y(a.y() - contact.overlap_y),
        Side::Left => a.set_x(a.x() + contact.overlap_x),
        Side::Right => a.set_x(a.x() - contact.overlap_x),
    }

    Some(contact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Body {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    }

    impl Body {
        fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
            Self { x, y, w, h }
        }
    }

    impl Positioned for Body {
        fn x(&self) -> f32 {
            self.x
        }
        fn y(&self) -> f32 {
            self.y
        }
        fn width(&self) -> f32 {
            self.w
        }
        fn height(&self) -> f32 {
            self.h
        }
        fn set_x(&mut self, x: f32) {
            self.x = x;
        }
        fn set_y(&mut self, y: f32) {
            self.y = y;
        }
    }

    #[test]
    fn test_separated_rectangles_miss() {
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(20.0, 0.0, 10.0, 10.0);
        assert!(rectangles(&a, &b).is_none());
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Center distance exactly equals the half-extent sum: strict `<` misses
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(10.0, 0.0, 10.0, 10.0);
        assert!(rectangles(&a, &b).is_none());
    }

    #[test]
    fn test_overlap_side_right() {
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(5.0, 0.0, 10.0, 10.0);

        let contact = rectangles(&a, &b).unwrap();
        assert_eq!(contact.side, Side::Right);
        assert!((contact.overlap_x - 5.0).abs() < 0.001);
        assert!((contact.overlap_y - 10.0).abs() < 0.001);
        assert!((contact.dx - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_overlap_side_bottom() {
        // b below a, with a small vertical overlap
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(0.0, 8.0, 10.0, 10.0);

        let contact = rectangles(&a, &b).unwrap();
        assert_eq!(contact.side, Side::Bottom);
        assert!((contact.overlap_y - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_overlap_side_top() {
        let a = Body::new(0.0, 8.0, 10.0, 10.0);
        let b = Body::new(0.0, 0.0, 10.0, 10.0);

        let contact = rectangles(&a, &b).unwrap();
        assert_eq!(contact.side, Side::Top);
    }

    #[test]
    fn test_equal_overlaps_tie_goes_horizontal() {
        // Perfect diagonal offset: overlap_x == overlap_y
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(5.0, 5.0, 10.0, 10.0);

        let contact = rectangles(&a, &b).unwrap();
        assert!((contact.overlap_x - contact.overlap_y).abs() < 0.001);
        assert_eq!(contact.side, Side::Right);
    }

    #[test]
    fn test_resolve_rectangles_separates_in_one_step() {
        let mut a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(5.0, 0.0, 10.0, 10.0);

        let contact = resolve_rectangles(&mut a, &b).unwrap();
        assert_eq!(contact.side, Side::Right);
        assert!((a.x - (-5.0)).abs() < 0.001);
        assert!((a.y - 0.0).abs() < 0.001);
        assert!(rectangles(&a, &b).is_none());
    }

    #[test]
    fn test_resolve_rectangles_vertical() {
        let mut a = Body::new(0.0, 8.0, 10.0, 10.0);
        let b = Body::new(0.0, 0.0, 10.0, 10.0);

        // b above a: side Top, a pushed down by overlap_y
        let contact = resolve_rectangles(&mut a, &b).unwrap();
        assert_eq!(contact.side, Side::Top);
        assert!((a.y - 10.0).abs() < 0.001);
        assert!(rectangles(&a, &b).is_none());
    }

    #[test]
    fn test_circles_radius_from_width_only() {
        // Tall thin bodies: widths say "apart", heights would say "overlap"
        let a = Body::new(0.0, 0.0, 4.0, 100.0);
        let b = Body::new(10.0, 0.0, 4.0, 100.0);
        assert!(!circles(&a, &b));

        // Wide bodies at the same distance do overlap
        let c = Body::new(0.0, 0.0, 12.0, 4.0);
        let d = Body::new(10.0, 0.0, 12.0, 4.0);
        assert!(circles(&c, &d));
    }

    #[test]
    fn test_circles_symmetric() {
        let a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(7.0, 3.0, 10.0, 10.0);
        assert_eq!(circles(&a, &b), circles(&b, &a));
    }

    #[test]
    fn test_resolve_circles_moves_only_first() {
        let mut a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(6.0, 0.0, 10.0, 10.0);
        let b_before = b;

        resolve_circles(&mut a, &b);
        assert_eq!(b, b_before);
        // Pushed left, away from b
        assert!(a.x < 0.0);
        assert!(!circles(&a, &b));
    }

    #[test]
    fn test_resolve_circles_separates_exactly() {
        let mut a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(6.0, 0.0, 10.0, 10.0);

        resolve_circles(&mut a, &b);
        // Distance between centers is now the radius sum
        let dist = (center_of(&b) - center_of(&a)).length();
        assert!((dist - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_resolve_circles_concentric_is_non_finite() {
        // Known sharp edge: zero center distance, undefined push direction
        let mut a = Body::new(0.0, 0.0, 10.0, 10.0);
        let b = Body::new(0.0, 0.0, 10.0, 10.0);

        resolve_circles(&mut a, &b);
        assert!(!a.x.is_finite() || !a.y.is_finite());
    }

    // Integer-grid strategies keep every intermediate value exactly
    // representable in f32, so the one-step separation property holds with
    // equality rather than within an epsilon.
    fn body_strategy() -> impl Strategy<Value = Body> {
        (
            -500i32..500,
            -500i32..500,
            1i32..100,
            1i32..100,
        )
            .prop_map(|(x, y, w, h)| Body::new(x as f32, y as f32, w as f32, h as f32))
    }

    proptest! {
        #[test]
        fn prop_rectangles_matches_axis_separation(a in body_strategy(), b in body_strategy()) {
            let half_w = (a.w + b.w) * 0.5;
            let half_h = (a.h + b.h) * 0.5;
            let dx = (b.x + b.w * 0.5) - (a.x + a.w * 0.5);
            let dy = (b.y + b.h * 0.5) - (a.y + a.h * 0.5);

            let separated = dx.abs() >= half_w || dy.abs() >= half_h;
            prop_assert_eq!(rectangles(&a, &b).is_none(), separated);
        }

        #[test]
        fn prop_contact_overlaps_positive_and_side_consistent(
            a in body_strategy(),
            b in body_strategy(),
        ) {
            if let Some(contact) = rectangles(&a, &b) {
                prop_assert!(contact.overlap_x > 0.0);
                prop_assert!(contact.overlap_y > 0.0);

                if contact.overlap_y < contact.overlap_x {
                    let expected = if contact.dy > 0.0 { Side::Bottom } else { Side::Top };
                    prop_assert_eq!(contact.side, expected);
                } else {
                    let expected = if contact.dx > 0.0 { Side::Right } else { Side::Left };
                    prop_assert_eq!(contact.side, expected);
                }
            }
        }

        #[test]
        fn prop_resolve_rectangles_separates(a in body_strategy(), b in body_strategy()) {
            let mut a = a;
            if resolve_rectangles(&mut a, &b).is_some() {
                prop_assert!(rectangles(&a, &b).is_none());
            }
        }

        #[test]
        fn prop_circles_symmetric(a in body_strategy(), b in body_strategy()) {
            prop_assert_eq!(circles(&a, &b), circles(&b, &a));
        }

        #[test]
        fn prop_resolve_circles_never_moves_second(a in body_strategy(), b in body_strategy()) {
            let mut a = a;
            let b_before = b;
            resolve_circles(&mut a, &b);
            prop_assert_eq!(b, b_before);
        }
    }
}
