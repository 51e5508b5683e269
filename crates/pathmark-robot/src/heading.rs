//! Signed turn angle from the robot heading to a target point.

use nalgebra::Point2;

/// Signed angle in whole degrees between the heading ray `center → direction`
/// and the trajectory `center → target`.
///
/// The magnitude is the unsigned angle between the two vectors, `0` when either
/// has zero length. The sign comes from comparing the heading point with the
/// trajectory line at the heading point's `x`: for targets with
/// `target.x >= center.x` the angle is positive when `direction.y` lies on or
/// below that line (larger `y`), and the rule flips for targets to the left.
/// In image coordinates (y down) a robot heading along `+x` gets positive
/// angles for targets above it and negative ones for targets below.
pub fn angle_to_point(center: Point2<f64>, direction: Point2<f64>, target: Point2<f64>) -> i32 {
    let heading = direction - center;
    let trajectory = target - center;
    let norms = heading.norm() * trajectory.norm();
    let angle = if norms != 0.0 {
        let cos_a = (heading.dot(&trajectory) / norms).clamp(-1.0, 1.0);
        cos_a.acos().to_degrees().round() as i32
    } else {
        0
    };

    let projection_y = projection_on_trajectory(center, direction, target);
    let heading_on_positive_side = direction.y >= projection_y;
    let positive = if center.x <= target.x {
        heading_on_positive_side
    } else {
        !heading_on_positive_side
    };

    if positive {
        angle
    } else {
        -angle
    }
}

/// `y` of the line `center → target` at `x = direction.x`.
///
/// A vertical trajectory uses a divisor of 1 instead of 0; the sign test only
/// needs which side of `center.y` the value falls on.
fn projection_on_trajectory(
    center: Point2<f64>,
    direction: Point2<f64>,
    target: Point2<f64>,
) -> f64 {
    let dx = target.x - center.x;
    let divisor = if dx != 0.0 { dx } else { 1.0 };
    (direction.x - center.x) * (target.y - center.y) / divisor + center.y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> Point2<f64> {
        Point2::origin()
    }

    /// Heading along +x.
    fn angle(x: f64, y: f64) -> i32 {
        angle_to_point(center(), Point2::new(5.0, 0.0), Point2::new(x, y))
    }

    #[test]
    fn target_straight_ahead_is_zero() {
        assert_eq!(angle(100.0, 0.0), 0);
    }

    #[test]
    fn target_straight_behind_is_half_turn() {
        assert_eq!(angle(-100.0, 0.0).abs(), 180);
    }

    #[test]
    fn sign_follows_side_of_heading() {
        assert_eq!(angle(100.0, -100.0), 45);
        assert_eq!(angle(100.0, 100.0), -45);
        assert_eq!(angle(-100.0, -100.0), 135);
        assert_eq!(angle(-100.0, 100.0), -135);
    }

    #[test]
    fn vertical_trajectory_uses_unit_divisor() {
        assert_eq!(angle(0.0, -100.0), 90);
        assert_eq!(angle(0.0, 100.0), -90);
    }

    #[test]
    fn degenerate_vectors_give_zero() {
        assert_eq!(angle(0.0, 0.0), 0);
        assert_eq!(angle_to_point(center(), center(), Point2::new(10.0, 3.0)), 0);
    }

    #[test]
    fn rounds_to_whole_degrees() {
        // atan(1/3) = 18.43°
        assert_eq!(angle(300.0, -100.0), 18);
    }

    #[test]
    fn heading_off_axis() {
        // Heading along -y (image up): direction.y (-5) is above the
        // horizontal trajectory line, so a target on the right is negative.
        let up = Point2::new(0.0, -5.0);
        assert_eq!(angle_to_point(center(), up, Point2::new(50.0, 0.0)), -90);
        assert_eq!(angle_to_point(center(), up, Point2::new(-50.0, 0.0)), 90);
    }
}
