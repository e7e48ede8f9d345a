// Copyright 2026 the Fatline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Points and rays.

/// A point (or vector) in 3D space.
///
/// Stored as `f32` to match the precision of GPU vertex buffers. This is [`glam::Vec3`], so it
/// is `Pod` and can be cast to and from flat coordinate buffers.
pub type Point3 = glam::Vec3;

/// A half-line starting at `origin`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Point3,
}

/// The closest approach between a [`Ray`] and a line segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentApproach {
    /// Squared distance between the two closest points.
    pub distance_squared: f32,
    /// Distance along the ray of the closest point on the ray.
    pub ray_t: f32,
    /// The closest point on the ray.
    pub point_on_ray: Point3,
    /// The closest point on the segment.
    pub point_on_segment: Point3,
}

impl Ray {
    /// Create a ray. `direction` is normalized.
    pub fn new(origin: Point3, direction: Point3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Create a ray starting at `origin` and passing through `target`.
    pub fn looking_at(origin: Point3, target: Point3) -> Self {
        Self::new(origin, target - origin)
    }

    /// The point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }

    /// Squared distance between the ray and `point`.
    pub fn distance_squared_to_point(&self, point: Point3) -> f32 {
        let t = (point - self.origin).dot(self.direction);
        // Points behind the ray are closest to its origin.
        if t < 0. {
            return (point - self.origin).length_squared();
        }
        (point - self.at(t)).length_squared()
    }

    /// Whether the ray passes within `radius` of `center`.
    pub fn intersects_sphere(&self, center: Point3, radius: f32) -> bool {
        self.distance_squared_to_point(center) <= radius * radius
    }

    /// Find the closest approach between the ray and the segment `v0..v1`.
    ///
    /// This is the ray/segment distance query from Geometric Tools (`DistRaySegment`), which
    /// classifies the minimum into one of the regions of the `(ray, segment)` parameter plane.
    pub fn approach_segment(&self, v0: Point3, v1: Point3) -> SegmentApproach {
        let seg_center = (v0 + v1) * 0.5;
        let seg_extent = v0.distance(v1) * 0.5;
        if seg_extent == 0. {
            let ray_t = (seg_center - self.origin).dot(self.direction).max(0.);
            let point_on_ray = self.at(ray_t);
            return SegmentApproach {
                distance_squared: (seg_center - point_on_ray).length_squared(),
                ray_t,
                point_on_ray,
                point_on_segment: seg_center,
            };
        }
        let seg_dir = (v1 - v0).normalize_or_zero();
        let diff = self.origin - seg_center;

        let a01 = -self.direction.dot(seg_dir);
        let b0 = diff.dot(self.direction);
        let b1 = -diff.dot(seg_dir);
        let c = diff.length_squared();
        let det = (1. - a01 * a01).abs();

        let (s0, s1, sqr_dist);
        if det > 0. {
            // Not parallel.
            let mut t0 = a01 * b1 - b0;
            let mut t1 = a01 * b0 - b1;
            let ext_det = seg_extent * det;

            if t0 >= 0. {
                if t1 >= -ext_det {
                    if t1 <= ext_det {
                        // Minimum at interior points of ray and segment.
                        let inv_det = det.recip();
                        t0 *= inv_det;
                        t1 *= inv_det;
                        s0 = t0;
                        s1 = t1;
                        sqr_dist =
                            t0 * (t0 + a01 * t1 + 2. * b0) + t1 * (a01 * t0 + t1 + 2. * b1) + c;
                    } else {
                        s1 = seg_extent;
                        s0 = (-(a01 * s1 + b0)).max(0.);
                        sqr_dist = -s0 * s0 + s1 * (s1 + 2. * b1) + c;
                    }
                } else {
                    s1 = -seg_extent;
                    s0 = (-(a01 * s1 + b0)).max(0.);
                    sqr_dist = -s0 * s0 + s1 * (s1 + 2. * b1) + c;
                }
            } else if t1 <= -ext_det {
                s0 = (-(-a01 * seg_extent + b0)).max(0.);
                s1 = if s0 > 0. {
                    -seg_extent
                } else {
                    (-b1).clamp(-seg_extent, seg_extent)
                };
                sqr_dist = -s0 * s0 + s1 * (s1 + 2. * b1) + c;
            } else if t1 <= ext_det {
                s0 = 0.;
                s1 = (-b1).clamp(-seg_extent, seg_extent);
                sqr_dist = s1 * (s1 + 2. * b1) + c;
            } else {
                s0 = (-(a01 * seg_extent + b0)).max(0.);
                s1 = if s0 > 0. {
                    seg_extent
                } else {
                    (-b1).clamp(-seg_extent, seg_extent)
                };
                sqr_dist = -s0 * s0 + s1 * (s1 + 2. * b1) + c;
            }
        } else {
            // Parallel.
            s1 = if a01 > 0. { -seg_extent } else { seg_extent };
            s0 = (-(a01 * s1 + b0)).max(0.);
            sqr_dist = -s0 * s0 + s1 * (s1 + 2. * b1) + c;
        }

        SegmentApproach {
            // Cancellation can push the closed form slightly below zero.
            distance_squared: sqr_dist.max(0.),
            ray_t: s0,
            point_on_ray: self.at(s0),
            point_on_segment: seg_center + seg_dir * s1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Point3, Ray};

    const EPSILON: f32 = 1e-5;

    #[test]
    fn points_cast_to_flat_coordinates() {
        let points = [Point3::new(1., 2., 3.), Point3::new(4., 5., 6.)];
        assert_eq!(
            bytemuck::cast_slice::<Point3, f32>(&points),
            [1., 2., 3., 4., 5., 6.]
        );
        assert_eq!(Point3::from_slice(&[7., 8., 9., 10.]), Point3::new(7., 8., 9.));
    }

    #[test]
    fn ray_direction_is_normalized() {
        let ray = Ray::new(Point3::ZERO, Point3::new(0., 0., 10.));
        assert_eq!(ray.direction, Point3::new(0., 0., 1.));
        assert_eq!(ray.at(2.), Point3::new(0., 0., 2.));
    }

    #[test]
    fn approach_crossing_segment() {
        // Ray along +z at x = 0.5 passes straight through the segment on the x axis.
        let ray = Ray::new(Point3::new(0.5, 0., -5.), Point3::new(0., 0., 1.));
        let approach = ray.approach_segment(Point3::ZERO, Point3::new(1., 0., 0.));
        assert!(approach.distance_squared < EPSILON);
        assert!((approach.ray_t - 5.).abs() < EPSILON);
        assert!((approach.point_on_segment.x - 0.5).abs() < EPSILON);
    }

    #[test]
    fn approach_misses_beside_segment() {
        let ray = Ray::new(Point3::new(0.5, 2., -5.), Point3::new(0., 0., 1.));
        let approach = ray.approach_segment(Point3::ZERO, Point3::new(1., 0., 0.));
        assert!((approach.distance_squared - 4.).abs() < EPSILON);
    }

    #[test]
    fn approach_clamps_to_segment_end() {
        let ray = Ray::new(Point3::new(3., 0., -5.), Point3::new(0., 0., 1.));
        let approach = ray.approach_segment(Point3::ZERO, Point3::new(1., 0., 0.));
        assert!((approach.distance_squared - 4.).abs() < EPSILON);
        assert!((approach.point_on_segment.x - 1.).abs() < EPSILON);
    }

    #[test]
    fn approach_segment_behind_ray() {
        let ray = Ray::new(Point3::new(0.5, 0., 5.), Point3::new(0., 0., 1.));
        let approach = ray.approach_segment(Point3::ZERO, Point3::new(1., 0., 0.));
        assert_eq!(approach.ray_t, 0.);
        assert!((approach.distance_squared - 25.).abs() < 1e-3);
    }

    #[test]
    fn approach_parallel_segment() {
        let ray = Ray::new(Point3::new(0., 1., 0.), Point3::new(1., 0., 0.));
        let approach = ray.approach_segment(Point3::new(2., 0., 0.), Point3::new(4., 0., 0.));
        assert!((approach.distance_squared - 1.).abs() < EPSILON);
    }

    #[test]
    fn approach_degenerate_segment() {
        let ray = Ray::new(Point3::new(0., 0., -1.), Point3::new(0., 0., 1.));
        let p = Point3::new(0., 3., 2.);
        let approach = ray.approach_segment(p, p);
        assert!((approach.distance_squared - 9.).abs() < EPSILON);
        assert!((approach.ray_t - 3.).abs() < EPSILON);
    }
}
