/*
 * Copyright (C) 2025 Open Source Robotics Foundation
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
*/

//! Estimating the speed needed to traverse a route only needs the locations
//! where the road changes direction. The smoother reduces a list of route
//! coordinates to those locations.

use crate::*;
use glam::DVec3;
use nav_format::{Point, measure};

#[derive(Debug, Clone)]
pub struct ReplayRouteSmoother {
    distinct_point_meters: f64,
}

impl Default for ReplayRouteSmoother {
    fn default() -> Self {
        Self::new(&ReplayConfig::default())
    }
}

impl ReplayRouteSmoother {
    pub fn new(config: &ReplayConfig) -> Self {
        Self {
            distinct_point_meters: config.distinct_point_meters,
        }
    }

    /// Reduce a route to the locations with significant changes in bearing.
    /// Each location gets the bearing towards the next one and the distance
    /// along the route to reach it. The last location has a distance of zero.
    ///
    /// Returns an empty list when the route has fewer than two distinct points.
    pub fn smooth_route(
        &self,
        points: &[Point<f64>],
        threshold_meters: f64,
    ) -> Vec<ReplayRouteLocation> {
        let distinct_points = self.distinct_points(points, self.distinct_point_meters);
        if distinct_points.len() < 2 {
            return Vec::new();
        }

        let smooth_indices = self.smooth_route_indices(&distinct_points, threshold_meters);
        let mut smooth_locations: Vec<_> = smooth_indices
            .iter()
            .map(|i| ReplayRouteLocation::new(Some(*i), distinct_points[*i]))
            .collect();

        let mut bearing = 0.0;
        for (i, pair) in smooth_indices.windows(2).enumerate() {
            let segment_route = self.segment_route(&distinct_points, pair[0], pair[1]);
            let distance = measure::length(segment_route);
            bearing = measure::bearing(distinct_points[pair[0]], distinct_points[pair[1]]);

            let segment_start = &mut smooth_locations[i];
            segment_start.bearing = bearing;
            segment_start.distance = distance;
        }

        // Stop at the end of the route
        if let Some(last) = smooth_locations.last_mut() {
            last.bearing = bearing;
            last.distance = 0.0;
        }

        smooth_locations
    }

    /// Indices of the points that are not within `threshold_meters` of a
    /// straight road, always including the first and last point.
    pub fn smooth_route_indices(&self, points: &[Point<f64>], threshold_meters: f64) -> Vec<usize> {
        if points.len() <= 3 {
            return (0..points.len()).collect();
        }

        let mut smoothed_route_indices = vec![0];
        let mut sum_distance = 0.0;
        for i in 1..points.len() - 1 {
            let distance_to_segment =
                self.distance_to_segment(points[i - 1], points[i], points[i + 1]);
            sum_distance += distance_to_segment.unwrap_or(0.0).abs();
            if distance_to_segment.is_none() || sum_distance > threshold_meters {
                smoothed_route_indices.push(i);
                sum_distance = 0.0;
            }
        }
        smoothed_route_indices.push(points.len() - 1);

        smoothed_route_indices
    }

    /// Drop every point closer than `threshold_meters` to the last point that
    /// was kept. Points where the road turns back on itself are kept.
    pub fn distinct_points(&self, points: &[Point<f64>], threshold_meters: f64) -> Vec<Point<f64>> {
        let Some((first, rest)) = points.split_first() else {
            return Vec::new();
        };
        let mut previous = *first;
        let mut distinct = vec![previous];
        for point in rest {
            if measure::distance(previous, *point) >= threshold_meters {
                distinct.push(*point);
                previous = *point;
            }
        }
        distinct
    }

    /// Perpendicular distance of `middle_point` from the road between
    /// `segment_start` and `segment_end`. The sign tells which way the road
    /// turns. Returns `None` when the road reverses direction.
    pub fn distance_to_segment(
        &self,
        segment_start: Point<f64>,
        middle_point: Point<f64>,
        segment_end: Point<f64>,
    ) -> Option<f64> {
        let p0 = cartesian(segment_start);
        let p1 = cartesian(segment_end);
        let c = cartesian(middle_point);
        let v0 = (p1 - p0).normalize();
        let v1 = c - p0;
        let direction_vector = v0.cross(v1);
        let distance = gravity(p0).dot(direction_vector);
        let is_uturn = v0.is_nan() || v0.dot(p1 - c) < 0.0;
        (!is_uturn).then_some(distance)
    }

    /// All the points from `start_index` through `end_index`.
    pub fn segment_route<'a>(
        &self,
        points: &'a [Point<f64>],
        start_index: usize,
        end_index: usize,
    ) -> &'a [Point<f64>] {
        &points[start_index..=end_index]
    }
}

/// Direction from the earth centre to a point on its surface.
fn gravity(p: DVec3) -> DVec3 {
    (p - DVec3::ZERO).normalize()
}

/// Earth-centred cartesian coordinates of a point, in meters.
fn cartesian(point: Point<f64>) -> DVec3 {
    let latitude = point.y().to_radians();
    let longitude = point.x().to_radians();
    DVec3::new(
        measure::EARTH_RADIUS_METERS * latitude.cos() * longitude.cos(),
        measure::EARTH_RADIUS_METERS * latitude.cos() * longitude.sin(),
        measure::EARTH_RADIUS_METERS * latitude.sin(),
    )
}
