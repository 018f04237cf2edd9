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

//! Great-circle measurements on (longitude, latitude) points, in meters and
//! degrees.

use geo::{HaversineBearing, HaversineDestination, HaversineDistance, Point};

/// Mean earth radius used by the haversine formulas.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Haversine distance between two points in meters.
pub fn distance(from: Point<f64>, to: Point<f64>) -> f64 {
    from.haversine_distance(&to)
}

/// Initial bearing from one point towards another, in degrees within
/// [-180, 180] where 0 is north.
pub fn bearing(from: Point<f64>, to: Point<f64>) -> f64 {
    from.haversine_bearing(to)
}

/// Point reached by travelling `meters` from `origin` along `bearing` degrees.
pub fn destination(origin: Point<f64>, bearing: f64, meters: f64) -> Point<f64> {
    origin.haversine_destination(bearing, meters)
}

/// Total length of a line in meters.
pub fn length(points: &[Point<f64>]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(pair[0], pair[1]))
        .sum()
}

/// The point that lies `meters` along a line. Distances past the end of the
/// line give the last point. Returns `None` for an empty line.
pub fn along(points: &[Point<f64>], meters: f64) -> Option<Point<f64>> {
    let last = *points.last()?;
    let mut travelled = 0.0;
    for (i, point) in points.iter().enumerate() {
        if meters >= travelled && i == points.len() - 1 {
            break;
        } else if travelled >= meters {
            let overshot = meters - travelled;
            if overshot == 0.0 {
                return Some(*point);
            }
            // Walk back from the vertex that overshot the requested distance
            let Some(previous) = i.checked_sub(1).and_then(|p| points.get(p)) else {
                return Some(*point);
            };
            let direction = bearing(*point, *previous) - 180.0;
            return Some(destination(*point, direction, overshot));
        } else {
            travelled += distance(*point, points[i + 1]);
        }
    }
    Some(last)
}
