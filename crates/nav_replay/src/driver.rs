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

use crate::*;
use nav_format::{POLYLINE6_PRECISION, Point, RouteLeg, measure, polyline};
use tracing::warn;

/// Simulates a car driving along a route. Every location it produces is one
/// event interval after the previous one, including across separate calls,
/// so consecutive legs can be replayed back to back.
#[derive(Debug, Clone, Default)]
pub struct ReplayRouteDriver {
    config: ReplayConfig,
    route_smoother: ReplayRouteSmoother,
    route_interpolator: ReplayRouteInterpolator,
    time_millis: u64,
}

impl ReplayRouteDriver {
    pub fn new(config: ReplayConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            route_smoother: ReplayRouteSmoother::new(&config),
            route_interpolator: ReplayRouteInterpolator::new(config.clone())?,
            config,
            time_millis: 0,
        })
    }

    /// Time that will be given to the next location.
    pub fn time_millis(&self) -> u64 {
        self.time_millis
    }

    /// Drive a precision 6 encoded polyline.
    pub fn drive_geometry(
        &mut self,
        geometry: &str,
    ) -> Result<Vec<ReplayRouteLocation>, ReplayError> {
        let coordinates = polyline::decode(geometry, POLYLINE6_PRECISION)?;
        Ok(self.drive_points(&coordinates))
    }

    /// Drive a list of coordinates. Routes with fewer than three coordinates
    /// produce no locations.
    pub fn drive_points(&mut self, coordinates: &[Point<f64>]) -> Vec<ReplayRouteLocation> {
        if coordinates.len() < 3 {
            return Vec::new();
        }

        let points = self
            .route_smoother
            .distinct_points(coordinates, self.config.distinct_point_meters);
        let smooth_locations = self.route_interpolator.create_speed_profile(&points);
        let Some(first_location) = smooth_locations.first() else {
            warn!(
                "Unable to replay a route of {} coordinates because they are all at the same place",
                coordinates.len()
            );
            return Vec::new();
        };

        let mut replay_route_locations = Vec::new();
        self.add_location(&mut replay_route_locations, first_location.clone());

        for pair in smooth_locations.windows(2) {
            let (segment_start, segment_end) = (&pair[0], &pair[1]);
            let segment = self.route_interpolator.interpolate_speed(
                segment_start.speed_mps,
                segment_end.speed_mps,
                segment_start.distance,
            );

            let (Some(start_index), Some(end_index)) =
                (segment_start.route_index, segment_end.route_index)
            else {
                continue;
            };
            let segment_route = self
                .route_smoother
                .segment_route(&points, start_index, end_index);
            for step in segment.steps.iter().skip(1) {
                let Some(point) = measure::along(segment_route, step.position_meters) else {
                    continue;
                };
                let mut location = ReplayRouteLocation::new(None, point);
                location.speed_mps = step.speed_mps;
                self.add_location(&mut replay_route_locations, location);
            }
        }

        // Separately create a bearing profile so the location can look ahead
        // and start turning early
        self.route_interpolator
            .create_bearing_profile(&mut replay_route_locations);

        replay_route_locations
    }

    /// Drive a route leg using the distance and speed annotations of the
    /// directions response, placing one location at the end of each
    /// annotated span.
    pub fn drive_route_leg(
        &mut self,
        route_leg: &RouteLeg,
    ) -> Result<Vec<ReplayRouteLocation>, ReplayError> {
        let mut points = Vec::new();
        for leg_step in route_leg.steps.iter().flatten() {
            let Some(geometry) = &leg_step.geometry else {
                return Ok(Vec::new());
            };
            points.extend(polyline::decode(geometry, POLYLINE6_PRECISION)?);
        }

        let Some(distances) = route_leg
            .annotation
            .as_ref()
            .and_then(|annotation| annotation.distance.as_ref())
        else {
            return Ok(Vec::new());
        };
        let speeds = route_leg
            .annotation
            .as_ref()
            .and_then(|annotation| annotation.speed.as_deref())
            .unwrap_or(&[]);

        let mut replay_route_locations = Vec::new();
        let mut distance_traveled = 0.0;
        for (index, distance) in distances.iter().enumerate() {
            distance_traveled += distance;
            let Some(point) = measure::along(&points, distance_traveled) else {
                return Ok(Vec::new());
            };
            let speed_mps = *speeds
                .get(index)
                .ok_or(ReplayError::MissingAnnotation { index })?;

            let mut replay_route_location = ReplayRouteLocation::new(Some(index), point);
            replay_route_location.speed_mps = speed_mps;
            replay_route_location.distance = *distance;
            self.add_location(&mut replay_route_locations, replay_route_location);
        }

        self.route_interpolator
            .create_bearing_profile(&mut replay_route_locations);

        Ok(replay_route_locations)
    }

    fn add_location(
        &mut self,
        locations: &mut Vec<ReplayRouteLocation>,
        mut location: ReplayRouteLocation,
    ) {
        location.time_millis = self.time_millis;
        locations.push(location);
        self.time_millis += self.config.event_interval_millis;
    }
}
