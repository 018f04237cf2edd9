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
use nav_format::{Point, measure};

/// Bearing changes beyond this many degrees are driven at u-turn speed.
const UTURN_BEARING_DEGREES: f64 = 150.0;

/// A bearing change of this many degrees is driven at the minimum speed.
const FULL_TURN_DEGREES: f64 = 90.0;

/// A segment is finished once the car is this close to its end.
const SEGMENT_END_TOLERANCE_METERS: f64 = 5.0;

#[derive(Debug, Clone, Default)]
pub struct ReplayRouteInterpolator {
    config: ReplayConfig,
    route_smoother: ReplayRouteSmoother,
}

impl ReplayRouteInterpolator {
    pub fn new(config: ReplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            route_smoother: ReplayRouteSmoother::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Point each location towards the one that follows it. The last two
    /// locations keep the bearing of the location before them.
    pub fn create_bearing_profile(&self, replay_route_locations: &mut [ReplayRouteLocation]) {
        let Some(first) = replay_route_locations.first() else {
            return;
        };
        let mut bearing = first.bearing;
        let last_index = replay_route_locations.len() - 1;
        for index in 0..replay_route_locations.len() {
            if index + 1 < last_index {
                let from_point = replay_route_locations[index].point;
                let to_point = replay_route_locations[index + 1].point;
                bearing = measure::bearing(from_point, to_point);
            }
            replay_route_locations[index].bearing = bearing;
        }
    }

    /// Find the sections of a route with significant turns and give each of
    /// them the highest speed the turn can be taken at. The route starts and
    /// ends at rest.
    pub fn create_speed_profile(&self, coordinates: &[Point<f64>]) -> Vec<ReplayRouteLocation> {
        let config = &self.config;
        let mut smooth_locations = self
            .route_smoother
            .smooth_route(coordinates, config.smooth_route_meters);
        let len = smooth_locations.len();
        if len < 2 {
            return smooth_locations;
        }
        smooth_locations[0].speed_mps = 0.0;
        smooth_locations[len - 1].speed_mps = 0.0;

        // Get the max speed we can take upcoming turns
        for i in 1..len - 1 {
            let delta_bearing =
                (smooth_locations[i - 1].bearing - smooth_locations[i].bearing).abs();
            let speed_mps = if delta_bearing > UTURN_BEARING_DEGREES {
                config.uturn_speed_mps
            } else {
                let velocity_fraction = 1.0 - (delta_bearing / FULL_TURN_DEGREES).min(1.0);
                let offset_to_max_velocity = config.max_speed_mps - config.min_speed_mps;
                config.min_speed_mps + velocity_fraction * offset_to_max_velocity
            };
            smooth_locations[i].speed_mps = speed_mps;
        }

        // Reduce the speed if there is not enough distance to slow down
        for i in (1..len).rev() {
            let segment_distance = smooth_locations[i - 1].distance;
            let max_segment_speed_mps =
                (segment_distance / config.min_acceleration).abs() + config.min_speed_mps;
            let location = &mut smooth_locations[i];
            location.speed_mps = location.speed_mps.min(max_segment_speed_mps);
        }

        smooth_locations
    }

    /// Plan the speed across a segment. The returned steps are roughly one
    /// second apart and can be used to place locations along the segment.
    pub fn interpolate_speed(
        &self,
        start_speed: f64,
        end_speed: f64,
        distance: f64,
    ) -> ReplayRouteSegment {
        let config = &self.config;
        let mut speed_steps = vec![ReplayRouteStep {
            acceleration: 0.0,
            speed_mps: start_speed,
            position_meters: 0.0,
        }];

        loop {
            let Some(previous) = speed_steps.last().copied() else {
                break;
            };
            if !(previous.position_meters < distance - SEGMENT_END_TOLERANCE_METERS) {
                break;
            }

            // Try to reach max speed
            let acceleration = if previous.speed_mps == config.max_speed_mps {
                0.0
            } else if previous.speed_mps > config.max_speed_mps {
                config.max_speed_mps - previous.speed_mps
            } else {
                (config.max_speed_mps - previous.speed_mps).min(config.max_acceleration)
            };

            // Start braking early enough to reach the end speed
            let slow_down_distance =
                self.distance_to_slow_down(previous.speed_mps, acceleration, end_speed);
            let next_remaining_distance =
                distance - (previous.position_meters + previous.speed_mps);
            if next_remaining_distance > 0.0 && next_remaining_distance <= slow_down_distance {
                self.interpolate_slowdown(end_speed, distance, &mut speed_steps);
            } else {
                let speed = previous.speed_mps + acceleration;
                let position = previous.position_meters + (speed + previous.speed_mps) / 2.0;
                speed_steps.push(ReplayRouteStep {
                    acceleration,
                    speed_mps: speed,
                    position_meters: position,
                });
            }
        }

        ReplayRouteSegment {
            start_speed_mps: start_speed,
            end_speed_mps: end_speed,
            distance_meters: distance,
            steps: speed_steps,
        }
    }

    /// Spread the remaining change in speed and distance evenly so that the
    /// last step lands on `end_speed` at the end of the segment.
    fn interpolate_slowdown(
        &self,
        end_speed: f64,
        distance: f64,
        steps: &mut Vec<ReplayRouteStep>,
    ) {
        let Some(mut previous) = steps.last().copied() else {
            return;
        };
        let target_distance = distance - previous.position_meters;
        let target_speed = end_speed - previous.speed_mps;
        let remaining_steps =
            ((target_speed / self.config.min_acceleration).ceil() + 1.0).max(1.0) as usize;
        let acceleration = target_speed / remaining_steps as f64;
        let position_speed = target_distance / remaining_steps as f64;

        for _ in 0..remaining_steps {
            let step = ReplayRouteStep {
                acceleration,
                speed_mps: previous.speed_mps + acceleration,
                position_meters: previous.position_meters + position_speed,
            };
            steps.push(step);
            previous = step;
        }
    }

    /// Meters travelled while braking from `velocity + acceleration` down to
    /// `end_velocity` at the configured braking rate, one second at a time.
    /// The last second may overshoot below `end_velocity`.
    fn distance_to_slow_down(&self, velocity: f64, acceleration: f64, end_velocity: f64) -> f64 {
        let start_velocity = velocity + acceleration;
        let braking = -self.config.min_acceleration;
        if !(start_velocity > end_velocity) || !(braking > 0.0) {
            return 0.0;
        }
        // Each second covers the mean of its start and end velocity
        let seconds = ((start_velocity - end_velocity) / braking).ceil();
        seconds * start_velocity - braking * seconds * seconds / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn interpolator() -> ReplayRouteInterpolator {
        ReplayRouteInterpolator::default()
    }

    #[test]
    fn accelerates_to_max_speed() {
        let max_speed_mps = interpolator().config().max_speed_mps;
        let segment = interpolator().interpolate_speed(0.0, max_speed_mps, 200.0);

        let mut current_speed = 0.0;
        for step in &segment.steps {
            assert!(current_speed <= step.speed_mps, "{current_speed} <= {}", step.speed_mps);
            assert!(current_speed <= max_speed_mps, "{current_speed} <= {max_speed_mps}");
            current_speed = step.speed_mps;
        }
        let last = segment.steps.last().unwrap();
        assert_float_eq!(last.speed_mps, max_speed_mps, abs <= 0.001);
        assert!(segment.steps.len() < 14, "{} < 14", segment.steps.len());
    }

    #[test]
    fn does_not_exceed_max_acceleration() {
        let config = ReplayConfig::default();
        let segment = interpolator().interpolate_speed(0.0, config.max_speed_mps, 200.0);
        for step in &segment.steps {
            assert!(step.acceleration <= config.max_acceleration);
        }
    }

    #[test]
    fn starts_and_ends_at_the_same_speed() {
        let segment = interpolator().interpolate_speed(20.0, 20.0, 200.0);
        let steps = &segment.steps;
        assert!(steps.len() > 5);
        assert!(steps[0].speed_mps <= 20.0);
        assert_float_eq!(steps.last().unwrap().speed_mps, 20.0, abs <= 0.001);
        assert!(steps.len() < 11, "{} < 11", steps.len());
    }

    #[test]
    fn comes_close_to_a_stop_from_high_speed() {
        let segment = interpolator().interpolate_speed(30.0, 0.0, 166.123);
        let steps = &segment.steps;
        assert!(steps[0].speed_mps <= 30.0);
        assert!(steps.last().unwrap().speed_mps < 0.001);
        assert!(steps.len() < 12, "{} < 12", steps.len());
    }

    #[test]
    fn comes_close_to_a_stop_from_low_speed() {
        let segment = interpolator().interpolate_speed(6.0, 0.0, 107.197);
        let steps = &segment.steps;
        assert!(steps[0].speed_mps <= 6.0);
        assert!(steps.last().unwrap().speed_mps < 0.001);
        assert!(steps.len() < 13, "{} < 13", steps.len());
    }

    #[test]
    fn reaches_the_end_at_the_segment_distance() {
        let segment = interpolator().interpolate_speed(9.54496, 9.3481, 361.637);
        let steps = &segment.steps;
        assert!(steps.len() > 5);
        assert_float_eq!(steps.last().unwrap().position_meters, 361.637, abs <= 0.001);
        assert!(steps.len() < 20, "{} < 20", steps.len());
    }

    #[test]
    fn creates_speed_for_each_point() {
        let coordinates = vec![
            Point::new(-121.46991, 38.550876),
            Point::new(-121.470231, 38.550964),
            Point::new(-121.468834, 38.550765),
        ];
        let speed_profile = interpolator().create_speed_profile(&coordinates);
        assert_eq!(speed_profile.len(), coordinates.len());
        assert_eq!(speed_profile[0].speed_mps, 0.0);
        assert_eq!(speed_profile[2].speed_mps, 0.0);
    }

    #[test]
    fn profiles_uturns_to_be_very_slow() {
        let coordinates = vec![
            Point::new(-121.470231, 38.550964),
            Point::new(-121.469887, 38.551753),
            Point::new(-121.470231, 38.550964),
        ];
        let speed_profile = interpolator().create_speed_profile(&coordinates);
        let uturn_speed_mps = interpolator().config().uturn_speed_mps;
        assert_float_eq!(speed_profile[1].speed_mps, uturn_speed_mps, abs <= 0.001);
    }

    #[test]
    fn slows_down_for_end_of_route() {
        let coordinates: Vec<_> = [
            (-122.444359, 37.736351),
            (-122.444359, 37.736347),
            (-122.444375, 37.736293),
            (-122.444413, 37.736213),
            (-122.444428, 37.736152),
            (-122.444443, 37.736091),
            (-122.444451, 37.736011),
            (-122.444481, 37.735916),
            (-122.444489, 37.735832),
            (-122.444497, 37.735752),
            (-122.444489, 37.735679),
            (-122.444474, 37.735614),
            (-122.444436, 37.735553),
            (-122.444367, 37.735511),
            (-122.444336, 37.735549),
            (-122.444306, 37.735576),
            (-122.444275, 37.735595),
            (-122.44423, 37.735614),
            (-122.444245, 37.735626),
            (-122.444298, 37.73571),
            (-122.444336, 37.735809),
            (-122.444359, 37.735897),
            (-122.444359, 37.73598),
            (-122.444352, 37.73608),
            (-122.444367, 37.736129),
            (-122.444375, 37.736141),
        ]
        .into_iter()
        .map(|(lon, lat)| Point::new(lon, lat))
        .collect();

        let speed_profile = interpolator().create_speed_profile(&coordinates);
        for location in &speed_profile {
            assert!(location.speed_mps < 20.0, "{} < 20.0", location.speed_mps);
        }
    }

    #[test]
    fn bearing_profile_points_at_the_next_location() {
        let mut locations: Vec<_> = [(0.0, 0.0), (0.0, 0.001), (0.001, 0.001), (0.002, 0.001)]
            .into_iter()
            .map(|(lon, lat)| ReplayRouteLocation::new(None, Point::new(lon, lat)))
            .collect();
        interpolator().create_bearing_profile(&mut locations);
        assert_float_eq!(locations[0].bearing, 0.0, abs <= 1e-6);
        assert_float_eq!(locations[1].bearing, 90.0, abs <= 0.01);
        assert_eq!(locations[2].bearing, locations[1].bearing);
        assert_eq!(locations[3].bearing, locations[1].bearing);

        let mut empty: Vec<ReplayRouteLocation> = Vec::new();
        interpolator().create_bearing_profile(&mut empty);
    }

    #[test]
    fn rejects_configs_that_never_brake() {
        for min_acceleration in [1.0, 0.0, -1e-9, f64::NAN] {
            let config = ReplayConfig {
                min_acceleration,
                ..Default::default()
            };
            assert!(
                matches!(
                    ReplayRouteInterpolator::new(config),
                    Err(ConfigError::Invalid(_))
                ),
                "{min_acceleration}"
            );
        }
    }

    #[test]
    fn braking_distance_matches_second_by_second_braking() {
        let interpolator = interpolator();
        let braking = interpolator.config().min_acceleration;
        for (velocity, acceleration, end_velocity) in [
            (30.0, 0.0, 0.0),
            (26.0, 4.0, 6.0),
            (9.54496, 0.45504, 9.3481),
            (19.075, 4.0, 1.0),
            (1.0, 0.0, 6.0),
        ] {
            let mut current = velocity + acceleration;
            let mut expected = 0.0;
            while current > end_velocity {
                expected += (2.0 * current + braking) / 2.0;
                current += braking;
            }
            assert_float_eq!(
                interpolator.distance_to_slow_down(velocity, acceleration, end_velocity),
                expected,
                abs <= 1e-9
            );
        }
    }

    #[test]
    fn gentlest_allowed_braking_still_finishes() {
        let config = ReplayConfig {
            min_acceleration: -MIN_ACCELERATION_MPS2,
            max_acceleration: MIN_ACCELERATION_MPS2,
            ..Default::default()
        };
        let interpolator = ReplayRouteInterpolator::new(config).unwrap();
        let segment = interpolator.interpolate_speed(30.0, 0.0, 5000.0);
        let last = segment.steps.last().unwrap();
        assert!(last.speed_mps.abs() < 0.001, "{}", last.speed_mps);
        assert_float_eq!(last.position_meters, 5000.0, abs <= 0.001);
    }

    #[test]
    fn unusable_segment_distance_has_no_steps() {
        for distance in [f64::NAN, -10.0] {
            let segment = interpolator().interpolate_speed(10.0, 0.0, distance);
            assert_eq!(segment.steps.len(), 1);
        }
    }
}
