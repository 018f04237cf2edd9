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

use nav_format::Point;

/// A simulated location along a route.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayRouteLocation {
    /// Index of the route coordinate this location was created from, if any
    pub route_index: Option<usize>,
    pub point: Point<f64>,
    /// Meters until the next location of a smoothed route
    pub distance: f64,
    /// Degrees clockwise from north
    pub bearing: f64,
    pub speed_mps: f64,
    /// Time since the start of the replay
    pub time_millis: u64,
}

impl ReplayRouteLocation {
    pub fn new(route_index: Option<usize>, point: Point<f64>) -> Self {
        Self {
            route_index,
            point,
            distance: 0.0,
            bearing: 0.0,
            speed_mps: 0.0,
            time_millis: 0,
        }
    }

    pub fn time_seconds(&self) -> f64 {
        self.time_millis as f64 / 1000.0
    }
}

/// The speed of the car roughly once per second while travelling a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayRouteStep {
    pub acceleration: f64,
    pub speed_mps: f64,
    /// Meters from the start of the segment
    pub position_meters: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayRouteSegment {
    pub start_speed_mps: f64,
    pub end_speed_mps: f64,
    pub distance_meters: f64,
    pub steps: Vec<ReplayRouteStep>,
}
