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

/// Where the navigator currently is along the route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteProgress {
    pub current_leg_progress: Option<RouteLegProgress>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteLegProgress {
    pub route_leg: Option<RouteLeg>,
    /// Meters left until the end of the leg
    pub distance_remaining: f64,
    pub current_step_progress: Option<RouteStepProgress>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteStepProgress {
    /// Meters left until the end of the step
    pub distance_remaining: f64,
    pub step_points: Option<Vec<Point<f64>>>,
}

impl RouteProgress {
    pub fn route_leg(&self) -> Option<&RouteLeg> {
        self.current_leg_progress
            .as_ref()
            .and_then(|leg| leg.route_leg.as_ref())
    }

    pub fn current_step_progress(&self) -> Option<&RouteStepProgress> {
        self.current_leg_progress
            .as_ref()
            .and_then(|leg| leg.current_step_progress.as_ref())
    }
}
