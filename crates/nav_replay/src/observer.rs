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
use nav_format::{ReplayEvent, RouteLeg, RouteProgress};
use tracing::{debug, warn};

/// Receives updates about the progress of the navigator along its route.
pub trait RouteProgressObserver {
    fn on_route_progress_changed(&mut self, route_progress: &RouteProgress);
}

pub type ReplayEventsListener = Box<dyn FnMut(Vec<ReplayEvent>) + Send>;

/// Follows the navigator along a route and, whenever it starts a new leg,
/// hands the events for driving that leg to its listener.
pub struct ReplayProgressObserver {
    pub replay_events_listener: ReplayEventsListener,
    replay_route_mapper: ReplayRouteMapper,
    current_route_leg: Option<RouteLeg>,
}

impl Default for ReplayProgressObserver {
    fn default() -> Self {
        Self::new(Box::new(|_| {}))
    }
}

impl ReplayProgressObserver {
    pub fn new(replay_events_listener: ReplayEventsListener) -> Self {
        Self {
            replay_events_listener,
            replay_route_mapper: ReplayRouteMapper::default(),
            current_route_leg: None,
        }
    }

    pub fn with_mapper(mut self, replay_route_mapper: ReplayRouteMapper) -> Self {
        self.replay_route_mapper = replay_route_mapper;
        self
    }

    pub fn current_route_leg(&self) -> Option<&RouteLeg> {
        self.current_route_leg.as_ref()
    }
}

impl RouteProgressObserver for ReplayProgressObserver {
    fn on_route_progress_changed(&mut self, route_progress: &RouteProgress) {
        let step_progress = route_progress.current_step_progress();
        debug!(
            "RouteReplay onRouteProgressChanged {:?} {:?} {:?}",
            route_progress
                .current_leg_progress
                .as_ref()
                .map(|leg| leg.distance_remaining),
            step_progress.map(|step| step.distance_remaining),
            step_progress.and_then(|step| step.step_points.as_ref().map(Vec::len)),
        );

        let route_progress_route_leg = route_progress.route_leg();
        if route_progress_route_leg == self.current_route_leg.as_ref() {
            return;
        }
        self.current_route_leg = route_progress_route_leg.cloned();

        let Some(route_leg) = &self.current_route_leg else {
            return;
        };
        match self.replay_route_mapper.map_route_leg_geometry(route_leg) {
            Ok(replay_events) => {
                if !replay_events.is_empty() {
                    (self.replay_events_listener)(replay_events);
                }
            }
            Err(err) => {
                warn!("Unable to replay the new route leg: {err}");
            }
        }
    }
}
