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
use nav_format::{
    DirectionsRoute, Location, POLYLINE6_PRECISION, ReplayEvent, ReplayEventLocation,
    ReplayEventUpdateLocation, RouteLeg, polyline,
};
use tracing::debug;

/// Converts directions routes into events that a replay player can feed to
/// the navigator to simulate driving the route.
#[derive(Debug, Clone, Default)]
pub struct ReplayRouteMapper {
    config: ReplayConfig,
    replay_route_driver: ReplayRouteDriver,
}

impl ReplayRouteMapper {
    pub fn new(config: ReplayConfig) -> Result<Self, ReplayError> {
        Ok(Self {
            replay_route_driver: ReplayRouteDriver::new(config.clone())?,
            config,
        })
    }

    /// Estimate speeds and positions from the geometry of the whole route.
    /// The route must have been requested with polyline6 geometries.
    pub fn map_directions_route_geometry(
        &mut self,
        directions_route: &DirectionsRoute,
    ) -> Result<Vec<ReplayEvent>, ReplayError> {
        if !directions_route.uses_polyline6() {
            return Err(ReplayError::MissingPolyline6);
        }
        let Some(geometry) = &directions_route.geometry else {
            return Ok(Vec::new());
        };
        self.map_geometry(geometry)
    }

    /// Drive the geometry of every step of a leg, composed together.
    pub fn map_route_leg_geometry(
        &mut self,
        route_leg: &RouteLeg,
    ) -> Result<Vec<ReplayEvent>, ReplayError> {
        let Some(steps) = &route_leg.steps else {
            return Ok(Vec::new());
        };
        let mut points = Vec::new();
        for leg_step in steps {
            let Some(geometry) = &leg_step.geometry else {
                return Ok(Vec::new());
            };
            points.extend(polyline::decode(geometry, POLYLINE6_PRECISION)?);
        }

        Ok(self
            .replay_route_driver
            .drive_points(&points)
            .iter()
            .map(|location| self.map_to_update_location(location))
            .collect())
    }

    /// Drive any precision 6 encoded polyline.
    pub fn map_geometry(&mut self, geometry: &str) -> Result<Vec<ReplayEvent>, ReplayError> {
        Ok(self
            .replay_route_driver
            .drive_geometry(geometry)?
            .iter()
            .map(|location| self.map_to_update_location(location))
            .collect())
    }

    /// Use the distance and speed annotations of every leg. The route must
    /// have been requested with distance and speed annotations.
    pub fn map_directions_route_leg_annotation(
        &mut self,
        directions_route: &DirectionsRoute,
    ) -> Result<Vec<ReplayEvent>, ReplayError> {
        let mut replay_events = Vec::new();
        for route_leg in directions_route.legs.iter().flatten() {
            replay_events.extend(self.map_route_leg_annotation(route_leg)?);
        }
        Ok(replay_events)
    }

    pub fn map_route_leg_annotation(
        &mut self,
        route_leg: &RouteLeg,
    ) -> Result<Vec<ReplayEvent>, ReplayError> {
        Ok(self
            .replay_route_driver
            .drive_route_leg(route_leg)?
            .iter()
            .map(|location| self.map_to_update_location(location))
            .collect())
    }

    /// Map a simulated location into a replay event.
    pub fn map_to_update_location(&self, location: &ReplayRouteLocation) -> ReplayEvent {
        let event = ReplayEventUpdateLocation {
            event_timestamp: location.time_seconds(),
            location: ReplayEventLocation {
                lon: location.point.x(),
                lat: location.point.y(),
                provider: Some(self.config.provider.clone()),
                time: Some(location.time_seconds()),
                altitude: None,
                accuracy_horizontal: Some(self.config.accuracy_horizontal_meters),
                bearing: Some(location.bearing),
                speed: Some(location.speed_mps),
            },
        };
        debug!("ReplayRoute mapToUpdateLocation {event:?}");
        event.into()
    }

    /// Map a location reported by a device into a replay event.
    pub fn map_location(event_timestamp: f64, location: &Location) -> ReplayEvent {
        let event = ReplayEventUpdateLocation {
            event_timestamp,
            location: ReplayEventLocation {
                lon: location.longitude,
                lat: location.latitude,
                provider: Some(location.provider.clone()),
                time: Some(event_timestamp),
                altitude: location.altitude,
                accuracy_horizontal: location.accuracy.map(f64::from),
                bearing: location.bearing.map(f64::from),
                speed: location.speed.map(f64::from),
            },
        };
        debug!("ReplayRoute mapLocation {event:?}");
        event.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_format::{LegAnnotation, LegStep, Point, RouteOptions};

    const GEOMETRY: &str = r"wt}ohAj||tfFoD`Sm_@iMcKgD";

    fn route(geometries: &str) -> DirectionsRoute {
        DirectionsRoute {
            geometry: Some(GEOMETRY.to_owned()),
            route_options: Some(RouteOptions {
                geometries: Some(geometries.to_owned()),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn requires_polyline6_route() {
        let result = ReplayRouteMapper::default().map_directions_route_geometry(&route("polyline"));
        assert!(matches!(result, Err(ReplayError::MissingPolyline6)));

        let events = ReplayRouteMapper::default()
            .map_directions_route_geometry(&route("polyline6"))
            .unwrap();
        assert!(events.len() > 10);
    }

    #[test]
    fn route_without_geometry_has_no_events() {
        let mut directions_route = route("polyline6");
        directions_route.geometry = None;
        let events = ReplayRouteMapper::default()
            .map_directions_route_geometry(&directions_route)
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn maps_simulated_locations() {
        let events = ReplayRouteMapper::default().map_geometry(GEOMETRY).unwrap();
        for (i, event) in events.iter().enumerate() {
            assert_eq!(event.event_timestamp(), i as f64);
            let location = event.location().unwrap();
            assert_eq!(location.provider.as_deref(), Some("ReplayRoute"));
            assert_eq!(location.accuracy_horizontal, Some(3.0));
            assert_eq!(location.time, Some(i as f64));
            assert!(location.altitude.is_none());
            assert!(location.bearing.is_some());
            assert!(location.speed.is_some());
        }
    }

    #[test]
    fn leg_geometry_matches_route_geometry() {
        let leg = RouteLeg {
            steps: Some(vec![
                LegStep {
                    geometry: Some(r"wt}ohAj||tfFoD`S".to_owned()),
                    ..Default::default()
                },
                LegStep {
                    geometry: Some(r"gz}ohAlp}tfFm_@iMcKgD".to_owned()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let from_leg = ReplayRouteMapper::default()
            .map_route_leg_geometry(&leg)
            .unwrap();
        let from_route = ReplayRouteMapper::default().map_geometry(GEOMETRY).unwrap();
        assert_eq!(from_leg.len(), from_route.len());

        let mut missing_geometry = leg.clone();
        missing_geometry.steps.as_mut().unwrap()[1].geometry = None;
        assert!(
            ReplayRouteMapper::default()
                .map_route_leg_geometry(&missing_geometry)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn maps_annotations_of_every_leg() {
        let leg = RouteLeg {
            steps: Some(vec![LegStep {
                geometry: Some(GEOMETRY.to_owned()),
                ..Default::default()
            }]),
            annotation: Some(LegAnnotation {
                distance: Some(vec![29.0, 61.0]),
                speed: Some(vec![8.0, 9.0]),
            }),
            ..Default::default()
        };
        let directions_route = DirectionsRoute {
            legs: Some(vec![leg.clone(), leg]),
            ..Default::default()
        };

        let events = ReplayRouteMapper::default()
            .map_directions_route_leg_annotation(&directions_route)
            .unwrap();
        let timestamps: Vec<_> = events.iter().map(|e| e.event_timestamp()).collect();
        assert_eq!(timestamps, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(events[3].location().unwrap().speed, Some(9.0));
    }

    #[test]
    fn maps_device_locations() {
        let location = Location {
            provider: "gps".to_owned(),
            longitude: -121.46991,
            latitude: 38.550876,
            altitude: Some(12.0),
            accuracy: Some(4.5),
            bearing: None,
            speed: Some(2.5),
        };
        let event = ReplayRouteMapper::map_location(7.0, &location);
        assert_eq!(event.event_timestamp(), 7.0);
        let mapped = event.location().unwrap();
        assert_eq!(mapped.lon, -121.46991);
        assert_eq!(mapped.provider.as_deref(), Some("gps"));
        assert_eq!(mapped.altitude, Some(12.0));
        assert_eq!(mapped.accuracy_horizontal, Some(4.5));
        assert!(mapped.bearing.is_none());
        assert_eq!(mapped.speed, Some(2.5));
    }

    #[test]
    fn uses_configured_provider_and_accuracy() {
        let config = ReplayConfig {
            provider: "Simulator".to_owned(),
            accuracy_horizontal_meters: 1.5,
            ..Default::default()
        };
        let mapper = ReplayRouteMapper::new(config).unwrap();
        let mut location = ReplayRouteLocation::new(None, Point::new(1.0, 2.0));
        location.time_millis = 2500;
        let event = mapper.map_to_update_location(&location);
        let mapped = event.location().unwrap();
        assert_eq!(event.event_timestamp(), 2.5);
        assert_eq!(mapped.provider.as_deref(), Some("Simulator"));
        assert_eq!(mapped.accuracy_horizontal, Some(1.5));

        let invalid = ReplayConfig {
            max_speed_mps: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            ReplayRouteMapper::new(invalid),
            Err(ReplayError::Config(_))
        ));
    }
}
