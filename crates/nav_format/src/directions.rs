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

//! The subset of a directions response that navigation replay and turn lane
//! guidance read. Every field is optional on the wire, so missing data is
//! tolerated and surfaces as `None`.

use crate::*;
use serde::{Deserialize, Serialize};

/// Value of [`RouteOptions::geometries`] for routes encoded with six digits of
/// precision.
pub const GEOMETRY_POLYLINE6: &str = "polyline6";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DirectionsRoute {
    /// Encoded polyline of the whole route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legs: Option<Vec<RouteLeg>>,
    /// The options used when requesting this route
    #[serde(
        default,
        rename = "routeOptions",
        skip_serializing_if = "Option::is_none"
    )]
    pub route_options: Option<RouteOptions>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "is_default")]
    pub duration: f64,
}

impl DirectionsRoute {
    pub fn from_str_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn from_bytes_json(s: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(s)
    }

    /// True if the route was requested with precision 6 geometry.
    pub fn uses_polyline6(&self) -> bool {
        self.route_options
            .as_ref()
            .and_then(|options| options.geometries.as_deref())
            .is_some_and(|geometries| geometries.contains(GEOMETRY_POLYLINE6))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometries: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RouteLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<LegStep>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<LegAnnotation>,
    #[serde(default, skip_serializing_if = "is_default")]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "is_default")]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LegStep {
    /// Encoded polyline of this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_default")]
    pub distance: f64,
    #[serde(default, skip_serializing_if = "is_default")]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maneuver: Option<StepManeuver>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intersections: Option<Vec<StepIntersection>>,
}

impl LegStep {
    /// The raw modifier text of this step's maneuver, or an empty string.
    pub fn maneuver_modifier(&self) -> &str {
        self.maneuver
            .as_ref()
            .and_then(|maneuver| maneuver.modifier.as_deref())
            .unwrap_or("")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StepManeuver {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StepIntersection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lanes: Option<Vec<IntersectionLane>>,
}

/// One lane of an intersection and the directions it can be used for.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct IntersectionLane {
    /// Whether the lane can be used to complete the upcoming maneuver
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub indications: Vec<String>,
}

/// Per-coordinate annotations of a leg. Entry `i` describes the span between
/// coordinate `i` and `i + 1` of the leg geometry.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LegAnnotation {
    /// Meters travelled along each span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Vec<f64>>,
    /// Meters per second along each span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Vec<f64>>,
}
