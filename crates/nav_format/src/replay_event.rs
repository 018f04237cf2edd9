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

use serde::{Deserialize, Serialize};

/// An event that a replay player feeds into the navigator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ReplayEvent {
    #[serde(rename = "updateLocation")]
    UpdateLocation(ReplayEventUpdateLocation),
}

impl ReplayEvent {
    /// Seconds since the start of the replay at which this event fires.
    pub fn event_timestamp(&self) -> f64 {
        match self {
            Self::UpdateLocation(update) => update.event_timestamp,
        }
    }

    pub fn location(&self) -> Option<&ReplayEventLocation> {
        match self {
            Self::UpdateLocation(update) => Some(&update.location),
        }
    }
}

impl From<ReplayEventUpdateLocation> for ReplayEvent {
    fn from(value: ReplayEventUpdateLocation) -> Self {
        Self::UpdateLocation(value)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReplayEventUpdateLocation {
    pub event_timestamp: f64,
    pub location: ReplayEventLocation,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReplayEventLocation {
    pub lon: f64,
    pub lat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_horizontal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// A location fix reported by a device. Readings the device did not provide
/// are `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Location {
    pub provider: String,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Horizontal accuracy in meters
    #[serde(default)]
    pub accuracy: Option<f32>,
    #[serde(default)]
    pub bearing: Option<f32>,
    /// Meters per second
    #[serde(default)]
    pub speed: Option<f32>,
}

pub fn events_to_string_json(events: &[ReplayEvent]) -> serde_json::Result<String> {
    serde_json::to_string(events)
}

pub fn events_to_string_json_pretty(events: &[ReplayEvent]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(events)
}

pub fn events_from_str_json(s: &str) -> serde_json::Result<Vec<ReplayEvent>> {
    serde_json::from_str(s)
}
