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
use serde::{Deserialize, Serialize};

/// Smallest rate, in meters per second squared, the car may speed up or
/// brake at.
pub const MIN_ACCELERATION_MPS2: f64 = 0.1;

/// Highest top speed a replay may be configured with, in meters per second.
pub const MAX_SPEED_LIMIT_MPS: f64 = 100.0;

/// Tuning of the simulated drive. Every field falls back to its default when
/// it is missing from a config file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// How far a road may drift from a straight line, in meters, before a
    /// new segment is started
    pub smooth_route_meters: f64,
    pub max_speed_mps: f64,
    /// Speed used to take a 90 degree turn
    pub min_speed_mps: f64,
    pub uturn_speed_mps: f64,
    /// Meters per second squared
    pub max_acceleration: f64,
    /// Meters per second squared, negative when braking
    pub min_acceleration: f64,
    /// Points closer than this to their predecessor are dropped
    pub distinct_point_meters: f64,
    pub accuracy_horizontal_meters: f64,
    pub event_interval_millis: u64,
    pub provider: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            smooth_route_meters: 3.0,
            max_speed_mps: 30.0,
            min_speed_mps: 6.0,
            uturn_speed_mps: 1.0,
            max_acceleration: 4.0,
            min_acceleration: -4.0,
            distinct_point_meters: 0.0001,
            accuracy_horizontal_meters: 3.0,
            event_interval_millis: 1000,
            provider: "ReplayRoute".to_owned(),
        }
    }
}

impl ReplayConfig {
    pub fn from_str_yaml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_bytes_yaml(s: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_slice(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_str_json(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_bytes_json(s: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_string_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject settings that would keep the simulated car from ever finishing
    /// a segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid(reason));
        for (name, value) in [
            ("smooth_route_meters", self.smooth_route_meters),
            ("max_speed_mps", self.max_speed_mps),
            ("min_speed_mps", self.min_speed_mps),
            ("uturn_speed_mps", self.uturn_speed_mps),
            ("max_acceleration", self.max_acceleration),
            ("min_acceleration", self.min_acceleration),
            ("distinct_point_meters", self.distinct_point_meters),
            ("accuracy_horizontal_meters", self.accuracy_horizontal_meters),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be a finite number, found [{value}]"));
            }
        }
        if !(self.max_speed_mps > 0.0 && self.max_speed_mps <= MAX_SPEED_LIMIT_MPS) {
            return invalid(format!(
                "max_speed_mps must be above 0 and at most {MAX_SPEED_LIMIT_MPS}, found [{}]",
                self.max_speed_mps
            ));
        }
        if !(0.0 <= self.min_speed_mps && self.min_speed_mps <= self.max_speed_mps) {
            return invalid(format!(
                "min_speed_mps [{}] must be between 0 and max_speed_mps [{}]",
                self.min_speed_mps, self.max_speed_mps
            ));
        }
        if !(0.0 <= self.uturn_speed_mps && self.uturn_speed_mps <= self.max_speed_mps) {
            return invalid(format!(
                "uturn_speed_mps [{}] must be between 0 and max_speed_mps [{}]",
                self.uturn_speed_mps, self.max_speed_mps
            ));
        }
        if !(self.max_acceleration >= MIN_ACCELERATION_MPS2) {
            return invalid(format!(
                "max_acceleration must be at least {MIN_ACCELERATION_MPS2}, found [{}]",
                self.max_acceleration
            ));
        }
        if !(self.min_acceleration <= -MIN_ACCELERATION_MPS2) {
            return invalid(format!(
                "min_acceleration must be at most -{MIN_ACCELERATION_MPS2}, found [{}]",
                self.min_acceleration
            ));
        }
        if !(self.smooth_route_meters >= 0.0 && self.distinct_point_meters >= 0.0) {
            return invalid("distance thresholds must not be negative".to_owned());
        }
        if self.event_interval_millis == 0 {
            return invalid("event_interval_millis must not be zero".to_owned());
        }
        Ok(())
    }
}
