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
use std::str::FromStr;

/// The direction of a maneuver as reported by the directions service. The same
/// vocabulary is used for the indications of a turn lane.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManeuverModifier {
    #[serde(rename = "uturn")]
    Uturn,
    #[serde(rename = "sharp right")]
    SharpRight,
    #[serde(rename = "right")]
    Right,
    #[serde(rename = "slight right")]
    SlightRight,
    #[serde(rename = "straight")]
    Straight,
    #[serde(rename = "slight left")]
    SlightLeft,
    #[serde(rename = "left")]
    Left,
    #[serde(rename = "sharp left")]
    SharpLeft,
}

impl ManeuverModifier {
    pub const UTURN: &'static str = "uturn";
    pub const SHARP_RIGHT: &'static str = "sharp right";
    pub const RIGHT: &'static str = "right";
    pub const SLIGHT_RIGHT: &'static str = "slight right";
    pub const STRAIGHT: &'static str = "straight";
    pub const SLIGHT_LEFT: &'static str = "slight left";
    pub const LEFT: &'static str = "left";
    pub const SHARP_LEFT: &'static str = "sharp left";

    pub const ALL: [ManeuverModifier; 8] = [
        Self::Uturn,
        Self::SharpRight,
        Self::Right,
        Self::SlightRight,
        Self::Straight,
        Self::SlightLeft,
        Self::Left,
        Self::SharpLeft,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uturn => Self::UTURN,
            Self::SharpRight => Self::SHARP_RIGHT,
            Self::Right => Self::RIGHT,
            Self::SlightRight => Self::SLIGHT_RIGHT,
            Self::Straight => Self::STRAIGHT,
            Self::SlightLeft => Self::SLIGHT_LEFT,
            Self::Left => Self::LEFT,
            Self::SharpLeft => Self::SHARP_LEFT,
        }
    }
}

impl std::fmt::Display for ManeuverModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManeuverModifier {
    type Err = UnknownManeuverModifier;

    /// Underscores are accepted in place of spaces, so `slight_right` parses
    /// the same as `slight right`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', " ");
        Self::ALL
            .into_iter()
            .find(|modifier| modifier.as_str() == normalized)
            .ok_or_else(|| UnknownManeuverModifier(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown maneuver modifier [{0}]")]
pub struct UnknownManeuverModifier(pub String);
