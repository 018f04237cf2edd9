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
use thiserror::Error;

/// Which lane arrow asset to draw. Serialized as its asset token.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(into = "String", try_from = "String")]
pub enum DrawMethod {
    SlightRight,
    Right,
    Straight,
    Uturn,
    /// A straight-and-right lane where the maneuver goes right
    RightOnly,
    /// A straight-and-right lane where the maneuver goes straight
    StraightOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown lane draw method [{0}]")]
pub struct UnknownDrawMethod(pub String);

impl DrawMethod {
    pub const ALL: [DrawMethod; 6] = [
        Self::SlightRight,
        Self::Right,
        Self::Straight,
        Self::Uturn,
        Self::RightOnly,
        Self::StraightOnly,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Self::SlightRight => "draw_lane_slight_right",
            Self::Right => "draw_lane_right",
            Self::Straight => "draw_lane_straight",
            Self::Uturn => "draw_lane_uturn",
            Self::RightOnly => "draw_lane_right_only",
            Self::StraightOnly => "draw_lane_straight_only",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.token() == token)
    }
}

impl From<DrawMethod> for String {
    fn from(method: DrawMethod) -> Self {
        method.token().to_owned()
    }
}

impl TryFrom<String> for DrawMethod {
    type Error = UnknownDrawMethod;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::from_token(&token).ok_or(UnknownDrawMethod(token))
    }
}

impl std::fmt::Display for DrawMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// How to draw one lane. `draw_method` stays `None` when the lane indication
/// was not recognized, in which case nothing should be drawn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassificationResult {
    pub draw_method: Option<DrawMethod>,
    /// Mirror the arrow horizontally before drawing it
    pub should_flip: bool,
}

impl ClassificationResult {
    pub fn new(draw_method: DrawMethod, should_flip: bool) -> Self {
        Self {
            draw_method: Some(draw_method),
            should_flip,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.draw_method.is_none()
    }
}
