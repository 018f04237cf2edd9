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

use nav_format::ManeuverModifier;

/// The directions a lane can be used for, parsed from the indication text of
/// the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneIndication {
    Uturn,
    Straight,
    Right,
    Left,
    SlightRight,
    SlightLeft,
    /// Any indication that allows going straight as well as turning right
    StraightAndRight,
    /// Any indication that allows going straight as well as turning left
    StraightAndLeft,
    Unrecognized,
}

impl LaneIndication {
    pub fn parse(indications: &str) -> Self {
        match indications {
            ManeuverModifier::UTURN => Self::Uturn,
            ManeuverModifier::STRAIGHT => Self::Straight,
            ManeuverModifier::RIGHT => Self::Right,
            ManeuverModifier::LEFT => Self::Left,
            ManeuverModifier::SLIGHT_RIGHT | "slight_right" => Self::SlightRight,
            ManeuverModifier::SLIGHT_LEFT | "slight_left" => Self::SlightLeft,
            _ if is_straight_plus(indications, ManeuverModifier::RIGHT) => {
                Self::StraightAndRight
            }
            _ if is_straight_plus(indications, ManeuverModifier::LEFT) => Self::StraightAndLeft,
            _ => Self::Unrecognized,
        }
    }

    /// Lanes that point left are drawn as their right-hand mirror image.
    pub fn is_mirrored(&self) -> bool {
        matches!(
            self,
            Self::Uturn | Self::Left | Self::SlightLeft | Self::StraightAndLeft
        )
    }
}

fn is_straight_plus(indications: &str, turn: &str) -> bool {
    indications.contains(ManeuverModifier::STRAIGHT) && indications.contains(turn)
}
