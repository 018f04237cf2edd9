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
use nav_format::{IntersectionLane, LegStep, ManeuverModifier};
use tracing::trace;

/// Pick the lane arrow for a lane, given its indications and the modifier of
/// the maneuver the driver is about to make. Arrows for left-hand directions
/// are drawn by flipping the matching right-hand arrow.
pub fn classify(lane_indications: &str, maneuver_modifier: &str) -> ClassificationResult {
    let indication = LaneIndication::parse(lane_indications);
    match indication {
        LaneIndication::Uturn => ClassificationResult::new(DrawMethod::Uturn, true),
        LaneIndication::Straight => ClassificationResult::new(DrawMethod::Straight, false),
        LaneIndication::Right => ClassificationResult::new(DrawMethod::Right, false),
        LaneIndication::Left => ClassificationResult::new(DrawMethod::Right, true),
        LaneIndication::SlightRight => ClassificationResult::new(DrawMethod::SlightRight, false),
        LaneIndication::SlightLeft => ClassificationResult::new(DrawMethod::SlightRight, true),
        LaneIndication::StraightAndRight => {
            ClassificationResult::new(resolve_with_modifier(maneuver_modifier), false)
        }
        LaneIndication::StraightAndLeft => {
            ClassificationResult::new(resolve_with_modifier(maneuver_modifier), true)
        }
        LaneIndication::Unrecognized => {
            trace!("No lane arrow for lane indications [{lane_indications}]");
            ClassificationResult::default()
        }
    }
}

/// A lane that allows both going straight and turning is drawn with the
/// direction the maneuver takes highlighted.
pub fn resolve_with_modifier(maneuver_modifier: &str) -> DrawMethod {
    if maneuver_modifier.contains(ManeuverModifier::RIGHT) {
        DrawMethod::RightOnly
    } else if maneuver_modifier.contains(ManeuverModifier::STRAIGHT) {
        DrawMethod::StraightOnly
    } else {
        DrawMethod::RightOnly
    }
}

/// Classify a lane from a directions response, whose indications are listed
/// separately, e.g. `["straight", "right"]`.
pub fn classify_lane(lane: &IntersectionLane, maneuver_modifier: &str) -> ClassificationResult {
    let indications: Vec<&str> = lane.indications.iter().map(String::as_str).collect();
    classify(&indications.join("+"), maneuver_modifier)
}

/// Classify every lane of the last intersection of a step that carries lane
/// data, which is the intersection where the step's maneuver happens.
pub fn classify_step_lanes(step: &LegStep) -> Vec<ClassificationResult> {
    let Some(lanes) = step.intersections.as_ref().and_then(|intersections| {
        intersections
            .iter()
            .rev()
            .find_map(|intersection| intersection.lanes.as_ref())
    }) else {
        return Vec::new();
    };

    let modifier = step.maneuver_modifier();
    lanes
        .iter()
        .map(|lane| classify_lane(lane, modifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_format::{StepIntersection, StepManeuver};

    fn assert_classified(indications: &str, modifier: &str, draw: DrawMethod, flip: bool) {
        assert_eq!(
            classify(indications, modifier),
            ClassificationResult::new(draw, flip),
            "indications [{indications}] with modifier [{modifier}]",
        );
    }

    #[test]
    fn single_direction_lanes() {
        assert_classified("uturn", "left", DrawMethod::Uturn, true);
        assert_classified("straight", "straight", DrawMethod::Straight, false);
        assert_classified("right", "right", DrawMethod::Right, false);
        assert_classified("left", "left", DrawMethod::Right, true);
        assert_classified("slight right", "right", DrawMethod::SlightRight, false);
        assert_classified("slight_right", "right", DrawMethod::SlightRight, false);
        assert_classified("slight left", "left", DrawMethod::SlightRight, true);
        assert_classified("slight_left", "left", DrawMethod::SlightRight, true);
    }

    #[test]
    fn straight_and_turn_lanes_follow_the_modifier() {
        assert_classified("straight+right", "slight right", DrawMethod::RightOnly, false);
        assert_classified("straight+right", "straight", DrawMethod::StraightOnly, false);
        assert_classified("straight+right", "uturn", DrawMethod::RightOnly, false);
        assert_classified("straight+right", "", DrawMethod::RightOnly, false);
        assert_classified("straight+left", "straight", DrawMethod::StraightOnly, true);
        assert_classified("straight+left", "left", DrawMethod::RightOnly, true);
        assert_classified("straight+left", "sharp right", DrawMethod::RightOnly, true);
    }

    #[test]
    fn uturn_always_flips() {
        for modifier in ManeuverModifier::ALL {
            let result = classify("uturn", modifier.as_str());
            assert!(result.should_flip, "modifier [{modifier}]");
            assert_eq!(result.draw_method, Some(DrawMethod::Uturn));
        }
    }

    #[test]
    fn left_mirrors_right() {
        for modifier in ManeuverModifier::ALL {
            let left = classify("left", modifier.as_str());
            let right = classify("right", modifier.as_str());
            assert_eq!(left.draw_method, right.draw_method);
            assert!(left.should_flip);
            assert!(!right.should_flip);
        }
    }

    #[test]
    fn unknown_indication_is_a_silent_no_op() {
        let result = classify("sharp_right", "right");
        assert!(result.is_unset());
        assert!(!result.should_flip);
        assert_eq!(result, ClassificationResult::default());
    }

    #[test]
    fn flip_matches_lane_mirroring() {
        for text in [
            "uturn",
            "straight",
            "right",
            "left",
            "slight right",
            "slight left",
            "straight+right",
            "straight+left",
            "sharp left",
        ] {
            let expected = LaneIndication::parse(text).is_mirrored();
            assert_eq!(classify(text, "straight").should_flip, expected, "{text}");
        }
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify("straight+left", "slight left");
        for _ in 0..10 {
            assert_eq!(classify("straight+left", "slight left"), first);
        }
    }

    #[test]
    fn resolves_modifier_tie_break() {
        assert_eq!(resolve_with_modifier("sharp right"), DrawMethod::RightOnly);
        assert_eq!(resolve_with_modifier("straight"), DrawMethod::StraightOnly);
        assert_eq!(resolve_with_modifier("left"), DrawMethod::RightOnly);
    }

    #[test]
    fn classifies_lanes_of_a_step() {
        let lane = |indications: &[&str]| IntersectionLane {
            valid: true,
            indications: indications.iter().map(|s| s.to_string()).collect(),
        };
        let step = LegStep {
            maneuver: Some(StepManeuver {
                modifier: Some("straight".to_owned()),
                kind: Some("continue".to_owned()),
            }),
            intersections: Some(vec![
                StepIntersection {
                    lanes: Some(vec![lane(&["uturn"])]),
                },
                StepIntersection {
                    lanes: Some(vec![lane(&["left"]), lane(&["straight", "right"])]),
                },
                StepIntersection { lanes: None },
            ]),
            ..Default::default()
        };

        let results = classify_step_lanes(&step);
        assert_eq!(
            results,
            vec![
                ClassificationResult::new(DrawMethod::Right, true),
                ClassificationResult::new(DrawMethod::StraightOnly, false),
            ]
        );
        assert!(classify_step_lanes(&LegStep::default()).is_empty());
    }

    #[test]
    fn result_serializes_with_draw_tokens() {
        let text = serde_json::to_string(&classify("slight left", "left")).unwrap();
        assert_eq!(
            text,
            r#"{"draw_method":"draw_lane_slight_right","should_flip":true}"#
        );
        assert_eq!(DrawMethod::StraightOnly.to_string(), "draw_lane_straight_only");
    }
}
