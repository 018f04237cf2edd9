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

pub mod directions;
pub use directions::*;

pub mod maneuver;
pub use maneuver::*;

pub mod measure;

pub mod progress;
pub use progress::*;

pub mod polyline;
pub use self::polyline::{PolylineError, POLYLINE6_PRECISION};

pub mod replay_event;
pub use replay_event::*;

mod is_default;
pub(crate) use is_default::*;

/// Points are stored as (x = longitude, y = latitude) in degrees.
pub use geo::Point;
