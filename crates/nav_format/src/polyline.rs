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

//! Encoded polyline codec for route geometries. Points are stored as
//! (x = longitude, y = latitude) while the encoding itself is latitude first.

use ::polyline::{decode_polyline, encode_coordinates};
use geo::Point;
use thiserror::Error;

/// Precision of the geometries used for navigation replay.
pub const POLYLINE6_PRECISION: u32 = 6;

/// Precision of the geometries used by legacy directions requests.
pub const POLYLINE5_PRECISION: u32 = 5;

/// Highest precision whose scale factor still fits in 32 bits.
pub const MAX_POLYLINE_PRECISION: u32 = 9;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    #[error("Invalid encoded polyline: {0}")]
    Codec(String),
    #[error("Unsupported polyline precision [{0}]; it must be at most 9")]
    UnsupportedPrecision(u32),
}

fn check_precision(precision: u32) -> Result<(), PolylineError> {
    if precision > MAX_POLYLINE_PRECISION {
        return Err(PolylineError::UnsupportedPrecision(precision));
    }
    Ok(())
}

/// Decode an encoded polyline into points of (longitude, latitude).
pub fn decode(encoded: &str, precision: u32) -> Result<Vec<Point<f64>>, PolylineError> {
    check_precision(precision)?;
    let line = decode_polyline(encoded, precision)
        .map_err(|err| PolylineError::Codec(err.to_string()))?;
    Ok(line.into_points())
}

/// Encode points of (longitude, latitude) into a polyline string.
pub fn encode(points: &[Point<f64>], precision: u32) -> Result<String, PolylineError> {
    check_precision(precision)?;
    encode_coordinates(points.iter().map(|point| point.0), precision)
        .map_err(|err| PolylineError::Codec(err.to_string()))
}
