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

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed decoding route geometry: {0}")]
    Polyline(#[from] nav_format::PolylineError),
    #[error("Add polyline6 geometries to your directions request to replay its geometry")]
    MissingPolyline6,
    #[error("Speed annotation is missing for span [{index}] of the route leg")]
    MissingAnnotation { index: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed parsing yaml replay config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Failed parsing json replay config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid replay config: {0}")]
    Invalid(String),
}
