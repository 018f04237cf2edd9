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

pub mod config;
pub use config::*;

pub mod driver;
pub use driver::*;

pub mod error;
pub use error::*;

pub mod interpolator;
pub use interpolator::*;

pub mod mapper;
pub use mapper::*;

pub mod observer;
pub use observer::*;

pub mod route;
pub use route::*;

pub mod smoother;
pub use smoother::*;
