/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

//! angle normalization and compass heading arithmetic (all values in degrees)

#[inline]
pub fn normalize_90 (d:f64) -> f64 {
    let x = d % 360.0;

    if x < -90.0 { -180.0 - x }
    else if x > 90.0 { 180.0 - x }
    else { x }
}

#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x <= -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    if x < 0.0 { 360.0 + x } else { x }
}

/// compass headings live in (0,360] - north is 360, never 0
#[inline]
pub fn normalize_heading (d: f64) -> f64 {
    let x = normalize_360(d);
    if x == 0.0 { 360.0 } else { x }
}

/// true if `h` is a valid compass heading, i.e. in (0,360]
#[inline]
pub fn is_valid_heading (h: f64) -> bool { h > 0.0 && h <= 360.0 }

/// absolute difference between two headings in [0,180]
#[inline]
pub fn heading_difference (a: f64, b: f64) -> f64 {
    normalize_180(a - b).abs()
}

/// the signed turn from `from` to `to` in (-180,180]. Positive values are right (clockwise) turns
#[inline]
pub fn heading_signed_turn (from: f64, to: f64) -> f64 {
    normalize_180(to - from)
}

#[inline]
pub fn opposite_heading (h: f64) -> f64 { normalize_heading(h + 180.0) }

/// heading of a (east,north) vector, measured clockwise from north
#[inline]
pub fn vector_heading (east: f64, north: f64) -> f64 {
    normalize_heading( east.atan2(north).to_degrees())
}
