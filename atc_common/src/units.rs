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

//! uom based unit conversions for the aviation units we use in plain f64 state
//! (nautical miles and knots)

use uom::si::{
    f64::{Length,Velocity},
    length::{meter,nautical_mile},
    velocity::{knot,meter_per_second}
};

#[inline]
pub fn nautical_miles (len: f64)-> Length { Length::new::<nautical_mile>(len) }

#[inline]
pub fn knots (v: f64)-> Velocity { Velocity::new::<knot>(v) }

#[inline]
pub fn to_nautical_miles (len: Length)->f64 { len.get::<nautical_mile>() }

/// nautical miles covered in `secs` at `gs_kts` ground speed
#[inline]
pub fn nm_travelled (gs_kts: f64, secs: f64)->f64 {
    let d: Length = knots(gs_kts) * uom::si::f64::Time::new::<uom::si::time::second>(secs);
    to_nautical_miles(d)
}

/// seconds it takes to cover `dist_nm` at `gs_kts` (infinite if not moving)
#[inline]
pub fn eta_seconds (dist_nm: f64, gs_kts: f64)->f64 {
    if gs_kts <= 0.0 { return f64::INFINITY }
    let v = knots(gs_kts).get::<meter_per_second>();
    nautical_miles(dist_nm).get::<meter>() / v
}
