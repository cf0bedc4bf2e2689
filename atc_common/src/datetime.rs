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

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serializer, Deserializer, de::Error as DeError};

/// sim clock time deltas are fractional seconds, we keep millisecond resolution
#[inline]
pub fn secs_f64_delta (secs: f64)->TimeDelta {
    TimeDelta::milliseconds( (secs * 1000.0).round() as i64)
}

/// seconds from `earlier` to `later` (negative if `later` is before `earlier`)
#[inline]
pub fn seconds_between (later: &DateTime<Utc>, earlier: &DateTime<Utc>)->f64 {
    (*later - *earlier).num_milliseconds() as f64 / 1000.0
}

pub fn short_utc_time_string (dt: &DateTime<Utc>) -> String {
    format!("{}", dt.format("%H:%M:%S%.3f"))
}

//--- support for serde

pub fn ser_epoch_millis<S: Serializer> (dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>  {
    s.serialize_i64(dt.timestamp_millis())
}

pub fn de_from_epoch_millis <'a,D>(deserializer: D) -> Result<DateTime<Utc>,D::Error> where D: Deserializer<'a> {
    let millis: i64 = i64::deserialize(deserializer)?;
    DateTime::from_timestamp_millis(millis).ok_or( DeError::custom("invalid timestamp value"))
}
