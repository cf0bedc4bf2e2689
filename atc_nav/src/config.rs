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

//! policy constants of the nav core. All thresholds and delay bands are read from a RON
//! config so that they can be tuned without touching the resolution algorithms.

use std::{fs, path::Path};
use serde::{Serialize,Deserialize};

use crate::errors::{Result, NavError, config_error};

/// a closed interval of pilot response delays in seconds
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct DelayBand {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayBand {
    pub const fn new (min_secs: f64, max_secs: f64)->Self { DelayBand{ min_secs, max_secs } }
}

/// the hold speed for altitudes up to (and including) `max_altitude`
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct HoldSpeedBand {
    pub max_altitude: f64,
    pub speed: f64,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// delay before a new heading is flown if the aircraft is on its own navigation
    pub heading_delay: DelayBand,
    /// delay before a new heading is flown if the aircraft already flies an assigned heading
    pub on_heading_delay: DelayBand,
    /// delay before route changes (direct, via SID/STAR, on course) take effect
    pub route_delay: DelayBand,

    pub direct_fix_range: f64,           // nm
    pub waypoint_pass_distance: f64,     // nm
    pub waypoint_overfly_distance: f64,  // nm, waypoints behind the aircraft are passed within this range
    pub min_intercept_lead: f64,         // nm
    pub arc_join_tolerance: f64,         // deg

    pub hold_speed_eta: f64,             // sec
    pub waypoint_speed_eta: f64,         // sec
    pub hold_speeds: Vec<HoldSpeedBand>, // ordered by max_altitude, last band applies above

    pub go_around_climb: f64,            // ft above airport elevation
    pub go_around_rounding: f64,         // ft

    pub slowest_practical_margin: f64,   // kts above landing speed
    pub speed_limit_altitude: f64,       // ft
    pub speed_limit: f64,                // kts below speed_limit_altitude

    pub after_speed_tolerance: f64,      // kts
    pub after_altitude_tolerance: f64,   // ft
}

impl Default for NavConfig {
    fn default()->Self {
        NavConfig {
            heading_delay: DelayBand::new( 5.0, 9.0),
            on_heading_delay: DelayBand::new( 3.0, 6.0),
            route_delay: DelayBand::new( 8.0, 13.0),

            direct_fix_range: 150.0,
            waypoint_pass_distance: 0.25,
            waypoint_overfly_distance: 2.0,
            min_intercept_lead: 0.2,
            arc_join_tolerance: 1.0,

            hold_speed_eta: 180.0,
            waypoint_speed_eta: 5.0,
            hold_speeds: vec![
                HoldSpeedBand{ max_altitude: 6000.0, speed: 200.0 },
                HoldSpeedBand{ max_altitude: 14000.0, speed: 230.0 },
                HoldSpeedBand{ max_altitude: f64::MAX, speed: 265.0 },
            ],

            go_around_climb: 2500.0,
            go_around_rounding: 1000.0,

            slowest_practical_margin: 5.0,
            speed_limit_altitude: 10000.0,
            speed_limit: 250.0,

            after_speed_tolerance: 1.0,
            after_altitude_tolerance: 50.0,
        }
    }
}

impl NavConfig {
    pub fn load (path: impl AsRef<Path>)->Result<Self> {
        let s = fs::read_to_string( path)?;
        Self::from_ron_str( &s)
    }

    pub fn from_ron_str (s: &str)->Result<Self> {
        let config: NavConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate (&self)->Result<()> {
        for (name,band) in [("heading_delay", &self.heading_delay), ("on_heading_delay", &self.on_heading_delay), ("route_delay", &self.route_delay)] {
            if band.min_secs < 0.0 || band.min_secs > band.max_secs {
                return Err( config_error!("{name} has invalid range [{},{}]", band.min_secs, band.max_secs))
            }
        }
        if self.hold_speeds.is_empty() {
            return Err( config_error!("no hold speeds"))
        }
        if self.go_around_rounding <= 0.0 {
            return Err( config_error!("go_around_rounding has to be positive"))
        }
        Ok(())
    }

    /// the published hold speed for the given altitude
    pub fn hold_speed (&self, altitude: f64)->f64 {
        self.hold_speeds.iter()
            .find( |b| altitude <= b.max_altitude)
            .or( self.hold_speeds.last())
            .map( |b| b.speed)
            .unwrap_or( self.speed_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = NavConfig::from_ron_str( "(direct_fix_range: 100.0, route_delay: (min_secs: 2.0, max_secs: 4.0))").unwrap();
        assert_eq!( config.direct_fix_range, 100.0);
        assert_eq!( config.route_delay, DelayBand::new( 2.0, 4.0));
        assert_eq!( config.heading_delay, NavConfig::default().heading_delay);
    }

    #[test]
    fn test_invalid_band() {
        let res = NavConfig::from_ron_str( "(heading_delay: (min_secs: 9.0, max_secs: 5.0))");
        assert!( matches!( res, Err(NavError::InvalidConfig(_))));
    }

    #[test]
    fn test_hold_speed() {
        let config = NavConfig::default();
        assert_eq!( config.hold_speed( 5000.0), 200.0);
        assert_eq!( config.hold_speed( 6000.0), 200.0);
        assert_eq!( config.hold_speed( 12000.0), 230.0);
        assert_eq!( config.hold_speed( 20000.0), 265.0);
    }
}
