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

//! holding pattern geometry. A [`FlyHold`] is a small state machine that takes the aircraft to the
//! hold fix, flies the entry procedure that matches the arrival heading and then cycles through
//! the racetrack (outbound turn, outbound leg, inbound turn, inbound leg).

use chrono::{DateTime, Utc};
use serde::{Serialize,Deserialize};

use atc_common::angle::{heading_difference, normalize_360, normalize_heading, opposite_heading};
use atc_common::datetime::seconds_between;
use atc_common::geo::{GeoPoint, LocalProjection};
use atc_common::debug;

use crate::aviation::{Hold, TurnDirection, TurnMethod};

/// heading change that separates a teardrop entry leg from the outbound course
const TEARDROP_OFFSET: f64 = 30.0;
/// we consider the aircraft established on a heading within this tolerance
const ON_HEADING_TOLERANCE: f64 = 1.0;
/// the inbound turn is finished by flying direct to the fix once within this angle of the inbound course
const INBOUND_CAPTURE: f64 = 10.0;
const RETURN_CAPTURE: f64 = 5.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum HoldEntry {
    Direct,
    Parallel,
    Teardrop,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum HoldState {
    ApproachingFix,
    EntryOutbound,
    EntryReturn,
    TurningOutbound,
    Outbound,
    TurningInbound,
    Inbound,
}

/// what the hold needs to know about the aircraft. `heading` is magnetic
#[derive(Debug,Clone,Copy)]
pub struct HoldContext {
    pub position: GeoPoint,
    pub heading: f64,
    pub magnetic_variation: f64,
    pub proj: LocalProjection,
    pub pass_distance: f64,
    pub overfly_distance: f64,
}

impl HoldContext {
    fn magnetic_bearing_to (&self, p: &GeoPoint)->f64 {
        normalize_heading( self.proj.heading( &self.position, p) - self.magnetic_variation)
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct FlyHold {
    pub hold: Hold,
    pub fix_location: GeoPoint,
    pub entry: Option<HoldEntry>,
    pub state: HoldState,
    pub leg_start: Option<DateTime<Utc>>,
}

impl FlyHold {
    pub fn new (hold: Hold, fix_location: GeoPoint)->Self {
        FlyHold { hold, fix_location, entry: None, state: HoldState::ApproachingFix, leg_start: None }
    }

    /// the entry procedure for an aircraft arriving at the fix on `heading`. The 180° sector behind the
    /// inbound course gets a direct entry, the 70° sector on the holding side a teardrop and the
    /// remaining 110° sector a parallel entry
    pub fn entry_for_heading (hold: &Hold, heading: f64)->HoldEntry {
        let rel = match hold.turn_direction {
            TurnDirection::Right => normalize_360( heading - hold.inbound_course),
            TurnDirection::Left => normalize_360( hold.inbound_course - heading),
        };

        if rel <= 110.0 || rel >= 290.0 {
            HoldEntry::Direct
        } else if rel <= 180.0 {
            HoldEntry::Teardrop
        } else {
            HoldEntry::Parallel
        }
    }

    pub fn distance_to_fix (&self, position: &GeoPoint)->f64 {
        position.distance_nm( &self.fix_location)
    }

    pub fn is_entering (&self)->bool {
        matches!( self.state, HoldState::ApproachingFix | HoldState::EntryOutbound | HoldState::EntryReturn)
    }

    fn outbound_course (&self)->f64 { opposite_heading( self.hold.inbound_course) }

    fn teardrop_heading (&self)->f64 {
        match self.hold.turn_direction {
            TurnDirection::Right => normalize_heading( self.outbound_course() - TEARDROP_OFFSET),
            TurnDirection::Left => normalize_heading( self.outbound_course() + TEARDROP_OFFSET),
        }
    }

    fn at_fix (&self, ctx: &HoldContext)->bool {
        let dist = ctx.proj.distance_nm( &ctx.position, &self.fix_location);
        if dist <= ctx.pass_distance { return true }

        // overshot the fix
        dist <= ctx.overfly_distance && heading_difference( ctx.heading, ctx.magnetic_bearing_to( &self.fix_location)) > 90.0
    }

    fn outbound_leg_done (&self, ctx: &HoldContext, now: DateTime<Utc>)->bool {
        if self.hold.leg_length > 0.0 {
            ctx.proj.distance_nm( &ctx.position, &self.fix_location) >= self.hold.leg_length
        } else if let Some(t0) = &self.leg_start {
            seconds_between( &now, t0) >= self.hold.leg_minutes * 60.0
        } else {
            true
        }
    }

    fn set_state (&mut self, state: HoldState) {
        debug!("hold at {}: {:?} -> {:?}", self.hold.fix, self.state, state);
        self.state = state;
    }

    /// advance the hold state machine for the current aircraft position/heading and return the
    /// (magnetic) heading to fly together with the turn method to get there
    pub fn target_heading (&mut self, ctx: &HoldContext, now: DateTime<Utc>)->(f64,TurnMethod) {
        let inbound = self.hold.inbound_course;
        let outbound = self.outbound_course();
        let bearing_to_fix = ctx.magnetic_bearing_to( &self.fix_location);

        match self.state {
            HoldState::ApproachingFix => {
                if self.at_fix(ctx) {
                    let entry = Self::entry_for_heading( &self.hold, ctx.heading);
                    self.entry = Some(entry);
                    if entry == HoldEntry::Direct {
                        self.set_state( HoldState::TurningOutbound);
                    } else {
                        self.leg_start = Some(now);
                        self.set_state( HoldState::EntryOutbound);
                    }
                }
            }
            HoldState::EntryOutbound => {
                if self.outbound_leg_done( ctx, now) {
                    if self.entry == Some(HoldEntry::Parallel) {
                        self.set_state( HoldState::EntryReturn);
                    } else {
                        self.set_state( HoldState::TurningInbound);
                    }
                }
            }
            HoldState::EntryReturn => {
                if heading_difference( ctx.heading, bearing_to_fix) < RETURN_CAPTURE {
                    self.set_state( HoldState::Inbound);
                }
            }
            HoldState::TurningOutbound => {
                if heading_difference( ctx.heading, outbound) < ON_HEADING_TOLERANCE {
                    self.leg_start = Some(now);
                    self.set_state( HoldState::Outbound);
                }
            }
            HoldState::Outbound => {
                if self.outbound_leg_done( ctx, now) {
                    self.set_state( HoldState::TurningInbound);
                }
            }
            HoldState::TurningInbound => {
                if heading_difference( ctx.heading, inbound) < INBOUND_CAPTURE {
                    self.set_state( HoldState::Inbound);
                }
            }
            HoldState::Inbound => {
                if self.at_fix(ctx) {
                    self.set_state( HoldState::TurningOutbound);
                }
            }
        }

        let dir = self.hold.turn_direction;
        match self.state {
            HoldState::ApproachingFix | HoldState::Inbound => (bearing_to_fix, TurnMethod::Closest),
            HoldState::EntryOutbound => match self.entry {
                Some(HoldEntry::Parallel) => (outbound, dir.opposite().turn_method()),
                _ => (self.teardrop_heading(), TurnMethod::Closest),
            }
            HoldState::EntryReturn => (bearing_to_fix, dir.opposite().turn_method()),
            HoldState::TurningOutbound => (outbound, dir.turn_method()),
            HoldState::Outbound => (outbound, TurnMethod::Closest),
            HoldState::TurningInbound => (inbound, dir.turn_method()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_sectors() {
        let hold = Hold::new( "ROSLY", 360.0, TurnDirection::Right);
        assert_eq!( FlyHold::entry_for_heading( &hold, 360.0), HoldEntry::Direct);
        assert_eq!( FlyHold::entry_for_heading( &hold, 90.0), HoldEntry::Direct);
        assert_eq!( FlyHold::entry_for_heading( &hold, 300.0), HoldEntry::Direct);
        assert_eq!( FlyHold::entry_for_heading( &hold, 150.0), HoldEntry::Teardrop);
        assert_eq!( FlyHold::entry_for_heading( &hold, 220.0), HoldEntry::Parallel);

        let hold = Hold::new( "ROSLY", 360.0, TurnDirection::Left);
        assert_eq!( FlyHold::entry_for_heading( &hold, 210.0), HoldEntry::Teardrop);
        assert_eq!( FlyHold::entry_for_heading( &hold, 140.0), HoldEntry::Parallel);
        assert_eq!( FlyHold::entry_for_heading( &hold, 60.0), HoldEntry::Direct);
    }
}
