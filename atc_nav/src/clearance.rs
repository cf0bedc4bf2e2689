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

//! per-channel clearance state. Each channel has one exclusive mode (a tagged variant) plus the side
//! channels that can coexist with any mode (restrictions inherited from passed waypoints and
//! conditional clearances that wait for a speed or altitude to be reached).

use std::{collections::HashMap, sync::Arc};
use chrono::{DateTime, Utc};
use serde::{Serialize,Deserialize};

use atc_common::datetime::{ser_epoch_millis, de_from_epoch_millis, short_utc_time_string};
use atc_common::debug;

use crate::aviation::{AltitudeRestriction, Approach, DMEArc, TurnMethod, Waypoint};
use crate::hold::FlyHold;

/* #region NavHeading *******************************************************************************************/

/// the lateral mode
#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub enum NavHeading {
    #[default]
    Route,
    Assigned { heading: f64, turn: TurnMethod },
    Arc { arc: DMEArc, joining: bool },
    Hold(FlyHold),
}

impl NavHeading {
    pub fn assigned_heading (&self)->Option<f64> {
        if let NavHeading::Assigned{heading,..} = self { Some(*heading) } else { None }
    }

    pub fn is_assigned (&self)->bool { matches!( self, NavHeading::Assigned{..}) }
    pub fn is_route (&self)->bool { matches!( self, NavHeading::Route) }
    pub fn is_holding (&self)->bool { matches!( self, NavHeading::Hold(_)) }
}

/* #endregion NavHeading */

/* #region NavAltitude ******************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum AltitudeClearance {
    /// a hard clearance that is flown at maximum rate
    Assigned(f64),
    /// an interim limit that is capped by the filed final altitude
    Cleared(f64),
}

/// altitude clearance that takes effect once `speed` is reached
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct AltitudeAfterSpeed {
    pub altitude: f64,
    pub speed: f64,
}

#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct NavAltitude {
    pub clearance: Option<AltitudeClearance>,
    pub restriction: Option<AltitudeRestriction>,
    pub after_speed: Option<AltitudeAfterSpeed>,
}

impl NavAltitude {
    pub fn assigned (&self)->Option<f64> {
        if let Some(AltitudeClearance::Assigned(alt)) = self.clearance { Some(alt) } else { None }
    }

    pub fn cleared (&self)->Option<f64> {
        if let Some(AltitudeClearance::Cleared(alt)) = self.clearance { Some(alt) } else { None }
    }

    pub fn clear_assigned (&mut self) {
        if self.assigned().is_some() { self.clearance = None }
    }
}

/* #endregion NavAltitude */

/* #region NavSpeed *********************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub enum SpeedMode {
    Assigned(f64),
    SlowestPractical,
    MaximumForward,
}

/// speed clearance that takes effect once `altitude` is reached
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct SpeedAfterAltitude {
    pub speed: f64,
    pub altitude: f64,
}

#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct NavSpeed {
    pub mode: Option<SpeedMode>,
    pub restriction: Option<f64>,
    pub after_altitude: Option<SpeedAfterAltitude>,
}

impl NavSpeed {
    pub fn assigned (&self)->Option<f64> {
        if let Some(SpeedMode::Assigned(spd)) = self.mode { Some(spd) } else { None }
    }
}

/* #endregion NavSpeed */

/* #region NavApproach ******************************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize)]
pub enum InterceptState {
    #[default]
    NotIntercepting,
    /// cleared while on a vector, waiting for the final approach course
    InitialHeading,
    OnCourse,
}

#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct NavApproach {
    pub assigned: Option<Arc<Approach>>,
    pub assigned_id: String,
    pub cleared: bool,
    pub passed_faf: bool,
    pub intercept_state: InterceptState,
}

impl NavApproach {
    pub fn approach_name (&self)->String {
        self.assigned.as_ref().map( |ap| ap.full_name.clone()).unwrap_or_else( || self.assigned_id.clone())
    }
}

/* #endregion NavApproach */

/* #region deferred heading *************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum DeferredAction {
    Heading { heading: f64, turn: TurnMethod },
    Waypoints(Vec<Waypoint>),
    /// drop any assigned heading and fly the route
    OnCourse,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct DeferredNavHeading {
    #[serde(serialize_with="ser_epoch_millis", deserialize_with="de_from_epoch_millis")]
    pub time: DateTime<Utc>,
    pub action: DeferredAction,
}

/// the single slot for a commanded but not yet executed lateral change. The last enqueued action wins
#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct DeferredQueue {
    slot: Option<DeferredNavHeading>
}

impl DeferredQueue {
    /// store `deferred`, returning the pending action it replaces (if any)
    pub fn enqueue (&mut self, deferred: DeferredNavHeading)->Option<DeferredNavHeading> {
        let replaced = self.slot.replace( deferred);
        if let Some(d) = &replaced {
            debug!("replacing pending deferred action due {}", short_utc_time_string(&d.time));
        }
        replaced
    }

    /// consume the pending action if it is due at `now`
    pub fn take_due (&mut self, now: DateTime<Utc>)->Option<DeferredNavHeading> {
        if self.slot.as_ref().is_some_and( |d| d.time <= now) { self.slot.take() } else { None }
    }

    pub fn pending (&self)->Option<&DeferredNavHeading> { self.slot.as_ref() }

    pub fn is_pending (&self)->bool { self.slot.is_some() }

    /// the route of a pending route change, if that is what is pending
    pub fn pending_waypoints_mut (&mut self)->Option<&mut Vec<Waypoint>> {
        match &mut self.slot {
            Some(DeferredNavHeading{ action: DeferredAction::Waypoints(wps), ..}) => Some(wps),
            _ => None
        }
    }

    /// move the trigger time of a pending action forward to `time`. Never delays it
    pub fn shorten_to (&mut self, time: DateTime<Utc>)->bool {
        match &mut self.slot {
            Some(d) if time < d.time => { d.time = time; true }
            _ => false
        }
    }

    pub fn clear (&mut self) { self.slot = None }
}

/* #endregion deferred heading */

/// a "cross <fix> at" restriction that is applied once the fix is passed
#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct NavFixAssignment {
    pub arrive: ArriveAssignment,
}

#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct ArriveAssignment {
    pub altitude: Option<AltitudeRestriction>,
    pub speed: Option<f64>,
}

pub type FixAssignments = HashMap<String,NavFixAssignment>;
