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

use serde::{Serialize,Deserialize};

use crate::Nav;
use crate::aviation::Waypoint;
use crate::clearance::{DeferredQueue, FixAssignments, NavAltitude, NavApproach, NavHeading, NavSpeed};

/// a deep copy of the clearance state of a [`Nav`] that can be used to roll back speculative commands.
/// The flight state is not part of it
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct NavSnapshot {
    pub heading: NavHeading,
    pub altitude: NavAltitude,
    pub speed: NavSpeed,
    pub approach: NavApproach,
    pub deferred: DeferredQueue,
    pub fix_assignments: FixAssignments,
    pub waypoints: Vec<Waypoint>,
}

impl Nav {
    pub fn take_snapshot (&self)->NavSnapshot {
        NavSnapshot {
            heading: self.heading.clone(),
            altitude: self.altitude.clone(),
            speed: self.speed.clone(),
            approach: self.approach.clone(),
            deferred: self.deferred.clone(),
            fix_assignments: self.fix_assignments.clone(),
            waypoints: self.waypoints.clone(),
        }
    }

    pub fn restore_snapshot (&mut self, snapshot: NavSnapshot) {
        let NavSnapshot{ heading, altitude, speed, approach, deferred, fix_assignments, waypoints } = snapshot;
        self.heading = heading;
        self.altitude = altitude;
        self.speed = speed;
        self.approach = approach;
        self.deferred = deferred;
        self.fix_assignments = fix_assignments;
        self.waypoints = waypoints;
    }
}
