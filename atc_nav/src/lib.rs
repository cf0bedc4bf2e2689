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

//! the navigation core of a simulated aircraft under air traffic control.
//!
//! A [`Nav`] holds the clearances an aircraft has received (heading, altitude, speed, approach,
//! per-fix restrictions), its route and a single pending readback-delayed lateral change. ATC commands
//! (see `commands.rs`) validate against the aircraft performance envelope and either mutate that
//! state or return an [`Unable`]. Once per simulation tick the host calls [`Nav::target_heading`],
//! [`Nav::target_altitude`] and [`Nav::target_speed`] to get the targets (and rates) its
//! integrator flies towards. The [`FlightState`] itself is owned by that integrator.

use std::{fmt, sync::Arc};
use chrono::{DateTime, TimeDelta, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Serialize,Deserialize};

use atc_common::angle::normalize_heading;
use atc_common::datetime::secs_f64_delta;
use atc_common::geo::{GeoPoint, LocalProjection};

pub mod errors;
pub use errors::{NavError, Result};

pub mod config;
pub use config::{NavConfig, DelayBand};

pub mod aviation;
pub mod intent;
pub use intent::{CommandIntent, CommandResult, Unable};

pub mod hold;
pub mod clearance;
pub mod snapshot;
pub use snapshot::NavSnapshot;

mod commands;
mod targets;

use aviation::{AircraftPerformance, NavDatabase, Waypoint};
use clearance::{DeferredAction, DeferredNavHeading, DeferredQueue, FixAssignments, NavAltitude, NavApproach, NavHeading, NavSpeed};

/// rate value that tells the integrator to change as fast as the aircraft can
pub const MAXIMUM_RATE: f64 = 100000.0;

/// the physical state of the aircraft, updated by the simulation integrator.
/// Headings are magnetic, `magnetic_variation` is positive east
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct FlightState {
    pub position: GeoPoint,
    pub heading: f64,
    pub altitude: f64,
    pub ias: f64,
    pub gs: f64,
    pub magnetic_variation: f64,
    pub nm_per_longitude: f64,

    pub arrival_airport: Waypoint,
    pub arrival_airport_location: GeoPoint,
    pub arrival_airport_elevation: f64,
    pub departure_airport_elevation: f64,

    pub initial_departure_climb: bool,
}

impl FlightState {
    pub fn projection (&self)->LocalProjection { LocalProjection::new( self.nm_per_longitude) }

    pub fn to_magnetic (&self, true_heading: f64)->f64 { normalize_heading( true_heading - self.magnetic_variation) }

    pub fn to_true (&self, magnetic_heading: f64)->f64 { normalize_heading( magnetic_heading + self.magnetic_variation) }

    /// magnetic heading from the current position to `p`
    pub fn heading_to (&self, p: &GeoPoint)->f64 {
        self.to_magnetic( self.projection().heading( &self.position, p))
    }

    pub fn departure_agl (&self)->f64 { self.altitude - self.departure_airport_elevation }
}

/// the clearance state and route of one aircraft
pub struct Nav {
    pub callsign: String,
    pub flight_state: FlightState,

    pub heading: NavHeading,
    pub altitude: NavAltitude,
    pub speed: NavSpeed,
    pub approach: NavApproach,
    pub deferred: DeferredQueue,
    pub fix_assignments: FixAssignments,
    pub waypoints: Vec<Waypoint>,

    /// the filed cruise altitude (0 if none was filed)
    pub final_altitude: f64,

    pub perf: Arc<AircraftPerformance>,
    pub config: Arc<NavConfig>,
    db: Arc<dyn NavDatabase>,
    rng: StdRng,
}

impl Nav {
    pub fn new (callsign: impl ToString, flight_state: FlightState, waypoints: Vec<Waypoint>, final_altitude: f64,
                perf: Arc<AircraftPerformance>, db: Arc<dyn NavDatabase>, config: Arc<NavConfig>, seed: u64)->Self {
        Nav {
            callsign: callsign.to_string(),
            flight_state,
            heading: NavHeading::default(),
            altitude: NavAltitude::default(),
            speed: NavSpeed::default(),
            approach: NavApproach::default(),
            deferred: DeferredQueue::default(),
            fix_assignments: FixAssignments::new(),
            waypoints,
            final_altitude,
            perf,
            config,
            db,
            rng: StdRng::seed_from_u64( seed),
        }
    }

    /// true once the aircraft is fast enough to fly
    pub fn is_airborne (&self)->bool { self.flight_state.ias >= self.perf.speed.v2 }

    /// the commanded heading, which is the pending deferred one if there is any
    pub fn assigned_heading (&self)->Option<f64> {
        match self.deferred.pending() {
            Some(DeferredNavHeading{ action: DeferredAction::Heading{heading,..}, ..}) => Some(*heading),
            Some(_) => None,
            None => self.heading.assigned_heading()
        }
    }

    /// the commanded route, which is the pending deferred one if there is any
    pub fn assigned_waypoints (&self)->&[Waypoint] {
        match self.deferred.pending() {
            Some(DeferredNavHeading{ action: DeferredAction::Waypoints(wps), ..}) => wps.as_slice(),
            _ => self.waypoints.as_slice()
        }
    }

    /// the route that gets amended by route clearances, which is the pending one if there is any
    fn assigned_waypoints_mut (&mut self)->&mut Vec<Waypoint> {
        match self.deferred.pending_waypoints_mut() {
            Some(wps) => wps,
            None => &mut self.waypoints
        }
    }

    /// a pending route change still stands when the pending action is dropped for a new lateral mode
    fn adopt_pending_route (&mut self) {
        if let Some(wps) = self.deferred.pending_waypoints_mut() {
            self.waypoints = std::mem::take( wps);
        }
    }

    /// true if we fly an assigned heading or have been told to turn onto one
    pub fn is_vectored (&self)->bool {
        self.heading.is_assigned()
            || matches!( self.deferred.pending(), Some(DeferredNavHeading{ action: DeferredAction::Heading{..}, ..}))
    }

    /// random pilot response delay within `band`
    fn delay (&mut self, band: DelayBand)->TimeDelta {
        let secs = if band.max_secs > band.min_secs {
            self.rng.random_range( band.min_secs..=band.max_secs)
        } else {
            band.min_secs
        };
        secs_f64_delta( secs)
    }

    fn enqueue (&mut self, now: DateTime<Utc>, band: DelayBand, action: DeferredAction) {
        let time = now + self.delay( band);
        self.deferred.enqueue( DeferredNavHeading{ time, action });
    }

    fn heading_delay_band (&self)->DelayBand {
        if self.heading.is_assigned() { self.config.on_heading_delay } else { self.config.heading_delay }
    }

    /// schedule a heading change with the readback delay that depends on whether we already fly a heading
    pub fn enqueue_heading (&mut self, heading: f64, turn: aviation::TurnMethod, now: DateTime<Utc>) {
        let band = self.heading_delay_band();
        self.enqueue( now, band, DeferredAction::Heading{ heading, turn });
    }

    pub fn enqueue_direct_fix (&mut self, waypoints: Vec<Waypoint>, now: DateTime<Utc>) {
        let band = self.config.route_delay;
        self.enqueue( now, band, DeferredAction::Waypoints(waypoints));
    }

    pub fn enqueue_on_course (&mut self, now: DateTime<Utc>) {
        let band = self.config.route_delay;
        self.enqueue( now, band, DeferredAction::OnCourse);
    }
}

impl fmt::Display for Nav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fs = &self.flight_state;
        write!(f, "{} {} hdg:{:03.0} alt:{:.0} ias:{:.0}", self.callsign, fs.position, fs.heading, fs.altitude, fs.ias)
    }
}
