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

//! per tick target resolution. Each function reads the clearance state and the flight state and
//! returns what the integrator should fly towards, together with the rate of change
//! (deg/sec for turns, ft/min for altitude changes, [`MAXIMUM_RATE`] for "as fast as possible").

use std::iter;
use chrono::{DateTime, Utc};

use atc_common::{asin, clamp, deg, lerp, rad, tan};
use atc_common::angle::{heading_difference, normalize_heading};
use atc_common::geo::{path_length_nm, GeoPoint};
use atc_common::units::eta_seconds;
use atc_common::{debug, info, warn};

use crate::{Nav, MAXIMUM_RATE};
use crate::aviation::{ias_to_tas, AltitudeRestriction, DMEArc, TurnMethod, Waypoint, WindSample};
use crate::clearance::{AltitudeClearance, DeferredAction, InterceptState, NavAltitude, NavHeading, SpeedMode};
use crate::hold::{FlyHold, HoldContext};

/// standard rate turn in deg/sec
const STANDARD_TURN_RATE: f64 = 3.0;
/// max intercept angle correction when tracking a DME arc
const MAX_ARC_CORRECTION: f64 = 30.0;
/// arc correction per nm of radial deviation
const ARC_CORRECTION_PER_NM: f64 = 30.0;
/// we leave an arc once our radial is within this angle of the next waypoint's radial
const ARC_EXIT_TOLERANCE: f64 = 2.0;

impl Nav {

    /// apply the pending deferred action if it is due at `now`
    pub fn resolve_deferred (&mut self, now: DateTime<Utc>) {
        if let Some(d) = self.deferred.take_due( now) {
            match d.action {
                DeferredAction::Heading{ heading, turn } => {
                    debug!("{} flying heading {heading:03.0}", self.callsign);
                    self.heading = NavHeading::Assigned{ heading, turn };
                }
                DeferredAction::Waypoints( waypoints) => {
                    debug!("{} proceeding to {}", self.callsign, waypoints.first().map( |wp| wp.fix.as_str()).unwrap_or("?"));
                    self.waypoints = waypoints;
                    self.heading = NavHeading::Route;
                }
                DeferredAction::OnCourse => {
                    debug!("{} on course", self.callsign);
                    self.heading = NavHeading::Route;
                }
            }
        }
    }

    /* #region heading **********************************************************************************************/

    /// the turn rate in deg/sec at max bank angle, limited to a standard rate turn
    pub fn turn_rate (&self)->f64 {
        let tas = ias_to_tas( self.flight_state.ias, self.flight_state.altitude);
        if tas <= 0.0 { return STANDARD_TURN_RATE }
        (1091.0 * tan( rad( self.perf.turn.max_bank_angle)) / tas).min( STANDARD_TURN_RATE)
    }

    /// the (magnetic) heading to fly, how to turn there and the turn rate
    pub fn target_heading (&mut self, wind: &WindSample, now: DateTime<Utc>)->(f64,TurnMethod,f64) {
        self.resolve_deferred( now);
        let rate = self.turn_rate();

        if let NavHeading::Assigned{ heading, turn } = self.heading {
            let intercepted = self.approach.cleared
                && self.approach.intercept_state == InterceptState::InitialHeading
                && self.check_final_approach_intercept();
            if !intercepted {
                return (heading, turn, rate)
            }
        }

        if self.heading.is_holding() {
            let ctx = self.hold_context();
            if let NavHeading::Hold(fh) = &mut self.heading {
                let (heading,turn) = fh.target_heading( &ctx, now);
                return (heading, turn, rate)
            }
        }

        if let NavHeading::Arc{ arc, joining } = self.heading {
            if joining {
                if heading_difference( self.flight_state.heading, arc.initial_heading) < self.config.arc_join_tolerance {
                    info!("{} joined arc around {}", self.callsign, arc.center);
                    self.heading = NavHeading::Arc{ arc, joining: false };
                } else {
                    return (arc.initial_heading, TurnMethod::Closest, rate)
                }
            }

            if self.is_arc_complete( &arc) {
                info!("{} leaving arc", self.callsign);
                self.heading = NavHeading::Route;
            } else {
                return (self.arc_heading( &arc, wind), TurnMethod::Closest, rate)
            }
        }

        self.sequence_waypoints();
        if !self.heading.is_route() { // passed a waypoint that starts an arc or hold
            return self.target_heading( wind, now)
        }

        if let Some(wp) = self.waypoints.first() {
            let course = self.flight_state.projection().heading( &self.flight_state.position, &wp.location);
            let heading = self.flight_state.to_magnetic( self.wind_corrected_heading( course, wind));
            (heading, TurnMethod::Closest, rate)

        } else {
            warn!("{} has no route, holding heading", self.callsign);
            (self.flight_state.heading, TurnMethod::Closest, rate)
        }
    }

    /// the true heading that makes good the true `course` in the given wind
    fn wind_corrected_heading (&self, course: f64, wind: &WindSample)->f64 {
        let tas = ias_to_tas( self.flight_state.ias, self.flight_state.altitude);
        if wind.speed <= 0.0 || tas <= 0.0 { return course }

        let x = clamp( wind.crosswind( course) / tas, -1.0, 1.0);
        normalize_heading( course + deg( asin(x)))
    }

    fn hold_context (&self)->HoldContext {
        let fs = &self.flight_state;
        HoldContext {
            position: fs.position,
            heading: fs.heading,
            magnetic_variation: fs.magnetic_variation,
            proj: fs.projection(),
            pass_distance: self.config.waypoint_pass_distance,
            overfly_distance: self.config.waypoint_overfly_distance,
        }
    }

    /// heading that keeps us on the arc, correcting towards the arc radius
    fn arc_heading (&self, arc: &DMEArc, wind: &WindSample)->f64 {
        let fs = &self.flight_state;
        let proj = fs.projection();
        let radial = proj.heading( &arc.center, &fs.position);
        let deviation = proj.distance_nm( &arc.center, &fs.position) - arc.radius; // positive if outside

        let correction = clamp( deviation * ARC_CORRECTION_PER_NM, -MAX_ARC_CORRECTION, MAX_ARC_CORRECTION);
        let course = if arc.clockwise { radial + 90.0 + correction } else { radial - 90.0 - correction };
        fs.to_magnetic( self.wind_corrected_heading( normalize_heading( course), wind))
    }

    fn is_arc_complete (&self, arc: &DMEArc)->bool {
        let Some(wp) = self.waypoints.first() else { return true };
        let proj = self.flight_state.projection();
        let radial = proj.heading( &arc.center, &self.flight_state.position);
        let exit_radial = proj.heading( &arc.center, &wp.location);
        heading_difference( radial, exit_radial) < ARC_EXIT_TOLERANCE
    }

    /// pass all waypoints we have reached. The arrival airport is never passed
    fn sequence_waypoints (&mut self) {
        while let Some(wp) = self.waypoints.first() {
            let fs = &self.flight_state;
            if self.waypoints.len() == 1 && wp.fix == fs.arrival_airport.fix { break }

            let dist = fs.projection().distance_nm( &fs.position, &wp.location);
            let passed = dist <= self.config.waypoint_pass_distance
                || (dist <= self.config.waypoint_overfly_distance && heading_difference( fs.heading, fs.heading_to( &wp.location)) > 90.0);
            if !passed { break }

            let wp = self.waypoints.remove(0);
            self.pass_waypoint( wp);
        }
    }

    fn pass_waypoint (&mut self, wp: Waypoint) {
        let arrive = self.fix_assignments.remove( &wp.fix).map( |fa| fa.arrive).unwrap_or_default();

        if let Some(ar) = arrive.altitude.or( wp.altitude_restriction) {
            self.altitude.restriction = Some(ar);
        }
        self.speed.restriction = arrive.speed.or( wp.speed);
        if wp.faf && self.approach.cleared {
            info!("{} passed final approach fix {}", self.callsign, wp.fix);
            self.approach.passed_faf = true;
        }

        if let Some(arc) = wp.arc {
            info!("{} joining arc at {}", self.callsign, wp.fix);
            self.heading = NavHeading::Arc{ arc, joining: true };
        } else if let Some(hold) = wp.hold {
            info!("{} entering hold at {}", self.callsign, wp.fix);
            self.heading = NavHeading::Hold( FlyHold::new( hold, wp.location));
        }

        debug!("{} passed {}", self.callsign, wp.fix);
    }

    /// check if we are about to cross the final approach course and, if so, turn onto it
    fn check_final_approach_intercept (&mut self)->bool {
        let Some(approach) = self.approach.assigned.clone() else { return false };
        let n = approach.waypoints.len();
        if n < 2 { return false }

        let fs = &self.flight_state;
        let proj = fs.projection();
        let (start,end) = (&approach.waypoints[n-2].location, &approach.waypoints[n-1].location);

        let course = fs.to_magnetic( proj.heading( start, end));
        let angle = heading_difference( fs.heading, course);
        if angle > 90.0 { return false } // flying away from the course

        let sp = proj.project_on_segment( &fs.position, start, end);
        if sp.t >= 1.0 { return false } // already past the threshold

        // lead the turn by the distance we need to roll out on the course
        let radius = (fs.gs / 3600.0) / rad( self.turn_rate());
        let lead = (radius * (1.0 - rad(angle).cos())).max( self.config.min_intercept_lead);
        if proj.cross_track_nm( &fs.position, start, end).abs() > lead { return false }

        // the remaining route are the approach waypoints ahead of us along the final course
        let along = |p: &GeoPoint| proj.project_on_segment( p, start, end).t;
        let t = along( &fs.position);
        let mut waypoints: Vec<Waypoint> = approach.waypoints.iter().filter( |wp| along( &wp.location) > t).cloned().collect();
        if waypoints.is_empty() {
            waypoints.push( approach.waypoints[n-1].clone());
        }

        info!("{} established on {}", self.callsign, approach.full_name);
        self.waypoints = waypoints;
        self.heading = NavHeading::Route;
        self.approach.intercept_state = InterceptState::OnCourse;
        self.altitude.clear_assigned();
        true
    }

    /* #endregion heading */

    /* #region altitude *********************************************************************************************/

    /// promote an altitude clearance that waited for its speed
    fn promote_after_speed (&mut self) {
        if let Some(aas) = self.altitude.after_speed {
            if (self.flight_state.ias - aas.speed).abs() < self.config.after_speed_tolerance {
                debug!("{} reached {:.0} knots, now maintaining {:.0}", self.callsign, aas.speed, aas.altitude);
                self.altitude = NavAltitude{ clearance: Some( AltitudeClearance::Assigned( aas.altitude)), ..NavAltitude::default() };
            }
        }
    }

    /// target altitude and climb/descent rate (ft/min)
    pub fn target_altitude (&mut self)->(f64,f64) {
        self.promote_after_speed();
        let alt = self.flight_state.altitude;

        if self.flight_state.initial_departure_climb && !self.is_airborne() {
            let target = match self.altitude.clearance {
                Some(AltitudeClearance::Assigned(a)) | Some(AltitudeClearance::Cleared(a)) => a,
                None => alt
            };
            return (target, 0.0)
        }

        if let Some(a) = self.altitude.assigned() {
            return (a, MAXIMUM_RATE)
        }
        if let Some(c) = self.altitude.cleared() {
            let target = if self.final_altitude > 0.0 { c.min( self.final_altitude) } else { c };
            return (target, MAXIMUM_RATE)
        }

        if let Some(ar) = &self.altitude.restriction {
            let target = ar.target_altitude( alt);
            if target != alt { return (target, MAXIMUM_RATE) }
        }

        if let Some(target) = self.waypoint_target_altitude() {
            return target
        }

        (alt, 0.0)
    }

    /// remaining route as (distance from current position, waypoint, effective altitude restriction)
    fn route_altitude_restrictions (&self)->Vec<(f64,&Waypoint,AltitudeRestriction)> {
        let mut list = Vec::new();
        let mut dist = 0.0;
        let mut last = &self.flight_state.position;

        for wp in &self.waypoints {
            dist += last.distance_nm( &wp.location);
            last = &wp.location;

            let ar = self.fix_assignments.get( &wp.fix).and_then( |fa| fa.arrive.altitude).or( wp.altitude_restriction);
            if let Some(ar) = ar { list.push( (dist, wp, ar)) }
        }
        list
    }

    fn waypoint_target_altitude (&mut self)->Option<(f64,f64)> {
        let alt = self.flight_state.altitude;
        let gs = self.flight_state.gs;

        // the first constraint we don't satisfy yet, bounded by the constraints before it so that
        // we never leave an earlier window on the way
        let mut floor: Option<(f64,f64)> = None;
        let mut ceiling: Option<(f64,f64)> = None;
        let mut next: Option<(f64,f64)> = None;
        for (dist,_,ar) in self.route_altitude_restrictions() {
            let target = ar.target_altitude( alt);
            if target != alt {
                next = match (floor,ceiling) {
                    (Some((fdist,lo)),_) if target < lo => Some((fdist,lo)),
                    (_,Some((cdist,hi))) if target > hi => Some((cdist,hi)),
                    _ => Some((dist,target))
                };
                break
            }
            if let Some(lo) = ar.lower() && floor.is_none_or( |(_,flo)| lo > flo) {
                floor = Some((dist,lo));
            }
            if let Some(hi) = ar.upper() && ceiling.is_none_or( |(_,chi)| hi < chi) {
                ceiling = Some((dist,hi));
            }
        }

        // past the FAF we fly a stabilized glidepath down to the next constraint (or the runway)
        if self.approach.passed_faf && self.approach.cleared {
            let (dist,target) = match next {
                Some(next) => next,
                None => {
                    self.waypoints.last()?;
                    let route = self.waypoints.iter().map( |wp| &wp.location);
                    (path_length_nm( iter::once( &self.flight_state.position).chain( route)), self.flight_state.arrival_airport_elevation)
                }
            };
            if target >= alt { return Some((alt, 0.0)) }

            let eta_min = eta_seconds( dist, gs) / 60.0;
            let rate = if eta_min > 0.0 { (alt - target) / eta_min } else { MAXIMUM_RATE };
            return Some((target, rate))
        }

        let (dist,target) = next?;
        if target == alt { return Some((alt, 0.0)) } // held by an earlier constraint
        if target > alt {
            self.release_restriction( target);
            return Some((target, MAXIMUM_RATE))
        }

        let eta_min = eta_seconds( dist, gs) / 60.0;
        let rate = if eta_min > 0.0 { (alt - target) / eta_min } else { MAXIMUM_RATE };
        if rate < self.perf.rate.descent / 2.0 {
            Some((alt, 0.0)) // too early to start down
        } else {
            self.release_restriction( target);
            Some((target, rate))
        }
    }

    /// a restriction inherited from a passed waypoint does not apply once we head for the next constraint
    fn release_restriction (&mut self, target: f64) {
        if self.altitude.restriction.is_some_and( |ar| !ar.is_satisfied_by( target)) {
            self.altitude.restriction = None;
        }
    }

    /* #endregion altitude */

    /* #region speed ************************************************************************************************/

    /// promote a speed clearance that waited for its altitude
    fn promote_after_altitude (&mut self) {
        if let Some(saa) = self.speed.after_altitude {
            if (self.flight_state.altitude - saa.altitude).abs() < self.config.after_altitude_tolerance {
                debug!("{} reached {:.0}, now maintaining {:.0} knots", self.callsign, saa.altitude, saa.speed);
                self.speed.mode = Some( SpeedMode::Assigned( saa.speed));
                self.speed.after_altitude = None;
            }
        }
    }

    /// the speed we fly if nothing else is assigned: cruise IAS, limited below the speed limit altitude and
    /// blended in above it
    pub fn cruise_speed (&self, altitude: f64)->f64 {
        let cruise_ias = self.perf.cruise_ias( altitude);
        let limited = cruise_ias.min( self.config.speed_limit);
        let limit_alt = self.config.speed_limit_altitude;

        if altitude < limit_alt {
            limited
        } else {
            let t = clamp( (altitude - limit_alt) / limit_alt, 0.0, 1.0);
            lerp( t, limited, cruise_ias)
        }
    }

    /// ground speed estimate along the true `course`, used if we don't have a ground speed yet
    fn ground_speed (&self, course: f64, wind: &WindSample)->f64 {
        if self.flight_state.gs > 0.0 {
            self.flight_state.gs
        } else {
            ias_to_tas( self.flight_state.ias, self.flight_state.altitude) - wind.headwind( course)
        }
    }

    fn eta_to (&self, p: &GeoPoint, dist: f64, wind: &WindSample)->f64 {
        let course = self.flight_state.projection().heading( &self.flight_state.position, p);
        eta_seconds( dist, self.ground_speed( course, wind))
    }

    /// target indicated airspeed and rate for the given target altitude
    pub fn target_speed (&mut self, target_altitude: f64, wind: &WindSample)->(f64,f64) {
        self.promote_after_altitude();
        let fs = &self.flight_state;
        let perf = &self.perf;
        let config = &self.config;

        match self.speed.mode {
            Some(SpeedMode::Assigned(spd)) => return (spd, MAXIMUM_RATE),
            Some(SpeedMode::SlowestPractical) => return (perf.speed.landing + config.slowest_practical_margin, MAXIMUM_RATE),
            Some(SpeedMode::MaximumForward) => return (self.cruise_speed( fs.altitude), MAXIMUM_RATE),
            None => {}
        }

        if self.approach.cleared && self.approach.passed_faf {
            return (perf.speed.landing, MAXIMUM_RATE)
        }

        // slow down early enough to cross the speed limit altitude at the limit speed
        if target_altitude < config.speed_limit_altitude && fs.ias > config.speed_limit {
            let secs_to_limit_alt = (fs.altitude - config.speed_limit_altitude) / (perf.rate.descent / 60.0);
            let secs_to_limit_speed = (fs.ias - config.speed_limit) / (perf.rate.decelerate / 2.0);
            if secs_to_limit_alt <= secs_to_limit_speed {
                return (config.speed_limit, MAXIMUM_RATE)
            }
        }

        if fs.initial_departure_climb {
            let agl = fs.departure_agl();
            if perf.is_jet() {
                return (if agl < 1500.0 { 180.0 } else { 210.0 }, MAXIMUM_RATE)
            } else {
                let v2 = perf.speed.v2;
                if agl < 500.0 { return (1.1 * v2, MAXIMUM_RATE) }
                if agl < 1000.0 { return (1.2 * v2, MAXIMUM_RATE) }
                if agl < 1500.0 { return (1.3 * v2, MAXIMUM_RATE) }
            }
        }

        if let Some(spd) = self.speed.restriction {
            return (spd, MAXIMUM_RATE)
        }

        if let NavHeading::Hold(fh) = &self.heading {
            let dist = fh.distance_to_fix( &fs.position);
            if self.eta_to( &fh.fix_location, dist, wind) < config.hold_speed_eta {
                return (config.hold_speed( fs.altitude), MAXIMUM_RATE)
            }
        }

        if let Some(spd) = self.upcoming_waypoint_speed( wind) {
            return (spd, MAXIMUM_RATE)
        }

        (self.cruise_speed( fs.altitude), MAXIMUM_RATE)
    }

    /// speed constraint of a waypoint we are about to reach
    fn upcoming_waypoint_speed (&self, wind: &WindSample)->Option<f64> {
        let mut dist = 0.0;
        let mut last = &self.flight_state.position;

        for wp in &self.waypoints {
            dist += last.distance_nm( &wp.location);
            last = &wp.location;

            if self.eta_to( &wp.location, dist, wind) >= self.config.waypoint_speed_eta { break }

            let spd = self.fix_assignments.get( &wp.fix).and_then( |fa| fa.arrive.speed).or( wp.speed);
            if spd.is_some() { return spd }
        }
        None
    }

    /* #endregion speed */
}
