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

//! the ATC command API. Every command either returns the intent the pilot reads back or an
//! [`Unable`] - in which case the nav state is left unchanged. Lateral changes are not applied
//! right away but enqueued as deferred actions to model the readback delay.

use std::iter;
use chrono::{DateTime, Utc};

use atc_common::angle::{is_valid_heading, normalize_heading};
use atc_common::geo::path_length_nm;
use atc_common::{debug, info, warn};

use crate::{Nav, NavError, Result};
use crate::aviation::{AltitudeRestriction, Hold, TurnMethod, Waypoint};
use crate::clearance::{AltitudeAfterSpeed, AltitudeClearance, InterceptState, NavAltitude, NavApproach, NavHeading, NavSpeed, SpeedAfterAltitude, SpeedMode};
use crate::hold::FlyHold;
use crate::intent::*;

impl Nav {

    /* #region heading **********************************************************************************************/

    pub fn assign_heading (&mut self, heading: f64, turn: TurnMethod, now: DateTime<Utc>)->CommandResult {
        if !is_valid_heading( heading) {
            return Err( unable!("unable. {heading} isn't a valid heading"))
        }

        self.enqueue_heading( heading, turn, now);
        debug!("{} assigned heading {heading:03.0} {turn:?}", self.callsign);
        Ok( CommandIntent::Heading( HeadingIntent{ heading, turn, heading_type: HeadingType::Assigned }))
    }

    pub fn fly_present_heading (&mut self, now: DateTime<Utc>)->CommandResult {
        let heading = normalize_heading( self.flight_state.heading);
        self.enqueue_heading( heading, TurnMethod::Closest, now);
        Ok( CommandIntent::Heading( HeadingIntent{ heading, turn: TurnMethod::Closest, heading_type: HeadingType::Present }))
    }

    /* #endregion heading */

    /* #region route ************************************************************************************************/

    pub fn direct_fix (&mut self, fix: &str, now: DateTime<Utc>)->CommandResult {
        let arrival = &self.flight_state.arrival_airport;

        let route = self.assigned_waypoints();
        let waypoints = if let Some(idx) = route.iter().position( |wp| wp.fix == fix) {
            route[idx..].to_vec()
        } else if fix == arrival.fix {
            vec![ arrival.clone() ]
        } else if let Some(location) = self.db.lookup_fix( fix) {
            vec![ Waypoint::new( fix, location), arrival.clone() ]
        } else {
            return Err( unable!("unable. {fix} isn't a valid fix"))
        };

        let dist = self.flight_state.position.distance_nm( &waypoints[0].location);
        if dist > self.config.direct_fix_range {
            return Err( unable!("unable. {fix} is too far away to go direct"))
        }

        self.enqueue_direct_fix( waypoints, now);
        debug!("{} direct {fix} ({dist:.1}nm)", self.callsign);
        Ok( CommandIntent::Navigation( NavigationIntent::new( NavigationType::DirectFix, fix)))
    }

    pub fn climb_via_sid (&mut self, now: DateTime<Utc>)->CommandResult {
        if !self.assigned_waypoints().first().is_some_and( |wp| wp.on_sid) {
            return Err( unable!("unable. We're not on a SID"))
        }
        self.clear_for_procedure( now);
        Ok( CommandIntent::Procedure( ProcedureType::ClimbViaSID))
    }

    pub fn descend_via_star (&mut self, now: DateTime<Utc>)->CommandResult {
        if !self.assigned_waypoints().first().is_some_and( |wp| wp.on_star) {
            return Err( unable!("unable. We're not on a STAR"))
        }
        self.clear_for_procedure( now);
        Ok( CommandIntent::Procedure( ProcedureType::DescendViaSTAR))
    }

    /// procedure altitudes and speeds take over from whatever was assigned before
    fn clear_for_procedure (&mut self, now: DateTime<Utc>) {
        self.altitude = NavAltitude::default();
        self.speed = NavSpeed::default();
        self.enqueue_on_course( now);
    }

    pub fn depart_on_course (&mut self, altitude: f64, exit_fix: &str, now: DateTime<Utc>)->CommandIntent {
        self.altitude = NavAltitude{ clearance: Some( AltitudeClearance::Assigned(altitude)), ..NavAltitude::default() };

        if self.heading.is_assigned() {
            if let Some(idx) = self.waypoints.iter().position( |wp| wp.fix == exit_fix) {
                self.waypoints.drain(..idx);
            } else {
                warn!("{} exit fix {exit_fix} not in route", self.callsign);
            }
            self.enqueue_on_course( now);
        }

        let mut ni = NavigationIntent::new( NavigationType::DepartOnCourse, exit_fix);
        ni.altitude = Some( AltitudeRestriction::at( altitude));
        CommandIntent::Navigation( ni)
    }

    pub fn cross_fix_at (&mut self, fix: &str, altitude: Option<AltitudeRestriction>, speed: Option<f64>)->CommandResult {
        if !self.assigned_waypoints().iter().any( |wp| wp.fix == fix) {
            return Err( unable!("unable. {fix} isn't in our route"))
        }

        let fa = self.fix_assignments.entry( fix.to_string()).or_default();
        if let Some(ar) = altitude {
            fa.arrive.altitude = Some(ar);
            self.altitude.clear_assigned();
            self.altitude.after_speed = None;
        }
        if let Some(spd) = speed {
            fa.arrive.speed = Some(spd);
            if self.speed.assigned().is_some() { self.speed.mode = None }
            self.speed.after_altitude = None;
        }

        let mut ni = NavigationIntent::new( NavigationType::CrossFixAt, fix);
        ni.altitude = altitude;
        ni.speed = speed;
        Ok( CommandIntent::Navigation( ni))
    }

    pub fn resume_own_navigation (&mut self)->CommandResult {
        if !self.is_vectored() {
            return Err( unable!("unable. We're not flying a heading"))
        }

        self.adopt_pending_route();
        self.heading = NavHeading::Route;
        self.deferred.clear();

        // keep the route from the closest segment onwards
        if self.waypoints.len() > 1 {
            let proj = self.flight_state.projection();
            let pos = self.flight_state.position;

            let mut closest = (f64::MAX, 0, 0.0);
            for (i,leg) in self.waypoints.windows(2).enumerate() {
                let sp = proj.project_on_segment( &pos, &leg[0].location, &leg[1].location);
                if sp.distance_nm < closest.0 { closest = (sp.distance_nm, i, sp.t) }
            }

            // once past the start of the closest leg we continue to its end
            let (_,i,t) = closest;
            let start = if t <= 0.0 { i } else { i+1 };
            self.waypoints.drain(..start);
        }

        let fix = self.waypoints.first().map( |wp| wp.fix.as_str()).unwrap_or_default();
        Ok( CommandIntent::Navigation( NavigationIntent::new( NavigationType::ResumeOwnNavigation, fix)))
    }

    /// great circle distance from the current position along the assigned route up to `fix`
    pub fn distance_along_route (&self, fix: &str)->Result<f64> {
        let waypoints = self.assigned_waypoints();
        let idx = waypoints.iter().position( |wp| wp.fix == fix).ok_or_else( || NavError::FixNotInRoute( fix.to_string()))?;
        if self.assigned_heading().is_some() {
            return Err( NavError::NotFlyingRoute)
        }

        let route = waypoints[..=idx].iter().map( |wp| &wp.location);
        Ok( path_length_nm( iter::once( &self.flight_state.position).chain( route)))
    }

    /* #endregion route */

    /* #region holds ************************************************************************************************/

    pub fn hold_at_fix (&mut self, hold: Hold)->CommandResult {
        let location = self.assigned_waypoints().iter()
            .find( |wp| wp.fix == hold.fix)
            .map( |wp| wp.location)
            .or_else( || self.db.lookup_fix( &hold.fix));

        let Some(location) = location else {
            return Err( unable!("unable. {} isn't a valid fix", hold.fix))
        };
        if self.flight_state.position.distance_nm( &location) > self.config.direct_fix_range {
            return Err( unable!("unable. {} is too far away", hold.fix))
        }

        let fix = hold.fix.clone();
        self.adopt_pending_route();
        self.deferred.clear();
        self.heading = NavHeading::Hold( FlyHold::new( hold, location));
        debug!("{} holding at {fix}", self.callsign);
        Ok( CommandIntent::Navigation( NavigationIntent::new( NavigationType::Hold, fix)))
    }

    pub fn cancel_hold (&mut self)->CommandResult {
        let NavHeading::Hold(fh) = &self.heading else {
            return Err( unable!("unable. We're not in a hold"))
        };

        let fix = fh.hold.fix.clone();
        self.heading = NavHeading::Route;
        Ok( CommandIntent::Navigation( NavigationIntent::new( NavigationType::CancelHold, fix)))
    }

    /* #endregion holds */

    /* #region altitude *********************************************************************************************/

    pub fn assign_altitude (&mut self, altitude: f64, after_speed: bool)->CommandResult {
        if altitude > self.perf.ceiling {
            return Err( unable!("unable. That altitude is above our ceiling"))
        }

        let current = self.flight_state.altitude;
        let direction = if altitude > current {
            AltitudeDirection::Climb
        } else if altitude < current {
            AltitudeDirection::Descend
        } else {
            AltitudeDirection::Maintain
        };

        if after_speed && let Some(speed) = self.speed.assigned() && speed != self.flight_state.ias {
            self.altitude.after_speed = Some( AltitudeAfterSpeed{ altitude, speed });
            return Ok( CommandIntent::Altitude( AltitudeIntent{ altitude, direction, after_speed: Some(speed) }))
        }

        self.altitude = NavAltitude{ clearance: Some( AltitudeClearance::Assigned(altitude)), ..NavAltitude::default() };
        Ok( CommandIntent::Altitude( AltitudeIntent{ altitude, direction, after_speed: None }))
    }

    /* #endregion altitude */

    /* #region speed ************************************************************************************************/

    pub fn assign_speed (&mut self, speed: f64, after_altitude: bool)->CommandResult {
        if speed == 0.0 {
            self.speed = NavSpeed::default();
            return Ok( CommandIntent::Speed( SpeedIntent{ speed: 0.0, speed_type: SpeedType::Cancel, after_altitude: None }))
        }

        if speed < self.perf.speed.landing {
            return Err( unable!("unable. Our minimum speed is {:.0} knots", self.perf.speed.landing))
        }
        let max_ias = self.perf.max_ias( self.flight_state.altitude);
        if speed > max_ias {
            return Err( unable!("unable. Our maximum speed is {:.0} knots", max_ias))
        }

        if after_altitude && let Some(altitude) = self.altitude.assigned() && altitude != self.flight_state.altitude {
            self.speed.after_altitude = Some( SpeedAfterAltitude{ speed, altitude });
            return Ok( CommandIntent::Speed( SpeedIntent{ speed, speed_type: SpeedType::Assigned, after_altitude: Some(altitude) }))
        }

        self.speed.mode = Some( SpeedMode::Assigned(speed));
        self.speed.after_altitude = None;
        Ok( CommandIntent::Speed( SpeedIntent{ speed, speed_type: SpeedType::Assigned, after_altitude: None }))
    }

    pub fn maintain_slowest_practical_speed (&mut self)->CommandIntent {
        self.speed.mode = Some( SpeedMode::SlowestPractical);
        self.speed.after_altitude = None;
        let speed = self.perf.speed.landing + self.config.slowest_practical_margin;
        CommandIntent::Speed( SpeedIntent{ speed, speed_type: SpeedType::SlowestPractical, after_altitude: None })
    }

    pub fn maintain_maximum_forward_speed (&mut self)->CommandIntent {
        self.speed.mode = Some( SpeedMode::MaximumForward);
        self.speed.after_altitude = None;
        let speed = self.cruise_speed( self.flight_state.altitude);
        CommandIntent::Speed( SpeedIntent{ speed, speed_type: SpeedType::MaximumForward, after_altitude: None })
    }

    /* #endregion speed */

    /* #region approach *********************************************************************************************/

    pub fn expect_approach (&mut self, airport: &str, approach_id: &str)->CommandResult {
        let Some(approach) = self.db.lookup_approach( airport, approach_id) else {
            return Err( unable!("unable. We don't know the {approach_id} approach at {airport}"))
        };

        let approach_name = approach.full_name.clone();
        self.approach = NavApproach{ assigned: Some(approach), assigned_id: approach_id.to_string(), ..NavApproach::default() };
        debug!("{} expecting {approach_name}", self.callsign);
        Ok( CommandIntent::Approach( ApproachIntent{ intent_type: ApproachIntentType::Expect, approach_name, straight_in: false }))
    }

    pub fn cleared_approach (&mut self, airport: &str, approach_id: &str, straight_in: bool, now: DateTime<Utc>)->CommandResult {
        let Some(approach) = self.approach.assigned.clone() else {
            return Err( unable!("unable. We haven't been told to expect an approach"))
        };
        if !approach_id.is_empty() && approach_id != self.approach.assigned_id {
            return Err( unable!("unable. We were told to expect the {}", approach.full_name))
        }

        // the pending lateral action decides: a pending turn means we stay on a vector, a pending
        // direct or on course means we will fly a route
        if self.assigned_heading().is_some() {
            // intercept the final approach course from the vector
            if self.deferred.is_pending() {
                let time = now + self.delay( self.config.on_heading_delay);
                self.deferred.shorten_to( time);
            }
            self.approach.intercept_state = InterceptState::InitialHeading;

        } else {
            // splice the approach into the route we will fly at the first common fix
            let splice = self.assigned_waypoints().iter().enumerate().find_map( |(i,wp)| {
                approach.waypoints.iter().position( |awp| awp.fix == wp.fix).map( |j| (i,j))
            });
            let Some((i,j)) = splice else {
                return Err( unable!("unable. The {} doesn't join our route", approach.full_name))
            };

            let route = self.assigned_waypoints_mut();
            route.truncate(i);
            route.extend( approach.waypoints[j..].iter().cloned());
            self.altitude.clear_assigned();
        }

        self.approach.cleared = true;
        debug!("{} cleared {} at {airport}", self.callsign, approach.full_name);
        Ok( CommandIntent::Approach( ApproachIntent{ intent_type: ApproachIntentType::Cleared, approach_name: approach.full_name.clone(), straight_in }))
    }

    pub fn cancel_approach_clearance (&mut self)->CommandResult {
        if !self.approach.cleared {
            return Err( unable!("we're not currently cleared for an approach"))
        }

        self.approach.cleared = false;
        self.approach.passed_faf = false;
        self.approach.intercept_state = InterceptState::NotIntercepting;
        Ok( CommandIntent::Approach( ApproachIntent{ intent_type: ApproachIntentType::CancelClearance, approach_name: self.approach.approach_name(), straight_in: false }))
    }

    /// missed approach: fly present heading and climb to the go around altitude, effective immediately
    pub fn go_around (&mut self)->CommandIntent {
        let approach_name = self.approach.approach_name();
        let fs = &self.flight_state;

        self.heading = NavHeading::Assigned{ heading: normalize_heading( fs.heading), turn: TurnMethod::Closest };
        self.deferred.clear();

        self.speed = NavSpeed::default();
        self.approach = NavApproach::default();

        let rounding = self.config.go_around_rounding;
        let altitude = rounding * ((fs.arrival_airport_elevation + self.config.go_around_climb) / rounding).trunc();
        self.altitude = NavAltitude{ clearance: Some( AltitudeClearance::Assigned(altitude)), ..NavAltitude::default() };

        self.waypoints = vec![ fs.arrival_airport.clone() ];
        self.fix_assignments.clear();

        info!("{} going around, climbing to {altitude:.0}", self.callsign);
        CommandIntent::Approach( ApproachIntent{ intent_type: ApproachIntentType::GoAround, approach_name, straight_in: false })
    }

    /* #endregion approach */
}
