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

//! the read-only reference data the nav core consumes: procedure waypoints, aircraft performance,
//! wind samples and the fix/airport/approach database interface.
//! Altitudes are in feet MSL, speeds in knots, distances in nautical miles, headings in degrees.

use std::{collections::HashMap, fmt, sync::Arc};
use serde::{Serialize,Deserialize};
use atc_common::geo::GeoPoint;

/// how to turn onto a new heading
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum TurnMethod {
    Closest,
    Left,
    Right,
}

impl fmt::Display for TurnMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnMethod::Closest => Ok(()),
            TurnMethod::Left => write!(f, "left"),
            TurnMethod::Right => write!(f, "right"),
        }
    }
}

/// the published turn direction of holds and arcs
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    pub fn turn_method (&self)->TurnMethod {
        match self { TurnDirection::Left => TurnMethod::Left, TurnDirection::Right => TurnMethod::Right }
    }

    pub fn opposite (&self)->TurnDirection {
        match self { TurnDirection::Left => TurnDirection::Right, TurnDirection::Right => TurnDirection::Left }
    }
}

/* #region AltitudeRestriction ***********************************************************************************/

/// an altitude window. A bound of 0 means the window is open on that side, i.e.
/// `[6000,0]` is "at or above 6000", `[0,8000]` "at or below 8000" and `[3000,3000]` "at 3000"
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct AltitudeRestriction {
    pub range: [f64;2]
}

impl AltitudeRestriction {
    pub fn at (alt: f64)->Self { AltitudeRestriction{ range: [alt,alt] } }
    pub fn at_or_above (alt: f64)->Self { AltitudeRestriction{ range: [alt,0.0] } }
    pub fn at_or_below (alt: f64)->Self { AltitudeRestriction{ range: [0.0,alt] } }
    pub fn between (lower: f64, upper: f64)->Self { AltitudeRestriction{ range: [lower,upper] } }

    pub fn lower (&self)->Option<f64> { if self.range[0] > 0.0 { Some(self.range[0]) } else { None } }
    pub fn upper (&self)->Option<f64> { if self.range[1] > 0.0 { Some(self.range[1]) } else { None } }

    /// the closest altitude to `alt` that satisfies the restriction
    pub fn target_altitude (&self, alt: f64)->f64 {
        if let Some(lo) = self.lower() { if alt < lo { return lo } }
        if let Some(hi) = self.upper() { if alt > hi { return hi } }
        alt
    }

    pub fn is_satisfied_by (&self, alt: f64)->bool { self.target_altitude(alt) == alt }
}

impl fmt::Display for AltitudeRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lower(), self.upper()) {
            (Some(lo),Some(hi)) if lo == hi => write!(f, "at {lo:.0}"),
            (Some(lo),Some(hi)) => write!(f, "between {lo:.0} and {hi:.0}"),
            (Some(lo),None) => write!(f, "at or above {lo:.0}"),
            (None,Some(hi)) => write!(f, "at or below {hi:.0}"),
            (None,None) => write!(f, "unrestricted"),
        }
    }
}

/* #endregion AltitudeRestriction */

/* #region procedure geometry ************************************************************************************/

/// a constant radius leg around a navaid. `initial_heading` is the (magnetic) heading that joins the arc
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct DMEArc {
    pub center: GeoPoint,
    pub radius: f64,
    pub initial_heading: f64,
    pub clockwise: bool,
}

/// a published or assigned holding pattern. Legs are either timed (`leg_minutes`) or, if `leg_length`
/// is non-zero, measured in nautical miles from the fix
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Hold {
    pub fix: String,
    pub inbound_course: f64,
    pub turn_direction: TurnDirection,
    pub leg_minutes: f64,
    pub leg_length: f64,
}

impl Hold {
    pub fn new (fix: impl ToString, inbound_course: f64, turn_direction: TurnDirection)->Self {
        Hold { fix: fix.to_string(), inbound_course, turn_direction, leg_minutes: 1.0, leg_length: 0.0 }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Waypoint {
    pub fix: String,
    pub location: GeoPoint,
    pub altitude_restriction: Option<AltitudeRestriction>,
    pub speed: Option<f64>,
    pub on_sid: bool,
    pub on_star: bool,
    pub faf: bool,
    pub arc: Option<DMEArc>,
    pub hold: Option<Hold>,
}

impl Waypoint {
    pub fn new (fix: impl ToString, location: GeoPoint)->Self {
        Waypoint {
            fix: fix.to_string(),
            location,
            altitude_restriction: None,
            speed: None,
            on_sid: false,
            on_star: false,
            faf: false,
            arc: None,
            hold: None
        }
    }

    pub fn with_altitude_restriction (mut self, ar: AltitudeRestriction)->Self { self.altitude_restriction = Some(ar); self }
    pub fn with_speed (mut self, speed: f64)->Self { self.speed = Some(speed); self }
    pub fn on_sid (mut self)->Self { self.on_sid = true; self }
    pub fn on_star (mut self)->Self { self.on_star = true; self }
    pub fn faf (mut self)->Self { self.faf = true; self }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.fix) }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ApproachType {
    ILS,
    Localizer,
    RNAV,
    Visual,
}

/// an instrument approach procedure. The last two waypoints define the final approach course
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Approach {
    pub id: String,
    pub full_name: String,
    pub approach_type: ApproachType,
    pub runway: String,
    pub waypoints: Vec<Waypoint>,
}

/* #endregion procedure geometry */

/* #region AircraftPerformance ***********************************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum EngineType {
    Jet,
    Turboprop,
    Piston,
}

#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct SpeedEnvelope {
    pub min: f64,
    pub v2: f64,
    pub landing: f64,
    pub cruise_tas: f64,
    pub max_tas: f64,
}

/// climb/descent rates in ft/min, acceleration/deceleration in kts/sec
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct PerformanceRates {
    pub climb: f64,
    pub descent: f64,
    pub accelerate: f64,
    pub decelerate: f64,
}

#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct TurnLimits {
    pub max_bank_angle: f64,
    pub max_bank_rate: f64,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct AircraftPerformance {
    pub speed: SpeedEnvelope,
    pub rate: PerformanceRates,
    pub turn: TurnLimits,
    pub ceiling: f64,
    pub engine: EngineType,
}

impl AircraftPerformance {
    pub fn is_jet (&self)->bool { self.engine == EngineType::Jet }

    /// the highest indicated airspeed the aircraft can fly at `altitude`
    pub fn max_ias (&self, altitude: f64)->f64 { tas_to_ias( self.speed.max_tas, altitude) }

    pub fn cruise_ias (&self, altitude: f64)->f64 { tas_to_ias( self.speed.cruise_tas, altitude) }
}

/// rule of thumb: true airspeed increases 2% per 1000ft over indicated airspeed
#[inline]
pub fn tas_to_ias (tas: f64, altitude: f64)->f64 { tas / (1.0 + 0.02 * altitude / 1000.0) }

#[inline]
pub fn ias_to_tas (ias: f64, altitude: f64)->f64 { ias * (1.0 + 0.02 * altitude / 1000.0) }

/* #endregion AircraftPerformance */

/* #region WindSample ********************************************************************************************/

/// wind at the aircraft position. `direction` is where the wind blows from (true degrees)
#[derive(Debug,Clone,Copy,Default,PartialEq,Serialize,Deserialize)]
pub struct WindSample {
    pub direction: f64,
    pub speed: f64,
}

impl WindSample {
    pub fn calm ()->Self { WindSample::default() }

    pub fn new (direction: f64, speed: f64)->Self { WindSample{ direction, speed } }

    /// the wind component along true course `course` - positive values are headwind
    pub fn headwind (&self, course: f64)->f64 {
        self.speed * (self.direction - course).to_radians().cos()
    }

    /// the wind component across true course `course` - positive values blow from the right
    pub fn crosswind (&self, course: f64)->f64 {
        self.speed * (self.direction - course).to_radians().sin()
    }
}

/* #endregion WindSample */

/* #region NavDatabase *******************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub elevation: f64,
    pub location: GeoPoint,
    pub approaches: HashMap<String,Arc<Approach>>,
}

impl Airport {
    pub fn new (id: impl ToString, name: impl ToString, elevation: f64, location: GeoPoint)->Self {
        Airport { id: id.to_string(), name: name.to_string(), elevation, location, approaches: HashMap::new() }
    }

    pub fn waypoint (&self)->Waypoint { Waypoint::new( &self.id, self.location) }
}

/// the reference data lookups used by the nav core. Implementations are shared between all aircraft
pub trait NavDatabase: Send + Sync {
    /// location of a fix, navaid or airport
    fn lookup_fix (&self, id: &str)->Option<GeoPoint>;

    fn lookup_airport (&self, id: &str)->Option<&Airport>;

    fn lookup_approach (&self, airport: &str, approach_id: &str)->Option<Arc<Approach>> {
        self.lookup_airport(airport).and_then( |ap| ap.approaches.get(approach_id).cloned())
    }
}

/// a NavDatabase that is populated up-front, e.g. from deserialized reference data
#[derive(Debug,Default,Clone,Serialize,Deserialize)]
pub struct StaticDatabase {
    pub fixes: HashMap<String,GeoPoint>,
    pub navaids: HashMap<String,GeoPoint>,
    pub airports: HashMap<String,Airport>,
}

impl StaticDatabase {
    pub fn add_fix (&mut self, id: impl ToString, location: GeoPoint) { self.fixes.insert( id.to_string(), location); }
    pub fn add_navaid (&mut self, id: impl ToString, location: GeoPoint) { self.navaids.insert( id.to_string(), location); }
    pub fn add_airport (&mut self, airport: Airport) { self.airports.insert( airport.id.clone(), airport); }
}

impl NavDatabase for StaticDatabase {
    fn lookup_fix (&self, id: &str)->Option<GeoPoint> {
        self.fixes.get(id)
            .or_else( || self.navaids.get(id))
            .or_else( || self.airports.get(id).map( |ap| &ap.location))
            .copied()
    }

    fn lookup_airport (&self, id: &str)->Option<&Airport> { self.airports.get(id) }
}

/* #endregion NavDatabase */
