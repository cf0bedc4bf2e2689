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

// run with "cargo test -p atc_nav --test test_targets -- --nocapture"

mod common;
use common::*;

use atc_common::angle::{heading_difference, is_valid_heading, normalize_heading};
use atc_common::geo::{GeoPoint, LocalProjection};
use atc_common::units::eta_seconds;
use atc_nav::{Nav, MAXIMUM_RATE};
use atc_nav::aviation::*;
use atc_nav::clearance::*;
use atc_nav::hold::HoldEntry;

fn proj ()->LocalProjection { LocalProjection::new( 45.5) }

/// `dist_nm` from fix `id` along true heading `hdg`
fn near (id: &str, hdg: f64, dist_nm: f64)->GeoPoint { proj().offset( &fix(id), hdg, dist_nm) }

fn approx (a: f64, b: f64, eps: f64)->bool { (a - b).abs() < eps }

/* #region heading ***********************************************************************************************/

#[test]
fn test_assigned_heading() {
    let mut nav = make_test_nav();
    nav.heading = NavHeading::Assigned{ heading: 180.0, turn: TurnMethod::Left };

    let (hdg,turn,rate) = nav.target_heading( &calm(), sim_time());
    assert_eq!( hdg, 180.0);
    assert_eq!( turn, TurnMethod::Left);
    assert!( rate > 0.0 && rate <= 3.0);
}

#[test]
fn test_follow_route() {
    let mut nav = make_test_nav();
    nav.flight_state.position = GeoPoint::from_lon_lat_degrees( -74.0, 40.0173); // due west of CAMRN

    let (hdg,turn,_) = nav.target_heading( &calm(), sim_time());
    println!("heading to CAMRN: {hdg:.1}");
    assert!( hdg > 50.0 && hdg < 130.0);
    assert!( approx( hdg, 103.0, 0.01)); // true 090 with 13 deg westerly variation
    assert_eq!( turn, TurnMethod::Closest);
    assert_eq!( nav.waypoints[0].fix, "CAMRN");
}

#[test]
fn test_wind_correction() {
    let mut nav = make_test_nav();
    nav.flight_state.position = GeoPoint::from_lon_lat_degrees( -74.0, 40.0173);

    let (hdg,_,_) = nav.target_heading( &WindSample::new( 360.0, 30.0), sim_time());
    println!("heading with wind from the north: {hdg:.1}");
    assert!( hdg < 103.0 && hdg > 95.0); // crab into the wind

    let (hdg,_,_) = nav.target_heading( &WindSample::new( 90.0, 30.0), sim_time());
    assert!( approx( hdg, 103.0, 0.01)); // pure headwind needs no correction
}

#[test]
fn test_empty_route_keeps_heading() {
    let mut nav = make_test_nav();
    nav.waypoints.clear();

    let (hdg,_,_) = nav.target_heading( &calm(), sim_time());
    assert_eq!( hdg, 270.0);
}

#[test]
fn test_sequence_passed_waypoint() {
    let mut nav = make_test_nav();
    nav.waypoints[0] = wp("CAMRN").with_altitude_restriction( AltitudeRestriction::at_or_below( 6000.0)).with_speed( 230.0);

    let (hdg,_,_) = nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.waypoints[0].fix, "VIDIO");
    assert_eq!( nav.altitude.restriction, Some( AltitudeRestriction::at_or_below( 6000.0)));
    assert_eq!( nav.speed.restriction, Some(230.0));

    let to_vidio = nav.flight_state.heading_to( &fix("VIDIO"));
    assert!( approx( hdg, to_vidio, 1e-9));
}

#[test]
fn test_sequence_overflown_waypoint() {
    let mut nav = make_test_nav();
    nav.flight_state.position = near( "CAMRN", 0.0, 1.0); // 1nm north of CAMRN
    nav.flight_state.heading = 13.0; // flying north (true), away from it

    nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.waypoints[0].fix, "VIDIO");

    // not passed if we still fly towards it
    let mut nav = make_test_nav();
    nav.flight_state.position = near( "CAMRN", 0.0, 1.0);
    nav.flight_state.heading = 193.0;

    nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.waypoints[0].fix, "CAMRN");
}

#[test]
fn test_passing_waypoint_without_speed_drops_speed_restriction() {
    let mut nav = make_test_nav();
    nav.speed.restriction = Some(210.0);

    nav.target_heading( &calm(), sim_time()); // passes CAMRN, which has no speed
    assert_eq!( nav.waypoints[0].fix, "VIDIO");
    assert_eq!( nav.speed.restriction, None);
}

#[test]
fn test_fix_assignment_applied_on_passing() {
    let mut nav = make_test_nav();
    nav.waypoints[0] = wp("CAMRN").with_altitude_restriction( AltitudeRestriction::at_or_below( 6000.0));
    nav.cross_fix_at( "CAMRN", Some( AltitudeRestriction::at( 4000.0)), None).unwrap();

    nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.altitude.restriction, Some( AltitudeRestriction::at( 4000.0)));
    assert!( nav.fix_assignments.is_empty());
}

#[test]
fn test_arrival_airport_not_passed() {
    let mut nav = make_test_nav();
    nav.waypoints = vec![ kjfk() ];
    nav.flight_state.position = kjfk_location();

    nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.waypoints.len(), 1);
}

#[test]
fn test_dme_arc() {
    let center = kjfk_location();
    let radius = proj().distance_nm( &center, &fix("CAMRN"));
    let arc = DMEArc{ center, radius, initial_heading: 180.0, clockwise: true };

    let mut nav = make_test_nav();
    nav.waypoints[0].arc = Some(arc);

    // passing CAMRN starts the arc, first turn to the initial heading
    let (hdg,_,_) = nav.target_heading( &calm(), sim_time());
    assert_eq!( hdg, 180.0);
    assert_eq!( nav.heading, NavHeading::Arc{ arc, joining: true });

    // once on the initial heading we track the arc
    nav.flight_state.heading = 180.0;
    let (hdg,turn,_) = nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.heading, NavHeading::Arc{ arc, joining: false });
    assert_eq!( turn, TurnMethod::Closest);

    let radial = proj().heading( &center, &fix("CAMRN"));
    let expected = nav.flight_state.to_magnetic( normalize_heading( radial + 90.0));
    println!("arc heading: {hdg:.1} (radial {radial:.1})");
    assert!( approx( hdg, expected, 1e-6));

    // on the radial of the next waypoint we leave the arc
    nav.flight_state.position = fix("VIDIO");
    nav.target_heading( &calm(), sim_time());
    assert!( nav.heading.is_route());
    assert_eq!( nav.waypoints[0].fix, "CATOD");
}

#[test]
fn test_hold_from_route() {
    let mut nav = make_test_nav();
    nav.waypoints[0].hold = Some( Hold::new( "CAMRN", 20.0, TurnDirection::Right));

    let (hdg,_,_) = nav.target_heading( &calm(), sim_time());
    println!("hold heading: {hdg:.1}");
    assert!( is_valid_heading( hdg));

    // arriving on 270 for an inbound course of 020 with right turns is a parallel entry
    let NavHeading::Hold(fh) = &nav.heading else { panic!("not holding: {:?}", nav.heading) };
    assert_eq!( fh.entry, Some( HoldEntry::Parallel));
    assert_eq!( hdg, 200.0);
}

#[test]
fn test_final_approach_intercept() {
    let mut nav = make_test_nav();
    nav.expect_approach( "KJFK", "I4L").unwrap();
    nav.heading = NavHeading::Assigned{ heading: 270.0, turn: TurnMethod::Closest };
    nav.cleared_approach( "KJFK", "I4L", false, sim_time()).unwrap();
    assert_eq!( nav.approach.intercept_state, InterceptState::InitialHeading);

    // on the final approach course half way between IGIDE and the airport
    let (igide,kjfk_loc) = (fix("IGIDE"), kjfk_location());
    let course = proj().heading( &igide, &kjfk_loc);
    let p = proj();
    let mid = p.from_nm( &p.to_nm( &igide).add( &p.to_nm( &kjfk_loc)).scale( 0.5));
    nav.flight_state.position = mid;
    nav.flight_state.heading = nav.flight_state.to_magnetic( course - 30.0);
    nav.flight_state.gs = 180.0;

    let (hdg,_,_) = nav.target_heading( &calm(), sim_time());
    assert_eq!( nav.approach.intercept_state, InterceptState::OnCourse);
    assert!( nav.heading.is_route());
    assert_eq!( nav.waypoints.len(), 1);
    assert_eq!( nav.waypoints[0].fix, "KJFK");
    assert!( heading_difference( hdg, nav.flight_state.to_magnetic( course)) < 1.0);
}

#[test]
fn test_no_intercept_far_from_course() {
    let mut nav = make_test_nav();
    nav.expect_approach( "KJFK", "I4L").unwrap();
    nav.heading = NavHeading::Assigned{ heading: 270.0, turn: TurnMethod::Closest };
    nav.cleared_approach( "KJFK", "I4L", false, sim_time()).unwrap();

    let course = proj().heading( &fix("IGIDE"), &kjfk_location());
    nav.flight_state.position = proj().offset( &fix("IGIDE"), course + 90.0, 5.0);
    nav.flight_state.heading = nav.flight_state.to_magnetic( course - 30.0);

    let (hdg,_,_) = nav.target_heading( &calm(), sim_time());
    assert_eq!( hdg, 270.0);
    assert_eq!( nav.approach.intercept_state, InterceptState::InitialHeading);
}

#[test]
fn test_passing_faf() {
    let mut nav = make_test_nav();
    nav.expect_approach( "KJFK", "I4L").unwrap();
    nav.cleared_approach( "KJFK", "I4L", false, sim_time()).unwrap();
    nav.waypoints.drain(..3); // IGIDE, KJFK
    nav.flight_state.position = fix("IGIDE");
    nav.flight_state.altitude = 1900.0;

    nav.target_heading( &calm(), sim_time());
    assert!( nav.approach.passed_faf);
    assert_eq!( nav.altitude.restriction, Some( AltitudeRestriction::at( 1900.0)));
    assert_eq!( nav.target_speed( 1900.0, &calm()), (135.0, MAXIMUM_RATE));
}

/* #endregion heading */

/* #region altitude **********************************************************************************************/

#[test]
fn test_level_without_constraints() {
    let mut nav = make_test_nav();
    assert_eq!( nav.target_altitude(), (5000.0, 0.0));
}

#[test]
fn test_assigned_altitude() {
    let mut nav = make_test_nav();
    nav.altitude.clearance = Some( AltitudeClearance::Assigned(3000.0));
    assert_eq!( nav.target_altitude(), (3000.0, MAXIMUM_RATE));
}

#[test]
fn test_cleared_altitude_final_altitude_cap() {
    let mut nav = make_test_nav();
    nav.altitude.clearance = Some( AltitudeClearance::Cleared(12000.0));
    assert_eq!( nav.target_altitude(), (12000.0, MAXIMUM_RATE));

    nav.final_altitude = 10000.0;
    assert_eq!( nav.target_altitude(), (10000.0, MAXIMUM_RATE));
}

#[test]
fn test_takeoff_roll_holds_altitude() {
    let mut nav = make_test_nav();
    nav.flight_state.initial_departure_climb = true;
    nav.flight_state.ias = 80.0;
    nav.flight_state.altitude = 13.0;
    assert_eq!( nav.target_altitude(), (13.0, 0.0));

    nav.altitude.clearance = Some( AltitudeClearance::Assigned(5000.0));
    assert_eq!( nav.target_altitude(), (5000.0, 0.0));

    nav.flight_state.ias = 150.0;
    assert_eq!( nav.target_altitude(), (5000.0, MAXIMUM_RATE));
}

#[test]
fn test_restriction_altitude() {
    let mut nav = make_test_nav();
    nav.altitude.restriction = Some( AltitudeRestriction::at_or_above( 6000.0));
    assert_eq!( nav.target_altitude(), (6000.0, MAXIMUM_RATE));

    nav.altitude.restriction = Some( AltitudeRestriction::between( 4000.0, 6000.0));
    assert_eq!( nav.target_altitude(), (5000.0, 0.0));
}

#[test]
fn test_waypoint_climb() {
    let mut nav = make_test_nav();
    nav.waypoints[1] = wp("VIDIO").with_altitude_restriction( AltitudeRestriction::at_or_above( 8000.0));
    assert_eq!( nav.target_altitude(), (8000.0, MAXIMUM_RATE));

    // a cleared altitude takes precedence over route constraints
    nav.altitude.clearance = Some( AltitudeClearance::Cleared(7000.0));
    assert_eq!( nav.target_altitude(), (7000.0, MAXIMUM_RATE));
}

#[test]
fn test_waypoint_descent_too_early() {
    let mut nav = make_test_nav();
    nav.waypoints[1] = wp("VIDIO").with_altitude_restriction( AltitudeRestriction::at( 3000.0));
    assert_eq!( nav.target_altitude(), (5000.0, 0.0));
}

#[test]
fn test_waypoint_descent() {
    let mut nav = make_test_nav();
    nav.waypoints = vec![ wp("VIDIO").with_altitude_restriction( AltitudeRestriction::at( 3000.0)), wp("CATOD"), kjfk() ];
    nav.flight_state.position = near( "VIDIO", 200.0, 5.0);

    let dist = nav.flight_state.position.distance_nm( &fix("VIDIO"));
    let expected_rate = 2000.0 / (eta_seconds( dist, 250.0) / 60.0);

    let (alt,rate) = nav.target_altitude();
    println!("descending to {alt:.0} at {rate:.0} ft/min");
    assert_eq!( alt, 3000.0);
    assert!( approx( rate, expected_rate, 1e-6));
    assert!( rate >= 1000.0);
}

#[test]
fn test_descent_stays_above_earlier_floor() {
    let mut nav = make_test_nav();
    nav.flight_state.altitude = 10000.0;
    nav.waypoints = vec![
        wp("VIDIO").with_altitude_restriction( AltitudeRestriction::at_or_above( 8000.0)),
        wp("CATOD").with_altitude_restriction( AltitudeRestriction::at( 4000.0)),
        kjfk()
    ];

    // far out the floor at VIDIO is not yet worth a descent, although CATOD alone would be
    nav.flight_state.position = near( "VIDIO", 200.0, 15.0);
    assert_eq!( nav.target_altitude(), (10000.0, 0.0));

    // close to VIDIO we descend to its floor, not through it
    nav.flight_state.position = near( "VIDIO", 200.0, 3.0);
    let dist = nav.flight_state.position.distance_nm( &fix("VIDIO"));
    let expected_rate = 2000.0 / (eta_seconds( dist, 250.0) / 60.0);

    let (alt,rate) = nav.target_altitude();
    println!("descending to {alt:.0} at {rate:.0} ft/min");
    assert_eq!( alt, 8000.0);
    assert!( approx( rate, expected_rate, 1e-6));

    // sitting on the floor we stay level until VIDIO is behind us
    nav.flight_state.altitude = 8000.0;
    assert_eq!( nav.target_altitude(), (8000.0, 0.0));
}

#[test]
fn test_fix_assignment_overrides_waypoint_restriction() {
    let mut nav = make_test_nav();
    nav.waypoints[1] = wp("VIDIO").with_altitude_restriction( AltitudeRestriction::at( 3000.0));
    nav.cross_fix_at( "VIDIO", Some( AltitudeRestriction::at_or_above( 8000.0)), None).unwrap();
    assert_eq!( nav.target_altitude(), (8000.0, MAXIMUM_RATE));
}

#[test]
fn test_inherited_restriction_released() {
    let mut nav = make_test_nav();
    nav.altitude.restriction = Some( AltitudeRestriction::at( 5000.0));
    nav.waypoints[1] = wp("VIDIO").with_altitude_restriction( AltitudeRestriction::at_or_above( 8000.0));

    assert_eq!( nav.target_altitude(), (8000.0, MAXIMUM_RATE));
    assert_eq!( nav.altitude.restriction, None);

    // stays released on the next tick
    nav.flight_state.altitude = 5500.0;
    assert_eq!( nav.target_altitude(), (8000.0, MAXIMUM_RATE));
}

#[test]
fn test_post_faf_glidepath() {
    let mut nav = make_test_nav();
    nav.approach.cleared = true;
    nav.approach.passed_faf = true;
    nav.waypoints = vec![ kjfk() ];
    nav.flight_state.position = fix("IGIDE");
    nav.flight_state.altitude = 1900.0;
    nav.flight_state.gs = 140.0;

    let dist = fix("IGIDE").distance_nm( &kjfk_location());
    let expected_rate = (1900.0 - 13.0) / (eta_seconds( dist, 140.0) / 60.0);

    let (alt,rate) = nav.target_altitude();
    println!("glidepath: {alt:.0} at {rate:.0} ft/min over {dist:.1}nm");
    assert_eq!( alt, 13.0);
    assert!( rate != MAXIMUM_RATE);
    assert!( approx( rate, expected_rate, 1e-6));
}

/* #endregion altitude */

/* #region speed *************************************************************************************************/

#[test]
fn test_assigned_speed() {
    let mut nav = make_test_nav();
    nav.speed.mode = Some( SpeedMode::Assigned(210.0));
    assert_eq!( nav.target_speed( 5000.0, &calm()), (210.0, MAXIMUM_RATE));
}

#[test]
fn test_speed_modes() {
    let mut nav = make_test_nav();
    nav.speed.mode = Some( SpeedMode::SlowestPractical);
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 140.0);

    nav.speed.mode = Some( SpeedMode::MaximumForward);
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 250.0);

    nav.flight_state.altitude = 30000.0;
    let expected = nav.perf.cruise_ias( 30000.0);
    assert!( approx( nav.target_speed( 30000.0, &calm()).0, expected, 1e-9));
}

#[test]
fn test_default_speed() {
    let mut nav = make_test_nav();
    assert_eq!( nav.target_speed( 5000.0, &calm()), (250.0, MAXIMUM_RATE));

    // blend towards cruise above the speed limit altitude
    nav.flight_state.altitude = 15000.0;
    nav.flight_state.ias = 280.0;
    let expected = 0.5 * (250.0 + nav.perf.cruise_ias( 15000.0));
    let (spd,_) = nav.target_speed( 15000.0, &calm());
    println!("speed at 15000: {spd:.1}");
    assert!( approx( spd, expected, 1e-9));
    assert!( spd > 250.0 && spd < nav.perf.cruise_ias( 15000.0));
}

#[test]
fn test_speed_limit_on_descent() {
    let mut nav = make_test_nav();
    nav.flight_state.ias = 300.0;

    // 2000ft above the limit we still have time to slow down
    nav.flight_state.altitude = 12000.0;
    let (spd,_) = nav.target_speed( 5000.0, &calm());
    assert!( spd > 250.0);

    // 500ft above it we don't
    nav.flight_state.altitude = 10500.0;
    assert_eq!( nav.target_speed( 5000.0, &calm()), (250.0, MAXIMUM_RATE));

    // not if we stay above the limit altitude
    assert!( nav.target_speed( 11000.0, &calm()).0 > 250.0);
}

#[test]
fn test_jet_departure_speeds() {
    let mut nav = make_test_nav();
    nav.flight_state.initial_departure_climb = true;
    nav.flight_state.ias = 150.0;

    nav.flight_state.altitude = 1000.0;
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 180.0);

    nav.flight_state.altitude = 2000.0;
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 210.0);
}

#[test]
fn test_prop_departure_speeds() {
    let mut nav = make_test_nav();
    set_perf( &mut nav, |perf| perf.engine = EngineType::Turboprop);
    nav.flight_state.initial_departure_climb = true;
    nav.flight_state.ias = 150.0;

    for (alt,factor) in [(300.0, 1.1), (700.0, 1.2), (1200.0, 1.3)] {
        nav.flight_state.altitude = alt;
        assert!( approx( nav.target_speed( 5000.0, &calm()).0, factor * 140.0, 1e-9));
    }

    nav.flight_state.altitude = 2000.0;
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, nav.cruise_speed( 2000.0));
}

#[test]
fn test_restriction_speed() {
    let mut nav = make_test_nav();
    nav.speed.restriction = Some(220.0);
    assert_eq!( nav.target_speed( 5000.0, &calm()), (220.0, MAXIMUM_RATE));
}

#[test]
fn test_upcoming_waypoint_speed() {
    let mut nav = make_test_nav();
    nav.waypoints = vec![ wp("VIDIO").with_speed( 220.0), wp("CATOD"), kjfk() ];

    nav.flight_state.position = near( "VIDIO", 180.0, 0.3); // ~4s out
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 220.0);

    nav.flight_state.position = near( "VIDIO", 180.0, 1.0); // ~14s out
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 250.0);
}

#[test]
fn test_upcoming_fix_assignment_speed() {
    let mut nav = make_test_nav();
    nav.waypoints = vec![ wp("VIDIO").with_speed( 220.0), wp("CATOD"), kjfk() ];
    nav.cross_fix_at( "VIDIO", None, Some(210.0)).unwrap();

    nav.flight_state.position = near( "VIDIO", 180.0, 0.3);
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 210.0);
}

#[test]
fn test_hold_speed() {
    let mut nav = make_test_nav();
    nav.hold_at_fix( Hold::new( "ROSLY", 40.0, TurnDirection::Right)).unwrap();

    nav.flight_state.position = near( "ROSLY", 200.0, 5.0); // ~72s out
    assert_eq!( nav.target_speed( 5000.0, &calm()), (200.0, MAXIMUM_RATE));

    nav.flight_state.position = near( "ROSLY", 200.0, 20.0);
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 250.0);
}

#[test]
fn test_ground_speed_estimate_without_gs() {
    let mut nav = make_test_nav();
    nav.hold_at_fix( Hold::new( "ROSLY", 40.0, TurnDirection::Right)).unwrap();
    nav.flight_state.gs = 0.0;

    // 12nm at ~275kts tas is ~157s, a 100kts headwind makes it ~246s
    nav.flight_state.position = near( "ROSLY", 200.0, 12.0);
    assert_eq!( nav.target_speed( 5000.0, &calm()).0, 200.0);
    assert_eq!( nav.target_speed( 5000.0, &WindSample::new( 20.0, 100.0)).0, 250.0);
}

/* #endregion speed */
