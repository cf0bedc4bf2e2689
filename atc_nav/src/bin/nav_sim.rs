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

//! scripted demo of the nav core: an arrival into KJFK that descends via the STAR, gets vectored off
//! the route and is cleared for the ILS. A simple point mass integrator flies the targets.
//! Run with "RUST_LOG=info cargo run --bin nav_sim -- --ticks 900"

use std::sync::Arc;
use anyhow::Result;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tracing_subscriber::EnvFilter;

use atc_common::{define_cli, check_cli, info, clamp};
use atc_common::angle::{heading_signed_turn, normalize_heading};
use atc_common::datetime::short_utc_time_string;
use atc_common::geo::GeoPoint;
use atc_common::units::nm_travelled;
use atc_nav::{FlightState, Nav, NavConfig, CommandResult};
use atc_nav::aviation::*;

define_cli! { ARGS [about="scripted ATC arrival using the nav core"] =
    config: Option<String> [help="pathname of RON nav config (defaults are used if not set)", long],
    seed: u64 [help="seed for pilot response delays", long, default_value="42"],
    ticks: usize [help="number of 1sec simulation steps", long, default_value="900"],
    verbose: bool [help="log targets every tick", short, long]
}

fn main ()->Result<()> {
    check_cli!(ARGS);
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init(); // use RUST_LOG to set max level

    let config = match &ARGS.config {
        Some(path) => NavConfig::load( path)?,
        None => NavConfig::default()
    };

    let db = Arc::new( jfk_database());
    let kjfk = db.lookup_airport("KJFK").map( |ap| ap.waypoint()).ok_or( anyhow::anyhow!("no KJFK"))?;
    let route = arrival_route( &db)?;
    let fs = FlightState {
        position: GeoPoint::from_lon_lat_degrees( -73.9200, 39.8500),
        heading: 20.0,
        altitude: 11000.0,
        ias: 280.0,
        gs: 300.0,
        magnetic_variation: -13.0,
        nm_per_longitude: 45.5,
        arrival_airport: kjfk.clone(),
        arrival_airport_location: kjfk.location,
        arrival_airport_elevation: 13.0,
        departure_airport_elevation: 0.0,
        initial_departure_climb: false,
    };

    let mut nav = Nav::new( "DAL123", fs, route, 0.0, Arc::new( jet_performance()), db, Arc::new(config), ARGS.seed);
    let wind = WindSample::new( 300.0, 15.0);
    let t0 = Utc.with_ymd_and_hms( 2025, 6, 15, 12, 0, 0).single().ok_or( anyhow::anyhow!("invalid start time"))?;

    for tick in 0..ARGS.ticks {
        let now = t0 + TimeDelta::seconds( tick as i64);
        issue_scripted_commands( &mut nav, tick, now);

        let (hdg, turn, turn_rate) = nav.target_heading( &wind, now);
        let (alt, alt_rate) = nav.target_altitude();
        let (spd, spd_rate) = nav.target_speed( alt, &wind);

        if ARGS.verbose || tick % 30 == 0 {
            info!("{} {nav}  -> hdg:{hdg:03.0} alt:{alt:.0} spd:{spd:.0}", short_utc_time_string(&now));
        }

        integrate( &mut nav, &wind, (hdg,turn,turn_rate), (alt,alt_rate), (spd,spd_rate), 1.0);

        if nav.flight_state.altitude <= nav.flight_state.arrival_airport_elevation + 100.0 {
            info!("{} landed after {tick} seconds", nav.callsign);
            break;
        }
    }

    Ok(())
}

fn issue_scripted_commands (nav: &mut Nav, tick: usize, now: DateTime<Utc>) {
    let res: Option<CommandResult> = match tick {
        2 => Some( nav.descend_via_star( now)),
        20 => Some( nav.expect_approach( "KJFK", "I4L")),
        240 => Some( nav.assign_heading( 330.0, TurnMethod::Left, now)),
        250 => Some( nav.assign_altitude( 3000.0, false)),
        260 => Some( nav.assign_speed( 190.0, false)),
        300 => Some( nav.cleared_approach( "KJFK", "I4L", false, now)),
        _ => None
    };

    match res {
        Some(Ok(intent)) => info!("{}: {intent}", nav.callsign),
        Some(Err(unable)) => info!("{}: {unable}", nav.callsign),
        None => {}
    }
}

/// point mass integration of the targets over `dt` seconds
fn integrate (nav: &mut Nav, wind: &WindSample, heading: (f64,TurnMethod,f64), altitude: (f64,f64), speed: (f64,f64), dt: f64) {
    let perf = nav.perf.clone();
    let fs = &mut nav.flight_state;

    let (target_hdg, turn, turn_rate) = heading;
    let mut dh = heading_signed_turn( fs.heading, target_hdg);
    match turn {
        TurnMethod::Left if dh > 0.0 => dh -= 360.0,
        TurnMethod::Right if dh < 0.0 => dh += 360.0,
        _ => {}
    }
    let max_dh = turn_rate * dt;
    fs.heading = normalize_heading( fs.heading + clamp( dh, -max_dh, max_dh));

    let (target_alt, alt_rate) = altitude;
    if nav_airborne( fs, &perf) {
        let climb = alt_rate.min( perf.rate.climb) / 60.0 * dt;
        let descent = alt_rate.min( perf.rate.descent) / 60.0 * dt;
        fs.altitude = clamp( target_alt, fs.altitude - descent, fs.altitude + climb);
    }

    let (target_spd, spd_rate) = speed;
    let accel = spd_rate.min( perf.rate.accelerate) * dt;
    let decel = spd_rate.min( perf.rate.decelerate) * dt;
    fs.ias = clamp( target_spd, fs.ias - decel, fs.ias + accel);

    // ground track from true heading, TAS and wind
    let true_hdg = fs.to_true( fs.heading).to_radians();
    let tas = ias_to_tas( fs.ias, fs.altitude);
    let wind_to = (wind.direction + 180.0).to_radians();
    let (vx, vy) = (tas * true_hdg.sin() + wind.speed * wind_to.sin(), tas * true_hdg.cos() + wind.speed * wind_to.cos());
    fs.gs = vx.hypot(vy);

    let track = normalize_heading( vx.atan2(vy).to_degrees());
    fs.position = fs.projection().offset( &fs.position, track, nm_travelled( fs.gs, dt));
}

fn nav_airborne (fs: &FlightState, perf: &AircraftPerformance)->bool { fs.ias >= perf.speed.v2 }

fn jet_performance ()->AircraftPerformance {
    AircraftPerformance {
        speed: SpeedEnvelope{ min: 130.0, v2: 140.0, landing: 135.0, cruise_tas: 460.0, max_tas: 490.0 },
        rate: PerformanceRates{ climb: 2500.0, descent: 2000.0, accelerate: 5.0, decelerate: 3.0 },
        turn: TurnLimits{ max_bank_angle: 25.0, max_bank_rate: 3.0 },
        ceiling: 41000.0,
        engine: EngineType::Jet,
    }
}

fn jfk_database ()->StaticDatabase {
    let mut db = StaticDatabase::default();
    for (id,lon,lat) in [
        ("CAMRN", -73.8555, 40.0173),
        ("VIDIO", -73.5580, 40.3933),
        ("CATOD", -73.5373, 40.5426),
        ("IGIDE", -73.6539, 40.5958),
        ("ROSLY", -73.6358, 40.7972),
    ] {
        db.add_fix( id, GeoPoint::from_lon_lat_degrees( lon, lat));
    }
    db.add_navaid( "DPK", GeoPoint::from_lon_lat_degrees( -73.3037, 40.7918));

    let mut kjfk = Airport::new( "KJFK", "JOHN F KENNEDY INTL", 13.0, GeoPoint::from_lon_lat_degrees( -73.779317, 40.639447));
    kjfk.approaches.insert( "I4L".to_string(), Arc::new( ils_04l()));
    db.add_airport( kjfk);
    db
}

/// a straight in ILS built back from the runway threshold along the final approach course
fn ils_04l ()->Approach {
    let threshold = GeoPoint::from_lon_lat_degrees( -73.7902, 40.6222);
    let proj = atc_common::geo::LocalProjection::new( 45.5);
    let final_course = 31.0; // true

    let wp = |id: &str, dist: f64| Waypoint::new( id, proj.offset( &threshold, final_course + 180.0, dist));
    Approach {
        id: "I4L".to_string(),
        full_name: "ILS Runway 4L".to_string(),
        approach_type: ApproachType::ILS,
        runway: "4L".to_string(),
        waypoints: vec![
            wp( "IF04L", 12.0).with_altitude_restriction( AltitudeRestriction::at_or_above( 3000.0)),
            wp( "FF04L", 6.0).with_altitude_restriction( AltitudeRestriction::at( 1900.0)).faf(),
            Waypoint::new( "RW04L", threshold).with_altitude_restriction( AltitudeRestriction::at( 50.0)),
        ]
    }
}

fn arrival_route (db: &StaticDatabase)->Result<Vec<Waypoint>> {
    let fix = |id: &str| db.lookup_fix(id).map( |p| Waypoint::new( id, p).on_star()).ok_or( anyhow::anyhow!("unknown fix {id}"));
    Ok( vec![
        fix("CAMRN")?.with_altitude_restriction( AltitudeRestriction::at_or_below( 10000.0)),
        fix("VIDIO")?.with_altitude_restriction( AltitudeRestriction::between( 6000.0, 8000.0)).with_speed( 250.0),
        fix("CATOD")?.with_altitude_restriction( AltitudeRestriction::at( 5000.0)).with_speed( 220.0),
        db.lookup_airport("KJFK").map( |ap| ap.waypoint()).ok_or( anyhow::anyhow!("no KJFK"))?,
    ])
}
