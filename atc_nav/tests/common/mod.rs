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

//! JFK area test fixture shared by the nav integration tests

use std::sync::Arc;
use chrono::{DateTime, TimeZone, Utc};

use atc_common::geo::GeoPoint;
use atc_nav::{FlightState, Nav, NavConfig};
use atc_nav::aviation::*;
use atc_nav::clearance::{DeferredAction, DeferredNavHeading};

pub fn sim_time ()->DateTime<Utc> { Utc.with_ymd_and_hms( 2025, 6, 15, 12, 0, 0).unwrap() }

pub fn fix (id: &str)->GeoPoint {
    let (lon,lat) = match id {
        "CAMRN" => (-73.8555, 40.0173),
        "VIDIO" => (-73.5580, 40.3933),
        "CATOD" => (-73.5373, 40.5426),
        "IGIDE" => (-73.6539, 40.5958),
        "ROSLY" => (-73.6358, 40.7972),
        "ZALPO" => (-73.6938, 40.7233),
        "LEFER" => (-73.5328, 40.8242),
        "HAUPT" => (-73.4099, 40.7673),
        "DPK"   => (-73.3037, 40.7918),
        "KORD"  => (-87.9048, 41.9742), // ~620nm away
        _ => panic!("unknown test fix {id}")
    };
    GeoPoint::from_lon_lat_degrees( lon, lat)
}

pub fn kjfk_location ()->GeoPoint { GeoPoint::from_lon_lat_degrees( -73.779317, 40.639447) }

pub fn kjfk ()->Waypoint { Waypoint::new( "KJFK", kjfk_location()) }

pub fn wp (id: &str)->Waypoint { Waypoint::new( id, fix(id)) }

/// final approach from CATOD over IGIDE (FAF) to the airport
pub fn test_approach ()->Approach {
    Approach {
        id: "I4L".to_string(),
        full_name: "ILS Runway 4L".to_string(),
        approach_type: ApproachType::ILS,
        runway: "4L".to_string(),
        waypoints: vec![
            wp("CATOD").with_altitude_restriction( AltitudeRestriction::at_or_above( 3000.0)),
            wp("IGIDE").with_altitude_restriction( AltitudeRestriction::at( 1900.0)).faf(),
            kjfk(),
        ]
    }
}

pub fn test_db ()->StaticDatabase {
    let mut db = StaticDatabase::default();
    for id in ["CAMRN", "VIDIO", "CATOD", "IGIDE", "ROSLY", "ZALPO", "LEFER", "HAUPT", "DPK", "KORD"] {
        db.add_fix( id, fix(id));
    }
    db.add_navaid( "DPK", fix("DPK"));

    let mut airport = Airport::new( "KJFK", "JOHN F KENNEDY INTL", 13.0, kjfk_location());
    airport.approaches.insert( "I4L".to_string(), Arc::new( test_approach()));
    db.add_airport( airport);
    db
}

pub fn test_perf ()->AircraftPerformance {
    AircraftPerformance {
        speed: SpeedEnvelope{ min: 130.0, v2: 140.0, landing: 135.0, cruise_tas: 460.0, max_tas: 490.0 },
        rate: PerformanceRates{ climb: 2500.0, descent: 2000.0, accelerate: 5.0, decelerate: 3.0 },
        turn: TurnLimits{ max_bank_angle: 25.0, max_bank_rate: 3.0 },
        ceiling: 41000.0,
        engine: EngineType::Jet,
    }
}

pub fn test_flight_state ()->FlightState {
    FlightState {
        position: fix("CAMRN"),
        heading: 270.0,
        altitude: 5000.0,
        ias: 250.0,
        gs: 250.0,
        magnetic_variation: -13.0,
        nm_per_longitude: 45.5,
        arrival_airport: kjfk(),
        arrival_airport_location: kjfk_location(),
        arrival_airport_elevation: 13.0,
        departure_airport_elevation: 0.0,
        initial_departure_climb: false,
    }
}

/// aircraft at CAMRN on route CAMRN VIDIO CATOD KJFK
pub fn make_test_nav ()->Nav {
    let route = vec![ wp("CAMRN"), wp("VIDIO"), wp("CATOD"), kjfk() ];
    Nav::new( "TEST", test_flight_state(), route, 0.0, Arc::new( test_perf()), Arc::new( test_db()), Arc::new( NavConfig::default()), 42)
}

pub fn calm ()->WindSample { WindSample::calm() }

pub fn set_deferred (nav: &mut Nav, secs: i64, action: DeferredAction) {
    nav.deferred.enqueue( DeferredNavHeading{ time: sim_time() + chrono::TimeDelta::seconds(secs), action });
}

pub fn set_perf (nav: &mut Nav, f: impl FnOnce(&mut AircraftPerformance)) {
    let mut perf = (*nav.perf).clone();
    f( &mut perf);
    nav.perf = Arc::new( perf);
}
