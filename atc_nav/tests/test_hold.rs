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

// run with "cargo test -p atc_nav --test test_hold -- --nocapture"

mod common;
use common::*;

use chrono::TimeDelta;
use atc_common::geo::{GeoPoint, LocalProjection};
use atc_nav::aviation::{Hold, TurnDirection, TurnMethod};
use atc_nav::hold::*;

fn ctx_at (position: GeoPoint, heading: f64)->HoldContext {
    HoldContext {
        position,
        heading,
        magnetic_variation: 0.0,
        proj: LocalProjection::new( 45.5),
        pass_distance: 0.25,
        overfly_distance: 2.0,
    }
}

#[test]
fn test_direct_entry_circuit() {
    let rosly = fix("ROSLY");
    let proj = LocalProjection::new( 45.5);
    let mut fh = FlyHold::new( Hold::new( "ROSLY", 20.0, TurnDirection::Right), rosly);
    let t0 = sim_time();

    // approaching along the inbound course
    let (hdg,turn) = fh.target_heading( &ctx_at( proj.offset( &rosly, 200.0, 5.0), 20.0), t0);
    assert_eq!( fh.state, HoldState::ApproachingFix);
    assert!( (hdg - 20.0).abs() < 1e-6);
    assert_eq!( turn, TurnMethod::Closest);

    // at the fix we turn right onto the outbound leg
    let (hdg,turn) = fh.target_heading( &ctx_at( rosly, 20.0), t0);
    assert_eq!( fh.entry, Some( HoldEntry::Direct));
    assert_eq!( fh.state, HoldState::TurningOutbound);
    assert_eq!( (hdg,turn), (200.0, TurnMethod::Right));

    // established outbound, the leg is timed from here
    let abeam = proj.offset( &rosly, 110.0, 2.0);
    let (hdg,turn) = fh.target_heading( &ctx_at( abeam, 200.0), t0);
    assert_eq!( fh.state, HoldState::Outbound);
    assert_eq!( (hdg,turn), (200.0, TurnMethod::Closest));

    fh.target_heading( &ctx_at( abeam, 200.0), t0 + TimeDelta::seconds(30));
    assert_eq!( fh.state, HoldState::Outbound);

    // after one minute turn back inbound
    let (hdg,turn) = fh.target_heading( &ctx_at( abeam, 200.0), t0 + TimeDelta::seconds(61));
    assert_eq!( fh.state, HoldState::TurningInbound);
    assert_eq!( (hdg,turn), (20.0, TurnMethod::Right));

    let inbound_pos = proj.offset( &rosly, 200.0, 3.0);
    fh.target_heading( &ctx_at( inbound_pos, 15.0), t0 + TimeDelta::seconds(120));
    assert_eq!( fh.state, HoldState::Inbound);

    // and around again
    fh.target_heading( &ctx_at( rosly, 20.0), t0 + TimeDelta::seconds(180));
    assert_eq!( fh.state, HoldState::TurningOutbound);
    assert!( !fh.is_entering());
}

#[test]
fn test_parallel_entry() {
    let rosly = fix("ROSLY");
    let proj = LocalProjection::new( 45.5);
    let mut fh = FlyHold::new( Hold::new( "ROSLY", 20.0, TurnDirection::Right), rosly);
    let t0 = sim_time();

    // arriving on 270 is in the parallel sector, fly outbound with a left turn
    let (hdg,turn) = fh.target_heading( &ctx_at( rosly, 270.0), t0);
    assert_eq!( fh.entry, Some( HoldEntry::Parallel));
    assert_eq!( fh.state, HoldState::EntryOutbound);
    assert_eq!( (hdg,turn), (200.0, TurnMethod::Left));
    assert!( fh.is_entering());

    // after the outbound minute return to the fix, turning away from the holding side
    let out = proj.offset( &rosly, 200.0, 4.0);
    let (_,turn) = fh.target_heading( &ctx_at( out, 200.0), t0 + TimeDelta::seconds(61));
    assert_eq!( fh.state, HoldState::EntryReturn);
    assert_eq!( turn, TurnMethod::Left);

    fh.target_heading( &ctx_at( out, 20.0), t0 + TimeDelta::seconds(90));
    assert_eq!( fh.state, HoldState::Inbound);
}

#[test]
fn test_teardrop_entry() {
    let rosly = fix("ROSLY");
    let mut fh = FlyHold::new( Hold::new( "ROSLY", 20.0, TurnDirection::Right), rosly);

    let (hdg,turn) = fh.target_heading( &ctx_at( rosly, 170.0), sim_time());
    assert_eq!( fh.entry, Some( HoldEntry::Teardrop));
    assert_eq!( fh.state, HoldState::EntryOutbound);
    assert_eq!( (hdg,turn), (170.0, TurnMethod::Closest)); // 30 deg towards the holding side of the outbound course
}

#[test]
fn test_distance_leg() {
    let rosly = fix("ROSLY");
    let proj = LocalProjection::new( 45.5);
    let mut hold = Hold::new( "ROSLY", 20.0, TurnDirection::Right);
    hold.leg_length = 5.0;
    let mut fh = FlyHold::new( hold, rosly);
    let t0 = sim_time();

    fh.target_heading( &ctx_at( rosly, 20.0), t0);
    fh.target_heading( &ctx_at( proj.offset( &rosly, 110.0, 2.0), 200.0), t0);
    assert_eq!( fh.state, HoldState::Outbound);

    // time doesn't matter for distance legs
    fh.target_heading( &ctx_at( proj.offset( &rosly, 160.0, 3.0), 200.0), t0 + TimeDelta::seconds(300));
    assert_eq!( fh.state, HoldState::Outbound);

    fh.target_heading( &ctx_at( proj.offset( &rosly, 170.0, 5.5), 200.0), t0 + TimeDelta::seconds(310));
    assert_eq!( fh.state, HoldState::TurningInbound);
}
