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

/// this module provides the geometry support for terminal area navigation.
/// Route lengths and fix ranges use great circle distances computed by the [geo](https://docs.rs/geo/latest/geo/index.html)
/// crate, lengths are returned as [uom](https://docs.rs/uom/latest/uom/) quantities.
/// Steering geometry (headings, cross track distances, segment projections) uses a local equirectangular
/// projection in nautical miles, which is accurate enough within the ranges an approach controller works with.

use std::fmt;
use serde::{Serialize,Deserialize};
use geo::{Bearing, Distance, Haversine, Point};
use uom::si::{f64::Length, length::meter};

use crate::angle::{normalize_180, normalize_90, normalize_heading, vector_heading};
use crate::units::to_nautical_miles;

/// nautical miles per degree of latitude
pub const NM_PER_LATITUDE: f64 = 60.0;

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x: longitude, y: latitude)
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
#[serde(from="[f64;2]", into="[f64;2]")]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    pub fn longitude_degrees (&self) -> f64 { self.0.x() }
    pub fn latitude_degrees (&self) -> f64 { self.0.y() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }

    pub fn haversine_distance (&self, other: &GeoPoint) -> Length {
        let dist = Haversine.distance( self.0, other.0);
        Length::new::<meter>(dist)
    }

    /// great circle distance in nautical miles
    pub fn distance_nm (&self, other: &GeoPoint) -> f64 {
        to_nautical_miles( self.haversine_distance(other))
    }

    /// initial great circle bearing towards `other` in (0,360] true degrees
    pub fn bearing_to (&self, other: &GeoPoint) -> f64 {
        normalize_heading( Haversine.bearing( self.0, other.0))
    }
}

impl From<[f64;2]> for GeoPoint {
    fn from (lon_lat: [f64;2]) -> Self { GeoPoint::from_lon_lat_degrees( lon_lat[0], lon_lat[1]) }
}

impl From<GeoPoint> for [f64;2] {
    fn from (p: GeoPoint) -> Self { [p.0.x(), p.0.y()] }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.4},{:.4}]", self.0.x(),self.0.y())
    }
}

/// great circle length of a polyline in nautical miles
pub fn path_length_nm<'a> (points: impl IntoIterator<Item=&'a GeoPoint>) -> f64 {
    let mut len = 0.0;
    let mut last: Option<&GeoPoint> = None;
    for p in points {
        if let Some(p_last) = last { len += p_last.distance_nm(p); }
        last = Some(p);
    }
    len
}

/* #endregion GeoPoint */

/* #region LocalProjection ****************************************************************************************/

/// position in a local equirectangular projection, (east,north) in nautical miles
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct NmPoint {
    pub x: f64,
    pub y: f64
}

impl NmPoint {
    pub fn new (x: f64, y: f64)->Self { NmPoint{x,y} }

    pub fn length (&self)->f64 { self.x.hypot(self.y) }
    pub fn sub (&self, other: &NmPoint)->NmPoint { NmPoint::new( self.x - other.x, self.y - other.y) }
    pub fn add (&self, other: &NmPoint)->NmPoint { NmPoint::new( self.x + other.x, self.y + other.y) }
    pub fn scale (&self, s: f64)->NmPoint { NmPoint::new( self.x * s, self.y * s) }
    pub fn dot (&self, other: &NmPoint)->f64 { self.x * other.x + self.y * other.y }
    pub fn cross (&self, other: &NmPoint)->f64 { self.x * other.y - self.y * other.x }
}

/// the flat projection that is used for steering. `nm_per_longitude` is the local length of a longitude degree
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct LocalProjection {
    pub nm_per_longitude: f64
}

/// result of projecting a point onto a line segment
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SegmentProjection {
    pub distance_nm: f64, // distance between point and closest point on segment
    pub t: f64,           // parameter of the unclamped foot point, 0 at segment start, 1 at end
}

impl LocalProjection {
    pub fn new (nm_per_longitude: f64)->Self { LocalProjection{ nm_per_longitude } }

    pub fn to_nm (&self, p: &GeoPoint)->NmPoint {
        NmPoint::new( p.longitude_degrees() * self.nm_per_longitude, p.latitude_degrees() * NM_PER_LATITUDE)
    }

    pub fn from_nm (&self, p: &NmPoint)->GeoPoint {
        GeoPoint::from_lon_lat_degrees( p.x / self.nm_per_longitude, p.y / NM_PER_LATITUDE)
    }

    pub fn distance_nm (&self, a: &GeoPoint, b: &GeoPoint)->f64 {
        self.to_nm(b).sub( &self.to_nm(a)).length()
    }

    /// true heading from `from` to `to` in (0,360]
    pub fn heading (&self, from: &GeoPoint, to: &GeoPoint)->f64 {
        let v = self.to_nm(to).sub( &self.to_nm(from));
        vector_heading( v.x, v.y)
    }

    /// the point at `dist_nm` along true heading `hdg` from `p`
    pub fn offset (&self, p: &GeoPoint, hdg: f64, dist_nm: f64)->GeoPoint {
        let r = hdg.to_radians();
        let v = NmPoint::new( r.sin() * dist_nm, r.cos() * dist_nm);
        self.from_nm( &self.to_nm(p).add(&v))
    }

    pub fn project_on_segment (&self, p: &GeoPoint, start: &GeoPoint, end: &GeoPoint)->SegmentProjection {
        let p = self.to_nm(p);
        let a = self.to_nm(start);
        let d = self.to_nm(end).sub(&a);
        let ap = p.sub(&a);

        let len2 = d.dot(&d);
        if len2 == 0.0 {
            return SegmentProjection{ distance_nm: ap.length(), t: 0.0 }
        }

        let t = ap.dot(&d) / len2;
        let foot = a.add( &d.scale( t.clamp( 0.0, 1.0)));
        SegmentProjection{ distance_nm: p.sub(&foot).length(), t }
    }

    /// signed distance of `p` from the infinite line through `start`,`end`. Positive is right of the line direction
    pub fn cross_track_nm (&self, p: &GeoPoint, start: &GeoPoint, end: &GeoPoint)->f64 {
        let a = self.to_nm(start);
        let d = self.to_nm(end).sub(&a);
        let len = d.length();
        if len == 0.0 { return self.to_nm(p).sub(&a).length() }
        d.cross( &self.to_nm(p).sub(&a)) / -len
    }
}

/* #endregion LocalProjection */
