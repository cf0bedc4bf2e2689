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

//! the results of ATC commands. Accepted commands return a [`CommandIntent`] that describes what
//! the pilot reads back, rejected ones an [`Unable`] with a human readable reason.

use std::fmt;
use serde::{Serialize,Deserialize};
use thiserror::Error;

use crate::aviation::{AltitudeRestriction, TurnMethod};

/// a rejected command. Rejections never mutate the nav state
#[derive(Error,Debug,Clone,PartialEq)]
#[error("{reason}")]
pub struct Unable {
    pub reason: String
}

impl Unable {
    pub fn new (reason: impl ToString)->Self { Unable{ reason: reason.to_string() } }
}

macro_rules! unable {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::intent::Unable::new( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use unable;

pub type CommandResult = Result<CommandIntent,Unable>;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum HeadingType {
    Assigned,
    Present,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct HeadingIntent {
    pub heading: f64,
    pub turn: TurnMethod,
    pub heading_type: HeadingType,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum NavigationType {
    DirectFix,
    CrossFixAt,
    DepartOnCourse,
    ResumeOwnNavigation,
    Hold,
    CancelHold,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct NavigationIntent {
    pub nav_type: NavigationType,
    pub fix: String,
    pub altitude: Option<AltitudeRestriction>,
    pub speed: Option<f64>,
}

impl NavigationIntent {
    pub fn new (nav_type: NavigationType, fix: impl ToString)->Self {
        NavigationIntent{ nav_type, fix: fix.to_string(), altitude: None, speed: None }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum AltitudeDirection {
    Climb,
    Descend,
    Maintain,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct AltitudeIntent {
    pub altitude: f64,
    pub direction: AltitudeDirection,
    pub after_speed: Option<f64>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum SpeedType {
    Assigned,
    Cancel,
    SlowestPractical,
    MaximumForward,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct SpeedIntent {
    pub speed: f64,
    pub speed_type: SpeedType,
    pub after_altitude: Option<f64>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ProcedureType {
    ClimbViaSID,
    DescendViaSTAR,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum ApproachIntentType {
    Expect,
    Cleared,
    CancelClearance,
    GoAround,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct ApproachIntent {
    pub intent_type: ApproachIntentType,
    pub approach_name: String,
    pub straight_in: bool,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum CommandIntent {
    Heading(HeadingIntent),
    Navigation(NavigationIntent),
    Altitude(AltitudeIntent),
    Speed(SpeedIntent),
    Procedure(ProcedureType),
    Approach(ApproachIntent),
}

/* #region readback text ****************************************************************************************/

impl fmt::Display for CommandIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandIntent::Heading(hi) => match hi.heading_type {
                HeadingType::Present => write!(f, "fly present heading"),
                HeadingType::Assigned => match hi.turn {
                    TurnMethod::Closest => write!(f, "fly heading {:03.0}", hi.heading),
                    turn => write!(f, "turn {turn} heading {:03.0}", hi.heading),
                }
            }
            CommandIntent::Navigation(ni) => match ni.nav_type {
                NavigationType::DirectFix => write!(f, "direct {}", ni.fix),
                NavigationType::CrossFixAt => {
                    write!(f, "cross {}", ni.fix)?;
                    if let Some(ar) = &ni.altitude { write!(f, " {ar}")?; }
                    if let Some(spd) = ni.speed { write!(f, " at {spd:.0} knots")?; }
                    Ok(())
                }
                NavigationType::DepartOnCourse => write!(f, "on course {}", ni.fix),
                NavigationType::ResumeOwnNavigation => write!(f, "own navigation"),
                NavigationType::Hold => write!(f, "hold at {}", ni.fix),
                NavigationType::CancelHold => write!(f, "cancel hold"),
            }
            CommandIntent::Altitude(ai) => {
                match ai.direction {
                    AltitudeDirection::Climb => write!(f, "climb and maintain {:.0}", ai.altitude)?,
                    AltitudeDirection::Descend => write!(f, "descend and maintain {:.0}", ai.altitude)?,
                    AltitudeDirection::Maintain => write!(f, "maintain {:.0}", ai.altitude)?,
                }
                if let Some(spd) = ai.after_speed { write!(f, " after reaching {spd:.0} knots")?; }
                Ok(())
            }
            CommandIntent::Speed(si) => {
                match si.speed_type {
                    SpeedType::Assigned => write!(f, "maintain {:.0} knots", si.speed)?,
                    SpeedType::Cancel => write!(f, "cancel speed restrictions")?,
                    SpeedType::SlowestPractical => write!(f, "slowest practical speed")?,
                    SpeedType::MaximumForward => write!(f, "maximum forward speed")?,
                }
                if let Some(alt) = si.after_altitude { write!(f, " after reaching {alt:.0}")?; }
                Ok(())
            }
            CommandIntent::Procedure(ProcedureType::ClimbViaSID) => write!(f, "climb via the SID"),
            CommandIntent::Procedure(ProcedureType::DescendViaSTAR) => write!(f, "descend via the STAR"),
            CommandIntent::Approach(ai) => match ai.intent_type {
                ApproachIntentType::Expect => write!(f, "expect {}", ai.approach_name),
                ApproachIntentType::Cleared if ai.straight_in => write!(f, "cleared straight in {}", ai.approach_name),
                ApproachIntentType::Cleared => write!(f, "cleared {}", ai.approach_name),
                ApproachIntentType::CancelClearance => write!(f, "cancel approach clearance"),
                ApproachIntentType::GoAround => write!(f, "going around"),
            }
        }
    }
}

/* #endregion readback text */
