// This file is part of arm_force_field.
//
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Arm Force Field
//!
//! This library estimates the maximum manual arm strength of both arms from
//! the hand position relative to the shoulder and the direction of the force
//! applied by the hand. The zero-gravity strength comes from a pretrained
//! network, is saturated to the observed bounds, corrected with the gravity
//! moment of the arm, and converted to the percentage of a reference
//! population capable of a load.
pub mod application;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod model;
pub mod posture;
pub mod strength;
pub mod utility;
