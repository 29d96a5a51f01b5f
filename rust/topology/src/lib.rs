// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IndoorGML-Lite Topology
//!
//! Derives the adjacency relation between cell spaces from their geometry.
//!
//! Two cell spaces are adjacent when their geometries *touch*: their
//! boundaries meet but their interiors do not overlap (a shared wall, a
//! shared corner, a door line ending on a room outline). Every adjacent
//! pair yields two directed [`Transition`]s, so the relation is symmetric
//! by construction.

pub mod adjacency;
pub mod touches;
pub mod transitions;

pub use adjacency::Adjacency;
pub use touches::touches;
pub use transitions::{build_transitions, Transition};
