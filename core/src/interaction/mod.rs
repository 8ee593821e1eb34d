//! Interactions

use crate::geometry::*;

mod surface_interaction;

pub use surface_interaction::*;
