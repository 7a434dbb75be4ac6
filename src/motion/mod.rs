//! Motion planning: linear moves, arc interpolation, homing and the position model.

mod arc;
mod homing;
mod linear;
mod position;

pub use arc::{ArcPlan, ArcPoints, ArcRequest, PlanePoint, Winding, POINT_EPSILON_MM};
pub use homing::{HomingSequencer, HomingState};
pub use linear::LinearMove;
pub use position::PositionModel;
