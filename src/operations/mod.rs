pub mod blend;
pub mod creation;
pub mod euler;
