//! Robot motion model
//!
//! A plain kinematic differential drive. No dynamics, no wheel limits:
//! wheel speeds change only through explicit nudges and `drive` integrates
//! one explicit Euler step per frame.

pub mod diff_drive;

pub use diff_drive::DiffDrive;
