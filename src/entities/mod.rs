//! Catalog record types

pub mod fitment;
pub mod submission;
pub mod vehicle;

pub use fitment::{AxleTyre, Fitment, PressureTable, TubeType};
pub use submission::{Submission, SubmissionStatus, Submitter};
pub use vehicle::{slugify, Vehicle, VehicleCategory};
