pub mod enrollments;
pub mod sequence;
