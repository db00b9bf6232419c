pub mod geometry;
pub mod interleave;
pub mod math;
pub mod tangent_space;
