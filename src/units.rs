// For simulating
pub type Real = f64;
pub type Point = cgmath::Point3<Real>;
pub type Vector = cgmath::Vector3<Real>;
