pub mod peel;
pub mod picking;
pub mod plate;
pub mod surface;
pub use peel::PeelSphere;
