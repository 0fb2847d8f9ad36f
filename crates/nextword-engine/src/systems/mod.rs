pub mod cloud;
pub mod rng;
