pub mod artifact;
pub mod error;
pub mod profile;
pub mod state;
pub mod surface;
