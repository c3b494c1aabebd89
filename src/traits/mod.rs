pub mod capture_device;
pub mod scheduler;
pub mod session_host;
pub mod surface_registry;
