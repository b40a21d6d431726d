pub mod alerts;
pub mod system;
