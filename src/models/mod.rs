pub mod device;
pub mod volume;
