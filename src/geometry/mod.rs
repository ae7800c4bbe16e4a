pub mod bounds;
pub mod territory;

pub use bounds::Bounds;
pub use territory::Territory;
