pub mod alerts;
pub mod margin;
pub mod rotation;

pub use alerts::AlertEngine;
