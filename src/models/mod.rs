pub mod advice;
pub mod crop;
pub mod expense;
pub mod field;
pub mod forecast;
pub mod sale;

pub use advice::*;
pub use crop::*;
pub use expense::*;
pub use field::*;
pub use forecast::*;
pub use sale::*;
