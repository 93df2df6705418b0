pub mod lens;
pub mod scope;
pub mod symbol;

pub use lens::*;
pub use scope::*;
pub use symbol::*;
