pub mod clock;
pub mod errors;
pub mod money;

pub use clock::*;
pub use errors::*;
pub use money::*;
