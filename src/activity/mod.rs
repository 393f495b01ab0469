pub mod continuation;
pub mod position;
pub mod record;

pub use continuation::*;
pub use position::*;
pub use record::*;
