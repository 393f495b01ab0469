pub mod conversion;
pub mod legacy;
pub mod snapshot;

pub use conversion::*;
pub use legacy::*;
pub use snapshot::*;
