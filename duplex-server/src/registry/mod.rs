mod registry;
mod relay;

pub use registry::*;
pub use relay::*;
