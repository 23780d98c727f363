//! The genetic-algorithm core: paths, the generation driver, and the result
//! record it produces.

pub mod driver;
pub mod path;
pub mod stats;

pub use driver::Driver;
pub use path::Path;
pub use stats::SolverResult;
