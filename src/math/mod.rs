//! Numerical building blocks: Chebyshev series, table interpolation, range masking.

pub mod chebyshev;
pub mod interp;
pub mod range;

pub use chebyshev::*;
pub use interp::*;
pub use range::*;
