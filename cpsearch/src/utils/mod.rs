//! This module contains helper functionality.

mod environment;
pub use self::environment::*;

mod error;
pub use self::error::*;

mod parallel;
pub use self::parallel::*;

mod quota;
pub use self::quota::*;

mod timing;
pub use self::timing::*;
