//! Commonly used items for convenient importing.
//!
//! # Usage
//!
//! ```rust
//! use tyers::prelude::*;
//!
//! static DIVISION: Sentinel = Sentinel::new("division error");
//!
//! fn divide(a: i32, b: i32) -> Result<i32, Error> {
//!     if b == 0 {
//!         bail!(&DIVISION, "cannot divide {} by zero", a);
//!     }
//!     Ok(a / b)
//! }
//!
//! assert_eq!(divide(10, 2).unwrap(), 5);
//! assert!(divide(1, 0).err_is(&DIVISION));
//! ```
//!
//! # What's Included
//!
//! - **[`Error`]**, **[`TypedError`]** and **[`Sentinel`]**
//! - **[`ResultExt`]**: extension methods for `Result` types
//! - **[`IntoTyers`]**: conversions from foreign error types
//! - **[`errorf!`]** and **[`bail!`]**: macros for creating and returning
//!   typed errors

pub use crate::{
    Arg, Error, ResultExt, Sentinel, TypedError, bail, compat::IntoTyers, errorf,
};
