#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

use core::fmt::{self, Display, Formatter};

#[macro_use]
mod macros;

pub mod access;
pub mod bit_field;
pub mod dispatch;
pub mod field;
pub mod op;
pub mod prelude;
pub mod register;
pub mod value;

mod exclusive;
mod permission;

// For macro access via `$crate`.
#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
    pub use seq_macro::seq;
}

mod sealed {
    pub trait Sealed {}
}

pub use crate::access::Reg;
pub use crate::exclusive::{exclusive, Exclusive};
pub use crate::field::{FieldSpec, MaskValue};
pub use crate::permission::PermissionRoot;
pub use crate::register::{AnyOp, Field, Op, Register, RegisterAction};
pub use crate::value::RegisterValue;

/// The error returned when a field layout does not fit its register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum LayoutError {
    /// The field has no bits.
    ZeroWidth,
    /// The field extends past the register's top bit.
    Overflow {
        /// The requested position.
        position: u32,
        /// The requested width.
        width: u32,
        /// The register's bit width.
        bits: u32,
    },
}

impl Display for LayoutError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "bit field must be at least one bit wide"),
            Self::Overflow {
                position,
                width,
                bits,
            } => write!(
                f,
                "bit field at {position} of width {width} overflows a {bits}-bit register",
            ),
        }
    }
}
