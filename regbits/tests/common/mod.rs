#![allow(dead_code)]

use std::cell::Cell;

use regbits::{Exclusive, PermissionRoot, RegisterValue};
use vcell::VolatileCell;

/// Host memory standing in for a register, plus a count of how many times
/// the register's pointer was resolved. Every volatile access through a
/// `Reg` resolves the pointer exactly once.
pub struct Backing<T> {
    pub cell: VolatileCell<T>,
    pub accesses: Cell<usize>,
}

impl<T: RegisterValue> Backing<T> {
    pub fn new() -> Self {
        Self {
            cell: VolatileCell::new(T::ZERO),
            accesses: Cell::new(0),
        }
    }
}

/// Declares a register living in thread-local memory, so tests running on
/// parallel threads never share one.
macro_rules! fake_register {
    ($name:ident: $value:ident @ $address:literal) => {
        pub struct $name;

        impl $name {
            fn with_backing<U>(f: impl FnOnce(&$crate::common::Backing<$value>) -> U) -> U {
                thread_local! {
                    static BACKING: $crate::common::Backing<$value> =
                        $crate::common::Backing::new();
                }
                BACKING.with(f)
            }

            /// The register content, read without counting an access.
            pub fn peek() -> $value {
                Self::with_backing(|b| b.cell.get())
            }

            /// Sets the register content without counting an access.
            pub fn poke(value: $value) {
                Self::with_backing(|b| b.cell.set(value));
            }

            /// The number of accesses made through `Reg` so far.
            pub fn accesses() -> usize {
                Self::with_backing(|b| b.accesses.get())
            }
        }

        impl ::regbits::Register for $name {
            type Value = $value;
            const ADDRESS: usize = $address;
            const NAME: &'static str = stringify!($name);

            fn ptr() -> *mut $value {
                Self::with_backing(|b| {
                    b.accesses.set(b.accesses.get() + 1);
                    b.cell.as_ptr()
                })
            }
        }
    };
}

pub fn root() -> PermissionRoot {
    // SAFETY: Test registers live in thread-local memory.
    unsafe { PermissionRoot::new_unchecked() }
}

pub fn exclusive() -> Exclusive<'static> {
    // SAFETY: Test registers are never shared between threads.
    unsafe { Exclusive::new_unchecked() }
}
