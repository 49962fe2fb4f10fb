//! Grouping a heterogeneous operation list by register.
//!
//! A [`Dispatch`] pairs an ordered list of [`Target`]s, one per register
//! together with the grouped access to perform on it, with a list of
//! [`AnyOp`]s for any of those registers. Running it visits the targets in
//! order; each target picks out the operations tagged with its register and
//! applies all of them in a single grouped access. A register with no
//! matching operation is not touched.
//!
//! Every operation must belong to a listed register of the same width. A list
//! that breaks this is rejected before any access happens, at compile time
//! when the dispatch is a `const` item:
//!
//! ```compile_fail
//! # use regbits::prelude::*;
//! register! {
//!     /// A.
//!     pub struct A: u32 @ 0x1000 {
//!         /// X.
//!         X(0),
//!     }
//!     /// B.
//!     pub struct B: u32 @ 0x1004 {
//!         /// Y.
//!         Y(0),
//!     }
//! }
//! const TARGETS: [Target; 1] = [Target::set::<A>()];
//! const OPS: [AnyOp; 2] = ops![A::X, B::Y];
//! const DISPATCH: Dispatch = Dispatch::new(&TARGETS, &OPS);
//! let _ = DISPATCH;
//! ```

use core::fmt::{self, Debug, Display, Formatter};

use crate::access::Reg;
use crate::exclusive::Exclusive;
use crate::permission::PermissionRoot;
use crate::register::{AnyOp, Register, RegisterAction};
use crate::value::RegisterValue;

type ApplyFn = fn(PermissionRoot, Exclusive, RegisterAction, &[AnyOp]);

/// A register together with the grouped access to perform on it.
#[derive(Clone, Copy)]
pub struct Target {
    address: usize,
    bits: u32,
    name: &'static str,
    action: RegisterAction,
    apply: ApplyFn,
}

impl Debug for Target {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("address", &format_args!("{:#x}", self.address))
            .field("bits", &self.bits)
            .field("action", &self.action)
            .finish()
    }
}

impl Target {
    /// Targets register `R` with `action`.
    #[must_use]
    pub const fn new<R: Register>(action: RegisterAction) -> Self {
        Self {
            address: R::ADDRESS,
            bits: <R::Value as RegisterValue>::BITS,
            name: R::NAME,
            action,
            apply: apply_erased::<R>,
        }
    }

    /// Targets `R` with [`RegisterAction::Set`].
    #[must_use]
    pub const fn set<R: Register>() -> Self {
        Self::new::<R>(RegisterAction::Set)
    }

    /// Targets `R` with [`RegisterAction::SetOr`].
    #[must_use]
    pub const fn set_or<R: Register>() -> Self {
        Self::new::<R>(RegisterAction::SetOr)
    }

    /// Targets `R` with [`RegisterAction::SetNand`].
    #[must_use]
    pub const fn set_nand<R: Register>() -> Self {
        Self::new::<R>(RegisterAction::SetNand)
    }

    /// Targets `R` with [`RegisterAction::Modify`].
    #[must_use]
    pub const fn modify<R: Register>() -> Self {
        Self::new::<R>(RegisterAction::Modify)
    }

    /// The register's address.
    #[inline(always)]
    #[must_use]
    pub const fn address(&self) -> usize {
        self.address
    }

    /// The register's bit width.
    #[inline(always)]
    #[must_use]
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// The register's name.
    #[inline(always)]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The grouped access performed on the register.
    #[inline(always)]
    #[must_use]
    pub const fn action(&self) -> RegisterAction {
        self.action
    }
}

fn apply_erased<R: Register>(
    root: PermissionRoot,
    u: Exclusive,
    action: RegisterAction,
    ops: &[AnyOp],
) {
    let bits = <R::Value as RegisterValue>::BITS;
    Reg::<R>::new(root).apply_words(u, action, |start| {
        ops.iter()
            .filter(|op| op.address() == R::ADDRESS && op.bits() == bits)
            .fold(start, |value, op| op.apply_word(value))
    });
}

/// The error returned when a dispatch list is malformed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum DispatchError {
    /// An operation belongs to a register that no target lists.
    UnmatchedOperation {
        /// The index of the operation in the operation list.
        index: usize,
        /// The address of the operation's register.
        address: usize,
    },
    /// An operation belongs to a register whose width differs from that of
    /// the listed register at the same address.
    WidthMismatch {
        /// The index of the operation in the operation list.
        index: usize,
        /// The address shared by both registers.
        address: usize,
        /// The bit width of the operation's register.
        op_bits: u32,
        /// The bit width of the listed register.
        target_bits: u32,
    },
}

impl Display for DispatchError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnmatchedOperation { index, address } => write!(
                f,
                "operation {index} targets register {address:#x}, which is not in the dispatch list",
            ),
            Self::WidthMismatch {
                index,
                address,
                op_bits,
                target_bits,
            } => write!(
                f,
                "operation {index} is {op_bits} bits wide but register {address:#x} is {target_bits} bits wide",
            ),
        }
    }
}

/// Operations grouped by the registers they belong to.
#[derive(Clone, Copy, Debug)]
pub struct Dispatch<'a> {
    targets: &'a [Target],
    ops: &'a [AnyOp],
}

impl<'a> Dispatch<'a> {
    /// Pairs `targets` with `ops`.
    ///
    /// # Panics
    ///
    /// Panics if an operation belongs to a register missing from `targets`,
    /// or to a register of another width at a listed address. In a const
    /// context the panic is a compile error.
    #[must_use]
    pub const fn new(targets: &'a [Target], ops: &'a [AnyOp]) -> Self {
        match Self::check(targets, ops) {
            Ok(()) => Self { targets, ops },
            Err(DispatchError::UnmatchedOperation { .. }) => {
                panic!("operation targets a register that is not in the dispatch list")
            }
            Err(DispatchError::WidthMismatch { .. }) => {
                panic!("operation width differs from the listed register")
            }
        }
    }

    /// Pairs `targets` with `ops`, or reports the first operation that
    /// [`check`](Self::check) rejects.
    pub fn try_new(targets: &'a [Target], ops: &'a [AnyOp]) -> Result<Self, DispatchError> {
        match Self::check(targets, ops) {
            Ok(()) => Ok(Self { targets, ops }),
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("rejected dispatch list: {}", e);
                Err(e)
            }
        }
    }

    /// Checks that every operation belongs to a register in `targets`, and
    /// that the register listed at its address has the operation's width.
    pub const fn check(targets: &[Target], ops: &[AnyOp]) -> Result<(), DispatchError> {
        let mut i = 0;
        while i < ops.len() {
            let op = ops[i];
            match first_target(targets, op.address(), targets.len()) {
                None => {
                    return Err(DispatchError::UnmatchedOperation {
                        index: i,
                        address: op.address(),
                    })
                }
                Some(t) if targets[t].bits != op.bits() => {
                    return Err(DispatchError::WidthMismatch {
                        index: i,
                        address: op.address(),
                        op_bits: op.bits(),
                        target_bits: targets[t].bits,
                    })
                }
                Some(_) => {}
            }
            i += 1;
        }
        Ok(())
    }

    /// The targets, in dispatch order.
    #[must_use]
    pub const fn targets(&self) -> &'a [Target] {
        self.targets
    }

    /// The operations.
    #[must_use]
    pub const fn ops(&self) -> &'a [AnyOp] {
        self.ops
    }

    /// The number of operations each target will apply.
    ///
    /// A target whose register appears earlier in the list gets none: the
    /// earlier entry has already consumed them.
    pub fn plan(&self) -> impl Iterator<Item = (&'a Target, usize)> + 'a {
        let targets = self.targets;
        let ops = self.ops;
        targets.iter().enumerate().map(move |(i, target)| {
            let count = if first_target(targets, target.address, i).is_some() {
                0
            } else {
                ops.iter()
                    .filter(|op| op.address() == target.address)
                    .count()
            };
            (target, count)
        })
    }

    /// Performs one grouped access on every target with at least one
    /// operation and returns how many registers were accessed.
    pub fn run(&self, root: PermissionRoot, u: Exclusive) -> usize {
        let mut accessed = 0;
        for (target, count) in self.plan() {
            if count == 0 {
                continue;
            }
            #[cfg(feature = "defmt")]
            defmt::trace!(
                "dispatch {=str} @ {=usize:#x}: {} with {=usize} ops",
                target.name,
                target.address,
                target.action,
                count,
            );
            (target.apply)(root, u, target.action, self.ops);
            accessed += 1;
        }
        accessed
    }
}

// The index of the first of `targets[..end]` at `address`.
const fn first_target(targets: &[Target], address: usize, end: usize) -> Option<usize> {
    let mut i = 0;
    while i < end {
        if targets[i].address == address {
            return Some(i);
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Field;

    struct A;
    struct B;

    impl Register for A {
        type Value = u32;
        const ADDRESS: usize = 0x100;
        const NAME: &'static str = "A";
    }

    impl Register for B {
        type Value = u8;
        const ADDRESS: usize = 0x104;
        const NAME: &'static str = "B";
    }

    struct Alias;

    impl Register for Alias {
        type Value = u8;
        const ADDRESS: usize = 0x100;
        const NAME: &'static str = "ALIAS";
    }

    const A0: Field<A> = Field::bit(0);
    const B3: Field<B> = Field::new(3, 2);
    const ALIAS0: Field<Alias> = Field::bit(0);

    #[test]
    fn test_check_accepts_listed_registers() {
        let targets = [Target::set::<A>(), Target::modify::<B>()];
        let ops = [A0.erase(), B3.erase(), A0.nand().erase()];
        assert_eq!(Dispatch::check(&targets, &ops), Ok(()));
    }

    #[test]
    fn test_check_rejects_unlisted_register() {
        let targets = [Target::set::<A>()];
        let ops = [A0.erase(), B3.erase()];
        assert_eq!(
            Dispatch::try_new(&targets, &ops).map(|_| ()),
            Err(DispatchError::UnmatchedOperation {
                index: 1,
                address: 0x104,
            }),
        );
    }

    #[test]
    fn test_check_rejects_width_mismatch() {
        let targets = [Target::modify::<A>(), Target::set::<B>()];
        let ops = [B3.erase(), A0.erase(), ALIAS0.erase()];
        assert_eq!(
            Dispatch::check(&targets, &ops),
            Err(DispatchError::WidthMismatch {
                index: 2,
                address: 0x100,
                op_bits: 8,
                target_bits: 32,
            }),
        );
    }

    #[test]
    fn test_plan_counts_ops_per_first_target() {
        let targets = [
            Target::set::<A>(),
            Target::modify::<B>(),
            Target::set_or::<A>(),
        ];
        let ops = [A0.erase(), B3.erase(), A0.xor().erase()];
        let dispatch = Dispatch::new(&targets, &ops);
        let counts: Vec<_> = dispatch
            .plan()
            .map(|(target, count)| (target.name(), count))
            .collect();
        assert_eq!(counts, [("A", 2), ("B", 1), ("A", 0)]);
    }

    #[test]
    fn test_empty_lists() {
        let dispatch = Dispatch::new(&[], &[]);
        assert_eq!(dispatch.plan().count(), 0);
        let targets = [Target::set::<A>()];
        let dispatch = Dispatch::new(&targets, &[]);
        assert_eq!(dispatch.plan().map(|(_, count)| count).sum::<usize>(), 0);
    }

    #[test]
    fn test_error_display() {
        let e = DispatchError::UnmatchedOperation {
            index: 2,
            address: 0x104,
        };
        assert_eq!(
            e.to_string(),
            "operation 2 targets register 0x104, which is not in the dispatch list",
        );
        let e = DispatchError::WidthMismatch {
            index: 0,
            address: 0x200,
            op_bits: 8,
            target_bits: 32,
        };
        assert_eq!(
            e.to_string(),
            "operation 0 is 8 bits wide but register 0x200 is 32 bits wide",
        );
    }
}
