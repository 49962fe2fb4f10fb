//! The hardware-facing end: typed access to one register.

use core::marker::PhantomData;

use vcell::VolatileCell;

use crate::bit_field::{apply_all, FieldAction};
use crate::exclusive::Exclusive;
use crate::permission::PermissionRoot;
use crate::register::{Op, Register, RegisterAction};
use crate::value::{RegisterValue, Shift, ShiftBelow};

/// Access to register `R`.
///
/// Every read and write goes through [`get`](Self::get), a volatile handle
/// onto the register, so accesses happen in program order and are never
/// merged, elided or cached.
///
/// The typed primitives take `&[Op<R>]`, so a single call can only combine
/// operations that belong to `R`:
///
/// ```compile_fail
/// # use regbits::prelude::*;
/// register! {
///     /// A.
///     pub struct A: u32 @ 0x1000 {
///         /// X.
///         X(0),
///     }
///     /// B.
///     pub struct B: u32 @ 0x1004 {
///         /// Y.
///         Y(0),
///     }
/// }
/// let root = unsafe { PermissionRoot::new_unchecked() };
/// Reg::<A>::new(root).set(&[A::X.or(), B::Y.or()]);
/// ```
pub struct Reg<'a, R> {
    _phantom: PhantomData<(&'a (), fn() -> R)>,
}

impl<'a, R> Clone for Reg<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R> Copy for Reg<'a, R> {}

impl<'a, R: Register> Reg<'a, R> {
    /// Creates the accessor.
    #[must_use]
    pub fn new(root: PermissionRoot) -> Self {
        let _ = root;
        Self {
            _phantom: PhantomData,
        }
    }

    /// A live handle onto the register.
    ///
    /// Each call resolves [`Register::ptr`] once; each `get`/`set` on the
    /// handle is exactly one volatile access.
    #[inline(always)]
    #[must_use]
    pub fn get(&self) -> &'a VolatileCell<R::Value> {
        // SAFETY: `PermissionRoot` vouches that `R::ptr()` is a valid, aligned
        // register for `'a`. `VolatileCell<T>` is `#[repr(transparent)]` over
        // `T`.
        unsafe { &*(R::ptr() as *const VolatileCell<R::Value>) }
    }

    /// Reads the register.
    #[inline(always)]
    #[must_use]
    pub fn read(&self) -> R::Value {
        self.get().get()
    }

    #[inline(always)]
    fn write(&self, value: R::Value) {
        self.get().set(value);
    }

    /// Reads the register and keeps only the bits of the combined value of
    /// `ops`. Nothing is written.
    #[must_use]
    pub fn get_and(&self, ops: &[Op<R>]) -> R::Value {
        self.read() & combined(zero::<R>(), ops)
    }

    /// Writes the combined value of `ops`. Bits outside the operands end up
    /// clear.
    pub fn set(&self, ops: &[Op<R>]) {
        self.perform(RegisterAction::Set, |start| combined(start, ops));
    }

    /// Writes the combined value of `ops` shifted left by `SHIFT` bits.
    ///
    /// `SHIFT` must be less than the register width; anything else fails to
    /// type-check.
    pub fn set_shifted<const SHIFT: u32>(&self, ops: &[Op<R>])
    where
        Shift<SHIFT>: ShiftBelow<R::Value>,
    {
        self.write(combined(zero::<R>(), ops) << SHIFT as usize);
    }

    /// ORs the combined value of `ops` into the register.
    pub fn set_or(&self, u: Exclusive, ops: &[Op<R>]) {
        let _ = u;
        self.perform(RegisterAction::SetOr, |start| combined(start, ops));
    }

    /// Clears the bits of the combined value of `ops` in the register.
    pub fn set_nand(&self, u: Exclusive, ops: &[Op<R>]) {
        let _ = u;
        self.perform(RegisterAction::SetNand, |start| combined(start, ops));
    }

    /// Overwrites the register with a raw value.
    pub fn set_value(&self, value: R::Value) {
        self.write(value);
    }

    /// Folds `ops` over the register's current content and writes the
    /// result back.
    pub fn modify(&self, u: Exclusive, ops: &[Op<R>]) {
        let _ = u;
        self.perform(RegisterAction::Modify, |start| combined(start, ops));
    }

    /// Reads the register, passes the value through `f` and writes the
    /// result back.
    pub fn modify_with(&self, u: Exclusive, f: impl FnOnce(R::Value) -> R::Value) {
        let _ = u;
        self.write(f(self.read()));
    }

    /// Applies runtime bit-field actions to the register in one
    /// read-modify-write.
    pub fn update(&self, u: Exclusive, actions: &[FieldAction<R::Value>]) {
        self.modify_with(u, |value| apply_all(value, actions));
    }

    /// Performs the grouped access selected by `action`.
    pub fn apply(&self, u: Exclusive, action: RegisterAction, ops: &[Op<R>]) {
        let _ = u;
        self.perform(action, |start| combined(start, ops));
    }

    /// Performs `action` with a fold over words. This backs the type-erased
    /// dispatcher.
    pub(crate) fn apply_words(
        &self,
        u: Exclusive,
        action: RegisterAction,
        fold: impl Fn(u64) -> u64,
    ) {
        let _ = u;
        self.perform(action, |start| {
            <R::Value as RegisterValue>::from_word(fold(start.to_word()))
        });
    }

    // `fold` maps a start value to the combined value: `Set`, `SetOr` and
    // `SetNand` start from zero, `Modify` from the register's content.
    fn perform(&self, action: RegisterAction, fold: impl Fn(R::Value) -> R::Value) {
        match action {
            RegisterAction::Set => self.write(fold(zero::<R>())),
            RegisterAction::SetOr => {
                let value = self.read();
                self.write(value | fold(zero::<R>()));
            }
            RegisterAction::SetNand => {
                let value = self.read();
                self.write(value & !fold(zero::<R>()));
            }
            RegisterAction::Modify => {
                let value = self.read();
                self.write(fold(value));
            }
        }
    }
}

#[inline(always)]
fn zero<R: Register>() -> R::Value {
    <R::Value as RegisterValue>::ZERO
}

fn combined<R: Register>(start: R::Value, ops: &[Op<R>]) -> R::Value {
    ops.iter().fold(start, |value, op| op.operation().apply(value))
}
