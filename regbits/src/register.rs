//! Binding fields and operations to the register they belong to.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::field::FieldSpec;
use crate::op::{LogicOp, Operation};
use crate::value::{word_mask, RegisterValue};

/// A memory-mapped register at a fixed address.
///
/// Register types are usually declared with [`register!`](crate::register!).
/// Each register is its own type, so fields and operations bound to it cannot
/// be mixed up with those of another register.
pub trait Register: Sized + 'static {
    /// The integer type the register holds.
    type Value: RegisterValue;

    /// The register's address. Distinct registers have distinct addresses.
    const ADDRESS: usize;

    /// A human-readable name, used in diagnostics.
    const NAME: &'static str;

    /// Returns a pointer to the register.
    ///
    /// The default points at [`ADDRESS`](Self::ADDRESS). Overriding it lets a
    /// register live in ordinary memory, which is how register maps are
    /// exercised off-target.
    fn ptr() -> *mut Self::Value {
        Self::ADDRESS as *mut Self::Value
    }
}

/// Which grouped access the dispatcher performs on a register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterAction {
    /// Overwrite the register with the combined value.
    #[default]
    Set,
    /// OR the combined value into the register.
    SetOr,
    /// Clear the bits of the combined value in the register.
    SetNand,
    /// Fold the operations over the register's current content.
    Modify,
}

/// A [`FieldSpec`] belonging to register `R`.
pub struct Field<R: Register> {
    spec: FieldSpec<R::Value>,
    _phantom: PhantomData<fn() -> R>,
}

impl<R: Register> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Register> Copy for Field<R> {}

impl<R: Register> PartialEq for Field<R> {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec
    }
}

impl<R: Register> Eq for Field<R> {}

impl<R: Register> Debug for Field<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Field")
            .field("register", &R::NAME)
            .field("position", &self.spec.position())
            .field("width", &self.spec.width())
            .finish()
    }
}

impl<R: Register> Field<R> {
    /// Creates a field of `width` bits starting at bit `position` of `R`.
    ///
    /// # Panics
    ///
    /// Panics if the field does not fit in `R::Value`, which is a compile
    /// error in a const context.
    #[must_use]
    pub const fn new(position: u32, width: u32) -> Self {
        Self::from_spec(FieldSpec::new(position, width))
    }

    /// Creates a single-bit field at bit `position` of `R`.
    #[must_use]
    pub const fn bit(position: u32) -> Self {
        Self::new(position, 1)
    }

    /// Binds an existing layout to `R`.
    #[must_use]
    pub const fn from_spec(spec: FieldSpec<R::Value>) -> Self {
        Self {
            spec,
            _phantom: PhantomData,
        }
    }

    /// The field's layout.
    #[inline(always)]
    #[must_use]
    pub const fn spec(self) -> FieldSpec<R::Value> {
        self.spec
    }

    /// The bits the field occupies.
    #[must_use]
    pub fn mask(self) -> R::Value {
        self.spec.mask()
    }

    /// An `Or` of the field's default value.
    #[must_use]
    pub const fn op(self) -> Op<R> {
        Op::from_operation(Operation::new(self.spec))
    }

    /// See [`Operation::and`].
    #[must_use]
    pub const fn and(self) -> Op<R> {
        self.op().and()
    }

    /// See [`Operation::or`].
    #[must_use]
    pub const fn or(self) -> Op<R> {
        self.op()
    }

    /// See [`Operation::nand`].
    #[must_use]
    pub const fn nand(self) -> Op<R> {
        self.op().nand()
    }

    /// See [`Operation::nor`].
    #[must_use]
    pub const fn nor(self) -> Op<R> {
        self.op().nor()
    }

    /// See [`Operation::xor`].
    #[must_use]
    pub const fn xor(self) -> Op<R> {
        self.op().xor()
    }

    /// See [`Operation::nxor`].
    #[must_use]
    pub const fn nxor(self) -> Op<R> {
        self.op().nxor()
    }

    /// An `Or` of a field-local literal.
    #[must_use]
    pub const fn with_value(self, literal: u64) -> Op<R> {
        self.op().with_value(literal)
    }

    /// An `Or` of a field-local value known only at runtime.
    #[must_use]
    pub fn with(self, value: R::Value) -> Op<R> {
        self.op().with(value)
    }

    /// The field's default operation with the register type forgotten.
    #[must_use]
    pub const fn erase(self) -> AnyOp {
        self.op().erase()
    }

    /// Extracts the field from a value read from `R`.
    #[must_use]
    pub fn get(self, value: R::Value) -> R::Value {
        (value & self.spec.mask()) >> self.spec.position() as usize
    }
}

/// An [`Operation`] belonging to register `R`.
///
/// A `[Op<R>]` slice holds operations for a single register, which is what
/// the typed [`Reg`](crate::access::Reg) primitives accept.
pub struct Op<R: Register> {
    operation: Operation<R::Value>,
    _phantom: PhantomData<fn() -> R>,
}

impl<R: Register> Clone for Op<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Register> Copy for Op<R> {}

impl<R: Register> PartialEq for Op<R> {
    fn eq(&self, other: &Self) -> bool {
        self.operation == other.operation
    }
}

impl<R: Register> Eq for Op<R> {}

impl<R: Register> Debug for Op<R> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Op")
            .field("register", &R::NAME)
            .field("operation", &self.operation)
            .finish()
    }
}

impl<R: Register> Op<R> {
    /// Binds an operation to `R`.
    #[must_use]
    pub const fn from_operation(operation: Operation<R::Value>) -> Self {
        Self {
            operation,
            _phantom: PhantomData,
        }
    }

    /// The unbound operation.
    #[inline(always)]
    #[must_use]
    pub const fn operation(self) -> Operation<R::Value> {
        self.operation
    }

    /// Replaces the operation kind.
    #[must_use]
    pub const fn with_kind(self, kind: LogicOp) -> Self {
        Self::from_operation(self.operation.with_kind(kind))
    }

    /// See [`Operation::and`].
    #[must_use]
    pub const fn and(self) -> Self {
        self.with_kind(LogicOp::And)
    }

    /// See [`Operation::or`].
    #[must_use]
    pub const fn or(self) -> Self {
        self.with_kind(LogicOp::Or)
    }

    /// See [`Operation::nand`].
    #[must_use]
    pub const fn nand(self) -> Self {
        self.with_kind(LogicOp::Nand)
    }

    /// See [`Operation::nor`].
    #[must_use]
    pub const fn nor(self) -> Self {
        self.with_kind(LogicOp::Nor)
    }

    /// See [`Operation::xor`].
    #[must_use]
    pub const fn xor(self) -> Self {
        self.with_kind(LogicOp::Xor)
    }

    /// See [`Operation::nxor`].
    #[must_use]
    pub const fn nxor(self) -> Self {
        self.with_kind(LogicOp::Nxor)
    }

    /// See [`Operation::with_value`].
    #[must_use]
    pub const fn with_value(self, literal: u64) -> Self {
        Self::from_operation(self.operation.with_value(literal))
    }

    /// See [`Operation::with`].
    #[must_use]
    pub fn with(self, value: R::Value) -> Self {
        Self::from_operation(self.operation.with(value))
    }

    /// Forgets the register type so the operation can share a list with
    /// operations on other registers.
    #[must_use]
    pub const fn erase(self) -> AnyOp {
        AnyOp {
            address: R::ADDRESS,
            bits: <R::Value as RegisterValue>::BITS,
            kind: self.operation.kind(),
            operand: self.operation.operand_word(),
        }
    }
}

impl<R: Register> From<Field<R>> for Op<R> {
    fn from(field: Field<R>) -> Self {
        field.op()
    }
}

impl<R: Register> From<Op<R>> for AnyOp {
    fn from(op: Op<R>) -> Self {
        op.erase()
    }
}

impl<R: Register> From<Field<R>> for AnyOp {
    fn from(field: Field<R>) -> Self {
        field.erase()
    }
}

/// An operation tagged with the address and width of the register it belongs
/// to.
///
/// This is the element type of the heterogeneous operation lists handed to
/// [`Dispatch`](crate::dispatch::Dispatch).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnyOp {
    address: usize,
    bits: u32,
    kind: LogicOp,
    operand: u64,
}

impl AnyOp {
    /// The address of the owning register.
    #[inline(always)]
    #[must_use]
    pub const fn address(self) -> usize {
        self.address
    }

    /// The bit width of the owning register.
    #[inline(always)]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.bits
    }

    /// The operation kind.
    #[inline(always)]
    #[must_use]
    pub const fn kind(self) -> LogicOp {
        self.kind
    }

    /// The operand, already positioned within the register.
    #[inline(always)]
    #[must_use]
    pub const fn operand_word(self) -> u64 {
        self.operand
    }

    /// Applies this operation to a running value, narrowed to the owning
    /// register's width.
    #[inline(always)]
    #[must_use]
    pub const fn apply_word(self, value: u64) -> u64 {
        self.kind.apply_word(value, self.operand) & word_mask(self.bits)
    }
}

/// Builds a `[AnyOp; N]` from operations and fields on any registers.
///
/// # Examples
///
/// ```
/// # use regbits::prelude::*;
/// register! {
///     /// Control.
///     pub struct Ctrl: u32 @ 0x4000_0000 {
///         /// Enable.
///         EN(0),
///     }
///     /// Status.
///     pub struct Status: u8 @ 0x4000_0004 {
///         /// Ready.
///         READY(7),
///     }
/// }
///
/// const OPS: [AnyOp; 2] = ops![Ctrl::EN.or(), Status::READY.nand()];
/// assert_eq!(OPS[0].address(), 0x4000_0000);
/// assert_eq!(OPS[1].address(), 0x4000_0004);
/// ```
#[macro_export]
macro_rules! ops {
    ($($op:expr),* $(,)?) => {
        [$(($op).erase()),*]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::combine;

    struct Ctrl;

    impl Register for Ctrl {
        type Value = u32;
        const ADDRESS: usize = 0x4000_1000;
        const NAME: &'static str = "CTRL";
    }

    const EN: Field<Ctrl> = Field::bit(0);
    const MODE: Field<Ctrl> = Field::new(2, 3);

    #[test]
    fn test_bound_ops_fold_like_unbound() {
        let ops = [EN.or(), MODE.with_value(0b101)];
        let value = combine(0, ops.iter().map(|op| &op.operation));
        assert_eq!(value, 0b10101);
    }

    #[test]
    fn test_erase_keeps_address_and_operand() {
        let op = MODE.with_value(0b101).xor().erase();
        assert_eq!(op.address(), Ctrl::ADDRESS);
        assert_eq!(op.bits(), 32);
        assert_eq!(op.kind(), LogicOp::Xor);
        assert_eq!(op.operand_word(), 0b10100);
        assert_eq!(op.apply_word(0b10100), 0);
    }

    #[test]
    fn test_erased_complement_is_narrowed() {
        let op = EN.nor().erase();
        assert_eq!(op.apply_word(0), 0xffff_fffe);
    }

    #[test]
    fn test_field_get() {
        assert_eq!(MODE.get(0b1_0101_00), 0b101);
        assert_eq!(EN.get(0b10), 0);
        assert_eq!(MODE.mask(), 0b11100);
    }

    #[test]
    fn test_debug_names_register() {
        assert_eq!(
            format!("{:?}", MODE),
            "Field { register: \"CTRL\", position: 2, width: 3 }",
        );
    }
}
