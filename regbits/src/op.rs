//! The operation algebra: folding field operations into one register value.
//!
//! An [`Operation`] pairs a [`FieldSpec`] with a [`LogicOp`] and a literal.
//! Its *operand* is the literal masked to the field and shifted into position;
//! with no literal the operand is the field's default, all ones within its
//! width. A sequence of operations folds strictly left to right, each step
//! consuming the previous step's output:
//!
//! | kind   | effect on the running value |
//! |--------|-----------------------------|
//! | `And`  | `value & operand`           |
//! | `Or`   | `value \| operand`          |
//! | `Nand` | `value & !operand`          |
//! | `Nor`  | `value \| !operand`         |
//! | `Xor`  | `value ^ operand`           |
//! | `Nxor` | `value ^ !operand`          |
//!
//! The fold is not commutative. Later operations override earlier ones where
//! their fields overlap.

use core::fmt::{self, Debug, Formatter};

use crate::field::FieldSpec;
use crate::value::{word_mask, RegisterValue};

/// How an operation combines its operand with the running value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicOp {
    /// `value & operand`
    And,
    /// `value | operand`
    #[default]
    Or,
    /// `value & !operand`
    Nand,
    /// `value | !operand`
    Nor,
    /// `value ^ operand`
    Xor,
    /// `value ^ !operand`
    Nxor,
}

impl LogicOp {
    /// Combines `operand` with `value`.
    ///
    /// Complemented operands set every bit above the register width; callers
    /// narrow the result to the register type.
    #[inline(always)]
    #[must_use]
    pub const fn apply_word(self, value: u64, operand: u64) -> u64 {
        match self {
            Self::And => value & operand,
            Self::Or => value | operand,
            Self::Nand => value & !operand,
            Self::Nor => value | !operand,
            Self::Xor => value ^ operand,
            Self::Nxor => value ^ !operand,
        }
    }

    /// Combines `operand` with `value` in the register type.
    #[inline(always)]
    #[must_use]
    pub fn apply<T: RegisterValue>(self, value: T, operand: T) -> T {
        T::from_word(self.apply_word(value.to_word(), operand.to_word()))
    }
}

/// A field tagged with a [`LogicOp`] and, optionally, a value.
pub struct Operation<T> {
    field: FieldSpec<T>,
    kind: LogicOp,
    literal: u64,
}

impl<T> Clone for Operation<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Operation<T> {}

impl<T> PartialEq for Operation<T> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.kind == other.kind && self.literal == other.literal
    }
}

impl<T> Eq for Operation<T> {}

impl<T> Debug for Operation<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Operation")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("literal", &self.literal)
            .finish()
    }
}

impl<T: RegisterValue> Operation<T> {
    /// An `Or` of the field's default value.
    #[must_use]
    pub const fn new(field: FieldSpec<T>) -> Self {
        Self {
            field,
            kind: LogicOp::Or,
            literal: field.max_word(),
        }
    }

    /// The field this operation targets.
    #[inline(always)]
    #[must_use]
    pub const fn field(self) -> FieldSpec<T> {
        self.field
    }

    /// The operation kind.
    #[inline(always)]
    #[must_use]
    pub const fn kind(self) -> LogicOp {
        self.kind
    }

    /// Replaces the operation kind.
    #[must_use]
    pub const fn with_kind(self, kind: LogicOp) -> Self {
        Self { kind, ..self }
    }

    /// Tags the operation with [`LogicOp::And`].
    #[must_use]
    pub const fn and(self) -> Self {
        self.with_kind(LogicOp::And)
    }

    /// Tags the operation with [`LogicOp::Or`].
    #[must_use]
    pub const fn or(self) -> Self {
        self.with_kind(LogicOp::Or)
    }

    /// Tags the operation with [`LogicOp::Nand`].
    #[must_use]
    pub const fn nand(self) -> Self {
        self.with_kind(LogicOp::Nand)
    }

    /// Tags the operation with [`LogicOp::Nor`].
    #[must_use]
    pub const fn nor(self) -> Self {
        self.with_kind(LogicOp::Nor)
    }

    /// Tags the operation with [`LogicOp::Xor`].
    #[must_use]
    pub const fn xor(self) -> Self {
        self.with_kind(LogicOp::Xor)
    }

    /// Tags the operation with [`LogicOp::Nxor`].
    #[must_use]
    pub const fn nxor(self) -> Self {
        self.with_kind(LogicOp::Nxor)
    }

    /// Rebinds the operation to a field-local literal. Bits of `literal`
    /// beyond the field's width are ignored.
    #[must_use]
    pub const fn with_value(self, literal: u64) -> Self {
        Self {
            literal: literal & self.field.max_word(),
            ..self
        }
    }

    /// Rebinds the operation to a field-local value known only at runtime.
    #[must_use]
    pub fn with(self, value: T) -> Self {
        self.with_value(value.to_word())
    }

    /// The operand as a word: the literal masked and shifted into position.
    #[inline(always)]
    #[must_use]
    pub const fn operand_word(self) -> u64 {
        self.field.value_word(self.literal)
    }

    /// The operand: the literal masked and shifted into position.
    #[inline(always)]
    #[must_use]
    pub fn operand(self) -> T {
        T::from_word(self.operand_word())
    }

    /// Applies this operation to a running value.
    #[inline(always)]
    #[must_use]
    pub fn apply(self, value: T) -> T {
        T::from_word(self.kind.apply_word(value.to_word(), self.operand_word()))
    }
}

impl<T: RegisterValue> From<FieldSpec<T>> for Operation<T> {
    fn from(field: FieldSpec<T>) -> Self {
        Self::new(field)
    }
}

/// Folds `ops` over `start` at compile time.
///
/// Only the low `T::BITS` bits of `start` are used and the result is narrowed
/// to `T::BITS` bits, so it converts to `T` with a plain `as` cast.
///
/// ```
/// # use regbits::prelude::*;
/// const MODE: FieldSpec<u32> = FieldSpec::new(2, 3);
/// const ENABLE: FieldSpec<u32> = FieldSpec::bit(0);
/// const CTRL: u32 = combine_word(
///     0,
///     &[Operation::new(ENABLE), Operation::new(MODE).with_value(0b101)],
/// ) as u32;
/// assert_eq!(CTRL, 0b10101);
/// ```
#[must_use]
pub const fn combine_word<T: RegisterValue>(start: u64, ops: &[Operation<T>]) -> u64 {
    let mask = word_mask(<T as RegisterValue>::BITS);
    let mut value = start & mask;
    let mut i = 0;
    while i < ops.len() {
        value = ops[i].kind.apply_word(value, ops[i].operand_word()) & mask;
        i += 1;
    }
    value
}

/// Folds `ops` over a live `start` value, for example the current content of
/// a register.
#[must_use]
pub fn combine<'a, T: RegisterValue>(
    start: T,
    ops: impl IntoIterator<Item = &'a Operation<T>>,
) -> T {
    ops.into_iter().fold(start, |value, op| op.apply(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit(position: u32) -> Operation<u32> {
        Operation::new(FieldSpec::bit(position))
    }

    #[test]
    fn test_single_or() {
        assert_eq!(combine_word(0, &[bit(0).or()]), 0b1);
        assert_eq!(combine(0, &[bit(0)]), 0b1);
    }

    #[test]
    fn test_xor_with_value_cancels() {
        let op = Operation::new(FieldSpec::<u32>::new(2, 3)).with_value(0b101).xor();
        assert_eq!(combine(0b10100, &[op]), 0);
    }

    #[test]
    fn test_nand_then_or() {
        let ops = [
            Operation::new(FieldSpec::<u32>::new(0, 2)).nand(),
            bit(2).or(),
        ];
        assert_eq!(combine(0b11011, &ops), 0b11100);
        assert_eq!(combine_word(0b11011, &ops), 0b11100);
    }

    #[test]
    fn test_default_kind_is_or() {
        let ops = [bit(0), Operation::new(FieldSpec::new(2, 3)), bit(1)];
        assert_eq!(combine(0, &ops), 0b11111);
        assert_eq!(LogicOp::default(), LogicOp::Or);
    }

    #[test]
    fn test_fold_is_order_sensitive() {
        let wide = Operation::new(FieldSpec::<u32>::new(0, 4));
        let narrow = Operation::new(FieldSpec::<u32>::new(1, 2));
        let forward = combine(0, &[wide.or(), narrow.nand()]);
        let backward = combine(0, &[narrow.nand(), wide.or()]);
        assert_eq!(forward, 0b1001);
        assert_eq!(backward, 0b1111);
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_complemented_kinds_stay_in_width() {
        let op = Operation::new(FieldSpec::<u8>::bit(0));
        assert_eq!(combine(0u8, &[op.nor()]), 0b1111_1110);
        assert_eq!(combine(0u8, &[op.nxor()]), 0b1111_1110);
        assert_eq!(combine_word(0, &[op.nor()]), 0b1111_1110);
        assert_eq!(combine(0xffu8, &[op.and()]), 0b1);
    }

    #[test]
    fn test_runtime_value() {
        let value = core::hint::black_box(0b11u32);
        let op = Operation::new(FieldSpec::<u32>::new(4, 2)).with(value);
        assert_eq!(op.operand(), 0b11_0000);
        // Out-of-range bits are dropped.
        let op = op.with(0b111);
        assert_eq!(op.operand(), 0b11_0000);
    }

    #[test]
    fn test_combine_word_in_const() {
        const OPS: [Operation<u16>; 2] = [
            Operation::new(FieldSpec::bit(15)),
            Operation::new(FieldSpec::new(0, 8)).with_value(0x5a),
        ];
        const VALUE: u16 = combine_word(0, &OPS) as u16;
        assert_eq!(VALUE, 0x805a);
    }
}
