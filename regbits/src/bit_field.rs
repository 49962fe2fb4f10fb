//! Fields carrying a value only known at runtime, applied to plain integers.
//!
//! A [`BitField`] is built at the call site, used against a caller-held value
//! and dropped. It never touches a register by itself; combine it with
//! [`Reg::update`](crate::access::Reg::update) to apply it in one
//! read-modify-write.

use crate::field::FieldSpec;
use crate::value::RegisterValue;

/// A field layout together with a field-local value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitField<T: RegisterValue> {
    spec: FieldSpec<T>,
    value: T,
}

impl<T: RegisterValue> BitField<T> {
    /// A field holding its default value, all ones within its width.
    #[must_use]
    pub fn new(spec: FieldSpec<T>) -> Self {
        Self {
            spec,
            value: T::from_word(spec.max_word()),
        }
    }

    /// A field holding `value`, masked to the field's width.
    #[must_use]
    pub fn with_value(spec: FieldSpec<T>, value: T) -> Self {
        Self {
            spec,
            value: T::from_word(value.to_word() & spec.max_word()),
        }
    }

    /// The field's layout.
    #[inline(always)]
    #[must_use]
    pub fn spec(&self) -> FieldSpec<T> {
        self.spec
    }

    /// The stored field-local value.
    #[inline(always)]
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }

    fn positioned(&self) -> T {
        self.value << self.spec.position() as usize
    }

    /// Replaces the field's bits in `input` with the stored value.
    #[must_use]
    pub fn set(&self, input: T) -> T {
        (input & !self.spec.mask()) | self.positioned()
    }

    /// Clears the field's bits in `input`.
    #[must_use]
    pub fn clear(&self, input: T) -> T {
        input & !self.spec.mask()
    }

    /// Toggles the field in `input`.
    ///
    /// A single-bit field flips when its stored value is one. A wider field
    /// has no single "other" state, so the stored value is written, as with
    /// [`set`](Self::set). A field spanning all of `T` is a wider field too:
    /// toggling it writes the stored value rather than `input ^ !value`.
    #[must_use]
    pub fn toggle(&self, input: T) -> T {
        if self.spec.is_single_bit() {
            input ^ self.positioned()
        } else {
            self.set(input)
        }
    }

    /// Extracts the field from `input` as a value in `[0, 2^width)`.
    ///
    /// `Ret` should be at least as wide as the field; wider fields are
    /// truncated.
    #[must_use]
    pub fn get<Ret: RegisterValue>(&self, input: T) -> Ret {
        Ret::from_word((input.to_word() & self.spec.mask_word()) >> self.spec.position())
    }
}

impl<T: RegisterValue> From<FieldSpec<T>> for BitField<T> {
    fn from(spec: FieldSpec<T>) -> Self {
        Self::new(spec)
    }
}

/// A runtime bit-field operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldAction<T: RegisterValue> {
    /// [`BitField::set`]
    Set(BitField<T>),
    /// [`BitField::clear`]
    Clear(BitField<T>),
    /// [`BitField::toggle`]
    Toggle(BitField<T>),
}

impl<T: RegisterValue> FieldAction<T> {
    /// Applies the action to `input`.
    #[must_use]
    pub fn apply(&self, input: T) -> T {
        match self {
            Self::Set(field) => field.set(input),
            Self::Clear(field) => field.clear(input),
            Self::Toggle(field) => field.toggle(input),
        }
    }
}

impl<T: RegisterValue> From<BitField<T>> for FieldAction<T> {
    fn from(field: BitField<T>) -> Self {
        Self::Set(field)
    }
}

/// Applies `actions` to `input` left to right.
#[must_use]
pub fn apply_all<T: RegisterValue>(input: T, actions: &[FieldAction<T>]) -> T {
    actions.iter().fold(input, |value, action| action.apply(value))
}

/// The OR of the default values of `fields`.
#[must_use]
pub fn defaults<T: RegisterValue>(fields: &[FieldSpec<T>]) -> T {
    fields
        .iter()
        .fold(<T as RegisterValue>::ZERO, |value, spec| value | BitField::new(*spec).positioned())
}

/// Extracts several fields from `input` at once.
#[must_use]
pub fn get_all<T: RegisterValue, const N: usize>(input: T, fields: [FieldSpec<T>; N]) -> [T; N] {
    fields.map(|spec| BitField::new(spec).get(input))
}
