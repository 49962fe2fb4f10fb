//! Bit-field layouts and the masks derived from them.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;

use crate::value::{word_mask, RegisterValue};
use crate::LayoutError;

/// The bits `[position, position + width)` of a `T`.
///
/// A layout is fixed once constructed. [`FieldSpec::new`] rejects layouts that
/// do not fit in `T`; when it is evaluated in a const context, as it is for
/// every field declared with [`register!`](crate::register!), a bad layout is a
/// compile error.
///
/// ```compile_fail
/// # use regbits::prelude::*;
/// // Bits 6..9 do not fit in a `u8`.
/// const BAD: FieldSpec<u8> = FieldSpec::new(6, 3);
/// let _ = BAD;
/// ```
pub struct FieldSpec<T> {
    position: u32,
    width: u32,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> PartialEq for FieldSpec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position && self.width == other.width
    }
}

impl<T> Eq for FieldSpec<T> {}

impl<T> Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("position", &self.position)
            .field("width", &self.width)
            .finish()
    }
}

impl<T: RegisterValue> FieldSpec<T> {
    /// Creates a field of `width` bits starting at bit `position`.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero or the field extends past the top bit of `T`.
    /// In a const context the panic is a compile error.
    #[must_use]
    pub const fn new(position: u32, width: u32) -> Self {
        match Self::try_new(position, width) {
            Ok(spec) => spec,
            Err(LayoutError::ZeroWidth) => panic!("bit field must be at least one bit wide"),
            Err(LayoutError::Overflow { .. }) => panic!("bit field overflows its register"),
        }
    }

    /// Creates a single-bit field at bit `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is not a bit of `T`.
    #[must_use]
    pub const fn bit(position: u32) -> Self {
        Self::new(position, 1)
    }

    /// Creates a field spanning every bit of `T`.
    #[must_use]
    pub const fn full() -> Self {
        Self::new(0, <T as RegisterValue>::BITS)
    }

    /// Creates a field, or reports why the layout does not fit in `T`.
    ///
    /// This is the constructor to use when a layout is only known at startup.
    pub const fn try_new(position: u32, width: u32) -> Result<Self, LayoutError> {
        if width == 0 {
            return Err(LayoutError::ZeroWidth);
        }
        let bits = <T as RegisterValue>::BITS;
        if width > bits || position > bits - width {
            return Err(LayoutError::Overflow {
                position,
                width,
                bits,
            });
        }
        Ok(Self {
            position,
            width,
            _phantom: PhantomData,
        })
    }

    /// The index of the field's least significant bit.
    #[inline(always)]
    #[must_use]
    pub const fn position(self) -> u32 {
        self.position
    }

    /// The number of bits in the field.
    #[inline(always)]
    #[must_use]
    pub const fn width(self) -> u32 {
        self.width
    }

    /// Whether the field is a single bit.
    #[inline(always)]
    #[must_use]
    pub const fn is_single_bit(self) -> bool {
        self.width == 1
    }

    /// Whether the field spans the whole of `T`.
    #[inline(always)]
    #[must_use]
    pub const fn is_full_width(self) -> bool {
        self.width == <T as RegisterValue>::BITS
    }

    /// The largest field-local value, `2^width - 1`. This is also the
    /// field's default value.
    #[inline(always)]
    #[must_use]
    pub const fn max_word(self) -> u64 {
        word_mask(self.width)
    }

    /// The bits the field occupies, as a word.
    #[inline(always)]
    #[must_use]
    pub const fn mask_word(self) -> u64 {
        self.max_word() << self.position
    }

    /// A field-local literal masked to the field's width and shifted into
    /// position, as a word.
    #[inline(always)]
    #[must_use]
    pub const fn value_word(self, literal: u64) -> u64 {
        (literal & self.max_word()) << self.position
    }

    /// The bits the field occupies.
    #[inline(always)]
    #[must_use]
    pub fn mask(self) -> T {
        T::from_word(self.mask_word())
    }

    /// A field-local value masked to the field's width and shifted into
    /// position.
    #[inline(always)]
    #[must_use]
    pub fn value(self, literal: T) -> T {
        T::from_word(self.value_word(literal.to_word()))
    }

    /// The mask and the default (all-ones) value of the field.
    #[must_use]
    pub fn mask_value(self) -> MaskValue<T> {
        MaskValue {
            mask: self.mask(),
            value: T::from_word(self.value_word(self.max_word())),
        }
    }

    /// The mask and value of the field holding `literal`.
    ///
    /// The layout itself is unchanged; only the value is rebound.
    #[must_use]
    pub fn with_value(self, literal: T) -> MaskValue<T> {
        MaskValue {
            mask: self.mask(),
            value: self.value(literal),
        }
    }
}

/// A field's mask together with a value positioned inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaskValue<T> {
    /// The bits the field occupies.
    pub mask: T,
    /// The field value, already shifted into position. No bit outside
    /// [`mask`](Self::mask) is set.
    pub value: T,
}
