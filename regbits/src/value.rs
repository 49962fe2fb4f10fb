//! Integer types that can back a register.

use core::fmt::Debug;
use core::hash::Hash;

use num_traits::PrimInt;
use seq_macro::seq;

use crate::sealed::Sealed;

/// Returns the all-ones word for a register that is `bits` wide.
#[inline(always)]
#[must_use]
pub const fn word_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Unsigned integer types a register can hold.
///
/// There is one implementation for each of `u8`, `u16`, `u32` and `u64`. All
/// field arithmetic is carried out on a `u64` word and narrowed with
/// [`from_word`](Self::from_word), which keeps the `const fn` paths of this
/// crate independent of the concrete register type.
pub trait RegisterValue: PrimInt + Debug + Hash + Default + Send + Sync + Sealed + 'static {
    /// The bit width of this type.
    const BITS: u32;
    /// The value with no bits set.
    const ZERO: Self;
    /// The value with every bit set.
    const ONES: Self;

    /// Narrows a word to this type by discarding the upper bits.
    fn from_word(word: u64) -> Self;

    /// Widens the value to a word.
    ///
    /// This conversion is lossless.
    fn to_word(self) -> u64;
}

macro_rules! impl_register_value {
    ($($primitive:ident),*) => {$(
        impl Sealed for $primitive {}

        impl RegisterValue for $primitive {
            const BITS: u32 = $primitive::BITS;
            const ZERO: Self = 0;
            const ONES: Self = $primitive::MAX;

            #[inline(always)]
            fn from_word(word: u64) -> Self {
                word as $primitive
            }

            #[inline(always)]
            fn to_word(self) -> u64 {
                self as u64
            }
        }
    )*};
}
impl_register_value!(u8, u16, u32, u64);

/// A shift amount of `N` bits, lifted into a type.
pub struct Shift<const N: u32>;

/// Implemented for every [`Shift`] less than the bit width of `T`.
#[diagnostic::on_unimplemented(
    message = "shift amount is not less than the register width",
    label = "shift out of range"
)]
pub trait ShiftBelow<T: RegisterValue>: Sealed {}

impl<const N: u32> Sealed for Shift<N> {}

seq!(N in 0..8 { impl ShiftBelow<u8> for Shift<N> {} });
seq!(N in 0..16 { impl ShiftBelow<u16> for Shift<N> {} });
seq!(N in 0..32 { impl ShiftBelow<u32> for Shift<N> {} });
seq!(N in 0..64 { impl ShiftBelow<u64> for Shift<N> {} });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_mask() {
        assert_eq!(word_mask(0), 0);
        assert_eq!(word_mask(1), 0b1);
        assert_eq!(word_mask(8), 0xff);
        assert_eq!(word_mask(32), 0xffff_ffff);
        assert_eq!(word_mask(64), u64::MAX);
    }

    #[test]
    fn test_narrowing_discards_upper_bits() {
        assert_eq!(u8::from_word(0x1234), 0x34);
        assert_eq!(u16::from_word(0xdead_beef), 0xbeef);
        assert_eq!(u32::from_word(u64::MAX), u32::MAX);
        assert_eq!(u64::from_word(u64::MAX), u64::MAX);
    }

    fn shift_below<T: RegisterValue, const N: u32>() -> u32
    where
        Shift<N>: ShiftBelow<T>,
    {
        N
    }

    #[test]
    fn test_shift_bounds() {
        assert_eq!(shift_below::<u8, 7>(), 7);
        assert_eq!(shift_below::<u16, 15>(), 15);
        assert_eq!(shift_below::<u32, 0>(), 0);
        assert_eq!(shift_below::<u64, 63>(), 63);
    }

    #[test]
    fn test_constants() {
        assert_eq!(<u8 as RegisterValue>::BITS, 8);
        assert_eq!(<u16 as RegisterValue>::ONES, 0xffff);
        assert_eq!(<u32 as RegisterValue>::ZERO, 0);
        assert_eq!(0xabu8.to_word(), 0xab);
    }
}
