use crate::access::Reg;
use crate::register::Register;

/// Proof that the holder may touch memory-mapped registers.
///
/// Every [`Reg`] and every
/// [`Dispatch::run`](crate::dispatch::Dispatch::run) needs one. Minting a root
/// is the single unsafe step of register access; the root is `Copy`, and
/// everything derived from it is safe.
///
/// ```no_run
/// # use regbits::prelude::*;
/// register! {
///     /// GPIO output data.
///     pub struct GpioOut: u32 @ 0x5000_0504 {
///         /// LED pin.
///         LED(13),
///     }
/// }
///
/// // SAFETY: Called once at startup, on a part where `GpioOut` is mapped.
/// let root = unsafe { PermissionRoot::new_unchecked() };
/// root.reg::<GpioOut>().set(&[GpioOut::LED.or()]);
/// assert_eq!(Reg::<GpioOut>::new(root).get_and(&[GpioOut::LED.or()]), 1 << 13);
/// ```
#[derive(Clone, Copy)]
pub struct PermissionRoot {
    _private: (),
}

impl PermissionRoot {
    /// # Safety
    ///
    /// This function is marked unsafe to make calls noisy. Call it only from
    /// the start of `main` or an interrupt handler, and only on a target where
    /// every register reachable through it is mapped at its declared address.
    #[must_use]
    pub unsafe fn new_unchecked() -> Self {
        Self { _private: () }
    }

    /// Access to register `R`. Same as [`Reg::new`].
    #[inline(always)]
    #[must_use]
    pub fn reg<'a, R: Register>(self) -> Reg<'a, R> {
        Reg::new(self)
    }
}
