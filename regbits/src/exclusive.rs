use core::marker::PhantomData;

/// A token proving that no other execution context touches registers while
/// `'a` is live.
///
/// Read-modify-write sequences such as [`Reg::modify`](crate::access::Reg::modify)
/// read a register and write it back. If an interrupt handler, another core or
/// another thread writes the register in between, that update is lost. These
/// primitives therefore take an `Exclusive` token, which the caller obtains
/// once its own synchronization is in place: interrupts disabled, a lock
/// held, or a single-writer discipline.
#[derive(Clone, Copy)]
pub struct Exclusive<'a> {
    _phantom_lifetime: PhantomData<&'a ()>,
}

impl<'a> Exclusive<'a> {
    /// # Safety
    ///
    /// No other execution context may access the registers used with this
    /// token while `'a` is live.
    #[must_use]
    pub unsafe fn new_unchecked() -> Self {
        Self {
            _phantom_lifetime: PhantomData,
        }
    }
}

/// Runs a function exclusively.
///
/// `enter` establishes exclusion and `exit` ends it, for example by masking
/// and restoring interrupts. The token handed to `f` cannot outlive the call.
///
/// # Safety
///
/// Between `enter` returning and `exit` being called, no other execution
/// context may access the registers used with the token.
pub unsafe fn exclusive<S, T>(
    enter: impl FnOnce() -> S,
    exit: impl FnOnce(S),
    f: impl FnOnce(Exclusive) -> T,
) -> T {
    let state = enter();
    let result = f(Exclusive::new_unchecked());
    exit(state);
    result
}
