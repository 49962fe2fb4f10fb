use regbits::prelude::*;

register! {
    /// A.
    pub struct A: u32 @ 0x1000 {
        /// X.
        X(0),
    }

    /// B.
    pub struct B: u32 @ 0x1004 {
        /// Y.
        Y(0),
    }
}

fn main() {
    let root = unsafe { PermissionRoot::new_unchecked() };
    Reg::<A>::new(root).set(&[A::X.or(), B::Y.or()]);
}
