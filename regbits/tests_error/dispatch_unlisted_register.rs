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

const TARGETS: [Target; 1] = [Target::set::<A>()];
const OPS: [AnyOp; 2] = ops![A::X, B::Y];
#[allow(dead_code)]
const DISPATCH: Dispatch<'static> = Dispatch::new(&TARGETS, &OPS);

fn main() {}
