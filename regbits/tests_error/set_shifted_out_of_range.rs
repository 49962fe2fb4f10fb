use regbits::prelude::*;

register! {
    /// Control.
    pub struct Ctrl: u32 @ 0x4000_0000 {
        /// Enable.
        EN(0),
    }
}

fn main() {
    let root = unsafe { PermissionRoot::new_unchecked() };
    Reg::<Ctrl>::new(root).set_shifted::<32>(&[Ctrl::EN.or()]);
}
