use regbits::prelude::*;

// Bits 6..9 do not fit in a `u8`.
#[allow(dead_code)]
const BAD: FieldSpec<u8> = FieldSpec::new(6, 3);

fn main() {}
