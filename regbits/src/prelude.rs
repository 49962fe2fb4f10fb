//! Convenience re-exports.

#[doc(no_inline)]
pub use crate::{
    ops, register, register_array, AnyOp, Field, FieldSpec, MaskValue, Op, PermissionRoot, Reg,
    Register, RegisterAction, RegisterValue,
};

#[doc(no_inline)]
pub use crate::bit_field::{apply_all, defaults, get_all, BitField, FieldAction};
#[doc(no_inline)]
pub use crate::dispatch::{Dispatch, DispatchError, Target};
#[doc(no_inline)]
pub use crate::exclusive::{exclusive, Exclusive};
#[doc(no_inline)]
pub use crate::op::{combine, combine_word, LogicOp, Operation};
