/// Declares register types and their fields.
///
/// Each register becomes a unit struct implementing [`Register`](crate::Register),
/// with its fields as associated [`Field`](crate::Field) consts. A field is
/// written `NAME(position)` for a single bit or `NAME(position, width)`.
///
/// Every field layout is evaluated where the register is declared, so a field
/// that does not fit in the register fails the build even if it is never used.
///
/// # Examples
///
/// ```
/// # use regbits::prelude::*;
/// register! {
///     /// Timer control.
///     pub struct TimerCtrl: u32 @ 0x4000_0c00 {
///         /// Starts the counter.
///         START(0),
///         /// Prescaler select.
///         PRESCALE(4, 3),
///     }
/// }
///
/// assert_eq!(TimerCtrl::ADDRESS, 0x4000_0c00);
/// assert_eq!(TimerCtrl::PRESCALE.mask(), 0b111_0000);
/// ```
///
/// ```compile_fail
/// # use regbits::prelude::*;
/// register! {
///     /// Too narrow for its fields.
///     pub struct Narrow: u8 @ 0x4000_0000 {
///         /// Bits 6..9.
///         WIDE(6, 3),
///     }
/// }
/// ```
#[macro_export]
macro_rules! register {
    (@field $position:expr, $width:expr) => {
        $crate::Field::new($position, $width)
    };
    (@field $position:expr) => {
        $crate::Field::bit($position)
    };
    (@impl
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $value:ident @ ($address:expr) {
            $(
                $(#[$field_meta:meta])*
                $field:ident ($($layout:tt)*)
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug)]
        $vis struct $name;

        impl $crate::Register for $name {
            type Value = $value;
            const ADDRESS: usize = $address;
            const NAME: &'static str = stringify!($name);
        }

        #[allow(dead_code)]
        impl $name {
            $(
                $(#[$field_meta])*
                pub const $field: $crate::Field<$name> = $crate::register!(@field $($layout)*);
            )*
        }

        const _: () = {
            $(let _ = $name::$field;)*
        };
    };
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $name:ident: $value:ident @ $address:literal {
            $($fields:tt)*
        }
    )*) => {$(
        $crate::register! {
            @impl
            $(#[$meta])*
            $vis struct $name: $value @ ($address) { $($fields)* }
        }
    )*};
}

/// Declares `COUNT` registers with the same layout at evenly spaced
/// addresses.
///
/// `struct Name[COUNT]: u32 @ BASE, stride STRIDE { ... }` declares `Name0`
/// at `BASE`, `Name1` at `BASE + STRIDE`, and so on, each with the fields
/// given in the same syntax as [`register!`](crate::register!).
///
/// # Examples
///
/// ```
/// # use regbits::prelude::*;
/// register_array! {
///     /// DMA channel configuration.
///     pub struct DmaCfg[4]: u32 @ 0x4002_0008, stride 0x14 {
///         /// Channel enable.
///         EN(0),
///         /// Channel priority.
///         PRIORITY(12, 2),
///     }
/// }
///
/// assert_eq!(DmaCfg0::ADDRESS, 0x4002_0008);
/// assert_eq!(DmaCfg3::ADDRESS, 0x4002_0008 + 3 * 0x14);
/// assert_eq!(DmaCfg2::NAME, "DmaCfg2");
/// ```
#[macro_export]
macro_rules! register_array {
    (
        $(#[$($attr:tt)*])*
        $vis:vis struct $name:ident[$count:literal]: $value:ident @ $base:literal, stride $stride:literal {
            $($fields:tt)*
        }
    ) => {
        $crate::__private::seq!(N in 0..$count {
            $crate::__private::paste! {
                $crate::register! {
                    @impl
                    $(#[$($attr)*])*
                    $vis struct [<$name N>]: $value @ ($base + N * $stride) { $($fields)* }
                }
            }
        });
    };
}
