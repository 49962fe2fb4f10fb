use regbits::prelude::*;

register! {
    /// UART control.
    pub struct UartCtrl: u32 @ 0x4000_1000 {
        /// Transmitter enable.
        TXEN(0),
        /// Receiver enable.
        RXEN(1),
        /// Parity mode.
        PARITY(2, 2),
        /// Baud divisor.
        DIV(16, 16),
    }

    /// UART status.
    struct UartStatus: u8 @ 0x4000_1004 {
        /// Transmit buffer empty.
        TXE(7),
    }
}

register_array! {
    /// Timer compare.
    pub struct Compare[3]: u16 @ 0x4000_2000, stride 0x2 {
        /// Compare value.
        VALUE(0, 12),
        /// Interrupt enable.
        IE(15),
    }
}

#[test]
fn test_register_constants() {
    assert_eq!(UartCtrl::ADDRESS, 0x4000_1000);
    assert_eq!(UartCtrl::NAME, "UartCtrl");
    assert_eq!(UartStatus::ADDRESS, 0x4000_1004);
    assert_eq!(UartStatus::NAME, "UartStatus");
}

#[test]
fn test_field_layouts() {
    assert_eq!(UartCtrl::TXEN.mask(), 0b1);
    assert_eq!(UartCtrl::RXEN.mask(), 0b10);
    assert_eq!(UartCtrl::PARITY.mask(), 0b1100);
    assert_eq!(UartCtrl::DIV.mask(), 0xffff_0000);
    assert_eq!(UartStatus::TXE.mask(), 0x80);

    assert!(UartCtrl::TXEN.spec().is_single_bit());
    assert_eq!(UartCtrl::PARITY.spec().position(), 2);
    assert_eq!(UartCtrl::PARITY.spec().width(), 2);
}

#[test]
fn test_field_get() {
    let value: u32 = 0x0068_000d;
    assert_eq!(UartCtrl::DIV.get(value), 0x68);
    assert_eq!(UartCtrl::PARITY.get(value), 0b11);
    assert_eq!(UartCtrl::RXEN.get(value), 0);
}

#[test]
fn test_register_array() {
    assert_eq!(Compare0::ADDRESS, 0x4000_2000);
    assert_eq!(Compare1::ADDRESS, 0x4000_2002);
    assert_eq!(Compare2::ADDRESS, 0x4000_2004);
    assert_eq!(Compare1::NAME, "Compare1");
    assert_eq!(Compare2::VALUE.mask(), 0x0fff);
    assert_eq!(Compare0::IE.mask(), 0x8000);
}

#[test]
fn test_operations_fold_in_const_context() {
    const ENABLE: [Op<UartCtrl>; 3] = [
        UartCtrl::TXEN.op(),
        UartCtrl::RXEN.op(),
        UartCtrl::DIV.with_value(0x68),
    ];
    const WORD: u64 = combine_word(0, &[
        ENABLE[0].operation(),
        ENABLE[1].operation(),
        ENABLE[2].operation(),
    ]);
    assert_eq!(WORD, 0x0068_0003);
    let ops: Vec<_> = ENABLE.iter().map(|op| op.operation()).collect();
    assert_eq!(combine(0u32, &ops), 0x0068_0003);
}

#[test]
fn test_erased_ops_across_registers() {
    const OPS: [AnyOp; 3] = ops![UartCtrl::TXEN, UartStatus::TXE.nand(), Compare1::IE];
    assert_eq!(OPS[0].address(), UartCtrl::ADDRESS);
    assert_eq!(OPS[1].address(), UartStatus::ADDRESS);
    assert_eq!(OPS[1].kind(), LogicOp::Nand);
    assert_eq!(OPS[1].apply_word(0xff), 0x7f);
    assert_eq!(OPS[2].operand_word(), 0x8000);
}

#[test]
fn test_bit_fields_on_declared_layouts() {
    let parity = BitField::with_value(UartCtrl::PARITY.spec(), 0b01);
    let value = FieldAction::Set(parity).apply(0xffff_ffff);
    assert_eq!(value, 0xffff_fff7);
    assert_eq!(UartCtrl::PARITY.get(value), 0b01);
    assert_eq!(
        defaults(&[UartCtrl::TXEN.spec(), UartCtrl::PARITY.spec()]),
        0b1101,
    );
}
