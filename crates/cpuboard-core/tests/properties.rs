//! Property coverage for flag arithmetic, rotation, decode robustness and
//! precise faults.

use cpuboard_core::{
    CpuBoard, Decoder, FaultCode, Register, StepOutcome, FLAG_C, FLAG_V, MEMORY_WORDS,
};
use proptest::prelude::*;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;
use tracing as _;

fn board_with(program: &[u8]) -> CpuBoard {
    let mut board = CpuBoard::default();
    board.load(0x000, program);
    board
}

proptest! {
    #[test]
    fn add_sets_flags_from_unsigned_and_signed_sums(a in any::<u8>(), b in any::<u8>()) {
        let mut board = board_with(&[0xB2, b]);
        board.arch.set_acc(a);

        prop_assert_eq!(board.step(), StepOutcome::Continue);

        let sum = a.wrapping_add(b);
        let signed = i16::from(a as i8) + i16::from(b as i8);
        prop_assert_eq!(board.arch.acc(), sum);
        prop_assert_eq!(board.arch.carry(), u16::from(a) + u16::from(b) > 0xFF);
        prop_assert_eq!(board.arch.zero(), sum == 0);
        prop_assert_eq!(board.arch.negative(), sum & 0x80 != 0);
        prop_assert_eq!(board.arch.overflow(), i8::try_from(signed).is_err());
    }

    #[test]
    fn cmp_matches_sub_flags_and_keeps_register(
        a in any::<u8>(),
        b in any::<u8>(),
        flags in 0_u8..16,
    ) {
        let mut sub = board_with(&[0xA2, b]);
        sub.arch.set_acc(a);
        sub.arch.set_flags(flags);
        let mut cmp = board_with(&[0xF2, b]);
        cmp.arch.set_acc(a);
        cmp.arch.set_flags(flags);

        sub.step();
        cmp.step();

        prop_assert_eq!(sub.arch.flags(), cmp.arch.flags());
        prop_assert_eq!(sub.arch.acc(), a.wrapping_sub(b));
        prop_assert_eq!(cmp.arch.acc(), a);
        prop_assert_eq!(sub.arch.carry(), a < b);
    }

    #[test]
    fn eight_rotations_restore_value_and_carry(value in any::<u8>(), overflow in any::<bool>()) {
        let mut board = board_with(&[0x4B; 8]);
        board.arch.set_ix(value);
        board.arch.set_flag(FLAG_C, value & 0x01 != 0);
        board.arch.set_flag(FLAG_V, overflow);
        let flags_before = board.arch.flags();

        for _ in 0..8 {
            prop_assert_eq!(board.step(), StepOutcome::Continue);
            prop_assert_eq!(board.arch.carry(), board.arch.ix() & 0x01 != 0);
        }

        prop_assert_eq!(board.arch.ix(), value);
        prop_assert_eq!(board.arch.carry(), value & 0x01 != 0);
        prop_assert_eq!(board.arch.overflow(), flags_before & FLAG_V != 0);
    }

    #[test]
    fn decode_robustness_over_arbitrary_words(word in any::<u8>()) {
        let decoded = Decoder::decode(word);
        if let Some(code) = decoded.fault() {
            prop_assert_eq!(code, FaultCode::UnknownInstruction);
        } else {
            let words = decoded.instruction().map(|d| d.words());
            prop_assert!(matches!(words, Some(1 | 2)));
        }
    }

    #[test]
    fn store_then_load_returns_stored_value(
        value in any::<u8>(),
        ix in any::<u8>(),
        displacement in any::<u8>(),
        mode in prop::sample::select(vec![0b100_u8, 0b101, 0b110, 0b111]),
    ) {
        let indexed = mode & 0b010 != 0;
        let low = if indexed { ix.wrapping_add(displacement) } else { displacement };
        let in_program = mode & 0b001 == 0;
        prop_assume!(!in_program || low >= 4);

        let mut board = board_with(&[0x70 | mode, displacement, 0x60 | mode, displacement]);
        board.arch.set_acc(value);
        board.arch.set_ix(ix);

        board.step();
        board.arch.set_acc(!value);
        board.step();

        prop_assert_eq!(board.arch.reg(Register::Acc), value);
    }

    #[test]
    fn faults_never_touch_architectural_data(
        image in proptest::collection::vec(any::<u8>(), MEMORY_WORDS),
        acc in any::<u8>(),
        ix in any::<u8>(),
        flags in 0_u8..16,
        pc in any::<u8>(),
    ) {
        let mut board = CpuBoard::default();
        board.load(0x000, &image);
        board.arch.set_acc(acc);
        board.arch.set_ix(ix);
        board.arch.set_flags(flags);
        board.arch.set_pc(pc);
        let before = board.clone();

        let outcome = board.step();
        if let StepOutcome::Fault { pc: fault_pc, .. } = outcome {
            prop_assert_eq!(fault_pc, pc);
            prop_assert_eq!(board.arch.acc(), before.arch.acc());
            prop_assert_eq!(board.arch.ix(), before.arch.ix());
            prop_assert_eq!(board.arch.flags(), before.arch.flags());
            prop_assert_eq!(&board.memory, &before.memory);
            prop_assert_eq!(board.obuf, before.obuf);
        }
    }
}
