#![no_main]

use cpuboard_core::{decode_memory_region, BoardConfig, CpuBoard, Decoder, StepOutcome};
use libfuzzer_sys::fuzz_target;

const MAX_STEPS: usize = 1024;

fuzz_target!(|data: &[u8]| {
    let Some((&header, image)) = data.split_first() else {
        return;
    };

    let _ = Decoder::decode(header);

    let config = BoardConfig {
        entry_pc: header,
        input_attached: header & 0x01 != 0,
    };
    let mut board = CpuBoard::with_config(&config);
    board.load(0x000, image);

    for _ in 0..MAX_STEPS {
        let pc = board.arch.pc();
        let _ = decode_memory_region(u16::from(pc));
        match board.step() {
            StepOutcome::Continue => {}
            StepOutcome::Halted => {
                if !board.resume() {
                    break;
                }
            }
            StepOutcome::Fault { .. } => break,
        }
    }
});
