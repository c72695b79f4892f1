//! Stack, subroutine and jump-mode tests

use super::helpers::*;
use crate::config::{JumpMode, MachineConfig};
use crate::error::VmError;
use crate::vm::Machine;
use std::io;

fn legacy() -> MachineConfig {
    MachineConfig {
        jump_mode: JumpMode::PushReturn,
        ..MachineConfig::default()
    }
}

#[test]
fn test_push_pop_round_trip() {
    let run = run_bytes(&[LDI, 0, 42, PUSH, 0, POP, 1, PRN, 1, HLT]).unwrap();
    assert_eq!(run.output, "42\n");
    assert_eq!(run.machine.register(1).unwrap(), 42);
    assert_eq!(run.machine.sp(), 0xF4);
    assert_eq!(run.machine.ram_read(0xF3).unwrap(), 42);
}

#[test]
fn test_stack_is_lifo() {
    let program = [
        LDI, 0, 1, LDI, 1, 2, LDI, 2, 3, // values
        PUSH, 0, PUSH, 1, PUSH, 2, // push 1, 2, 3
        POP, 3, PRN, 3, POP, 3, PRN, 3, POP, 3, PRN, 3, HLT,
    ];
    let run = run_bytes(&program).unwrap();
    assert_eq!(run.output, "3\n2\n1\n");
}

#[test]
fn test_pop_on_empty_stack_underflows() {
    assert!(matches!(
        run_bytes(&[POP, 0, HLT]),
        Err(VmError::StackUnderflow { sp: 0xF4 })
    ));
}

#[test]
fn test_ret_on_empty_stack_underflows() {
    assert!(matches!(
        run_bytes(&[RET]),
        Err(VmError::StackUnderflow { sp: 0xF4 })
    ));
}

#[test]
fn test_push_past_address_zero_overflows() {
    let config = MachineConfig {
        stack_top: 2,
        ..MachineConfig::default()
    };
    let result = run_bytes_with(&[LDI, 0, 1, PUSH, 0, PUSH, 0, PUSH, 0, HLT], config);
    assert!(matches!(result, Err(VmError::StackOverflow { sp: 0 })));
}

#[test]
fn test_push_respects_stack_limit() {
    let config = MachineConfig {
        stack_top: 0x10,
        stack_limit: 0x0E,
        ..MachineConfig::default()
    };
    let result = run_bytes_with(&[LDI, 0, 1, PUSH, 0, PUSH, 0, PUSH, 0, HLT], config);
    assert!(matches!(result, Err(VmError::StackOverflow { sp: 0x0E })));
}

#[test]
fn test_pop_into_invalid_register_leaves_sp() {
    let mut machine = Machine::new();
    machine.load(&[LDI, 0, 9, PUSH, 0, POP, 9]).unwrap();
    assert!(matches!(
        machine.run(&mut io::sink()),
        Err(VmError::InvalidRegister(9))
    ));
    assert_eq!(machine.sp(), 0xF3);
}

#[test]
fn test_call_return_address_must_fit() {
    let mut machine = Machine::new();
    machine.load(&[LDI, 0, 254, JMP, 0]).unwrap();
    machine.ram_write(254, CALL).unwrap();
    machine.ram_write(255, 0).unwrap();

    assert!(matches!(
        machine.run(&mut io::sink()),
        Err(VmError::MemoryOutOfBounds { address: 256 })
    ));
}

#[test]
fn test_nested_calls() {
    let program = [
        LDI, 1, 10, // 0: outer
        LDI, 2, 16, // 3: inner
        CALL, 1, // 6
        HLT, // 8
        HLT, // 9
        LDI, 0, 4, // 10: outer body
        CALL, 2, // 13
        RET, // 15
        MUL, 0, 0, // 16: inner body, square R0
        PRN, 0, // 19
        RET, // 21
    ];
    let run = run_bytes(&program).unwrap();
    assert_eq!(run.output, "16\n");
    assert_eq!(run.halt.pc, 8);
    assert_eq!(run.machine.sp(), 0xF4);
}

#[test]
fn test_plain_jmp_leaves_stack_alone() {
    let run = run_bytes(&[LDI, 0, 5, JMP, 0, HLT]).unwrap();
    assert_eq!(run.halt.pc, 5);
    assert_eq!(run.machine.sp(), 0xF4);
}

#[test]
fn test_legacy_jmp_pushes_return_address() {
    // The legacy jump pushes PC + 2 like CALL does
    let run = run_bytes_with(&[LDI, 0, 5, JMP, 0, HLT], legacy()).unwrap();
    assert_eq!(run.halt.pc, 5);
    assert_eq!(run.machine.sp(), 0xF3);
    assert_eq!(run.machine.ram_read(0xF3).unwrap(), 5);
}

#[test]
fn test_legacy_conditional_jumps_push_only_when_taken() {
    // CMP sets Equal; JNE at 9 falls through, JEQ at 11 is taken
    let program = [
        LDI, 0, 13, // 0
        CMP, 0, 0, // 3
        LDI, 1, 0, // 6 (filler)
        JNE, 0, // 9
        JEQ, 0, // 11
        HLT, // 13
    ];

    let plain = run_bytes(&program).unwrap();
    assert_eq!(plain.machine.sp(), 0xF4);

    let run = run_bytes_with(&program, legacy()).unwrap();
    assert_eq!(run.halt.pc, 13);
    assert_eq!(run.machine.sp(), 0xF3);
    assert_eq!(run.machine.ram_read(0xF3).unwrap(), 13);
}

#[test]
fn test_ldi_into_sp_relocates_stack() {
    let run = run_bytes(&[LDI, 7, 0xFF, LDI, 0, 9, PUSH, 0, POP, 1, PRN, 1, HLT]).unwrap();
    assert_eq!(run.output, "9\n");
    assert_eq!(run.machine.sp(), 0xFF);
    assert_eq!(run.machine.ram_read(0xFE).unwrap(), 9);
}

#[test]
fn test_pop_past_relocated_base_underflows() {
    assert!(matches!(
        run_bytes(&[LDI, 7, 0x80, LDI, 0, 1, PUSH, 0, POP, 0, POP, 0, HLT]),
        Err(VmError::StackUnderflow { sp: 0x80 })
    ));
}

#[test]
fn test_alu_write_to_sp_relocates_stack() {
    // SP = 0xF4 + 0x0A
    let run = run_bytes(&[LDI, 0, 0x0A, ADD, 7, 0, PUSH, 0, POP, 2, PRN, 2, HLT]).unwrap();
    assert_eq!(run.output, "10\n");
    assert_eq!(run.machine.sp(), 0xFE);
}
