use crate::console::Console;
use crate::decoder::Op;
use crate::disasm::fmt_instr;
use crate::machine::{Fault, Machine};
use crate::operand;
use crate::pattern::{self, fmt_signature};
use crate::token::Token;
use crate::Word;

pub trait Executor {
    fn exec<C: Console>(
        &self,
        m: &mut Machine,
        io: &mut C,
        index: usize,
        op: Op,
        operands: &[Token],
    ) -> Result<(), Fault>;
}

/// Integer semantics over 64-bit two's complement words.
pub struct IntExecutor;

impl Executor for IntExecutor {
    fn exec<C: Console>(
        &self,
        m: &mut Machine,
        io: &mut C,
        index: usize,
        op: Op,
        operands: &[Token],
    ) -> Result<(), Fault> {
        // Hand-built instructions never went through a decoder.
        if !pattern::matches(operands, op.signature()) {
            return Err(Fault::PatternMismatch {
                index,
                line: fmt_instr(op, operands),
                expected: fmt_signature(op.signature()),
            });
        }
        let reg = |tok: &Token| operand::reference(tok).map_err(|e| Fault::operand(index, e));

        match op {
            Op::Ldr | Op::Mov => {
                let rd = reg(&operands[0])?;
                let v = value(m, index, &operands[1])?;
                m.regs.write(rd, v);
            }
            Op::Str => {
                let v = value(m, index, &operands[0])?;
                let addr = reg(&operands[1])?;
                m.mem.write(addr, v);
            }
            Op::Add | Op::Sub | Op::And | Op::Orr | Op::Eor | Op::Lsl | Op::Lsr => {
                let rd = reg(&operands[0])?;
                let a = value(m, index, &operands[1])?;
                let b = value(m, index, &operands[2])?;
                let res = match op {
                    Op::Add => a.wrapping_add(b),
                    Op::Sub => a.wrapping_sub(b),
                    Op::And => a & b,
                    Op::Orr => a | b,
                    Op::Eor => a ^ b,
                    Op::Lsl => a << shift(index, b)?,
                    // Arithmetic shift: the sign is kept.
                    _ => a >> shift(index, b)?,
                };
                m.regs.write(rd, res);
            }
            Op::Cmp => {
                let a = value(m, index, &operands[0])?;
                let b = value(m, index, &operands[1])?;
                m.latch = Some((a, b));
            }
            Op::Mvn => {
                let rd = reg(&operands[0])?;
                let v = value(m, index, &operands[1])?;
                m.regs.write(rd, !v);
            }
            Op::Inp => {
                let rd = reg(&operands[0])?;
                let v = io.input().map_err(|source| Fault::Io { index, source })?;
                m.regs.write(rd, v);
            }
            Op::Out => {
                let v = value(m, index, &operands[0])?;
                io.output(v).map_err(|source| Fault::Io { index, source })?;
            }
            Op::Halt => m.halted = true,
        }
        Ok(())
    }
}

fn value(m: &Machine, index: usize, tok: &Token) -> Result<Word, Fault> {
    operand::value(tok, &m.regs, &m.mem).map_err(|e| Fault::operand(index, e))
}

fn shift(index: usize, amount: Word) -> Result<u32, Fault> {
    match u32::try_from(amount) {
        Ok(s) if s < Word::BITS => Ok(s),
        _ => Err(Fault::ShiftOutOfRange { index, amount }),
    }
}
