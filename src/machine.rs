use thiserror::Error;

/// Width of every non-halt instruction: opcode plus three operand cells.
pub const STRIDE: usize = 4;

// Opcodes.
const ADD: i64 = 1;
const MUL: i64 = 2;
const HALT: i64 = 99;

/// An execution failure. Both kinds are fatal to the current run; the
/// machine never skips or papers over a bad instruction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExecError {
    /// The cell at the instruction pointer holds no recognized opcode.
    #[error("invalid opcode {opcode} at ip {ip}")]
    InvalidOpcode { opcode: i64, ip: usize },

    /// An operand address fell outside memory, or fewer than four cells
    /// remained to decode a non-halt instruction.
    #[error("address {addr} out of bounds at ip {ip} (memory holds {len} cells)")]
    OutOfBounds { addr: i64, ip: usize, len: usize },
}

/// Execute the program in `mem`, starting from instruction pointer 0.
///
/// Memory is a flat array of signed integers holding instructions and data
/// in the same address space, so programs are free to rewrite themselves.
/// Each instruction is four consecutive cells, `(opcode, p1, p2, dst)`,
/// where the operands are *addresses* into memory:
///
/// - opcode 1 (add):      `mem[dst] = mem[p1] + mem[p2]`
/// - opcode 2 (multiply): `mem[dst] = mem[p1] * mem[p2]`
/// - opcode 99 (halt):    stop; nothing past the opcode cell is read
///
/// Arithmetic wraps on overflow. After an add or multiply the pointer
/// advances by exactly four cells; there are no jumps, so the pointer never
/// decreases and every program terminates. Running off the end of memory
/// without reading a halt is a normal stop.
///
/// Memory is modified in place. Callers that need the initial state again
/// must run on a copy.
pub fn execute(mem: &mut [i64]) -> Result<(), ExecError> {
    let len = mem.len();
    let mut ip = 0;

    while ip < len {
        let opcode = mem[ip];
        if opcode == HALT {
            return Ok(());
        }
        if opcode != ADD && opcode != MUL {
            return Err(ExecError::InvalidOpcode { opcode, ip });
        }
        if ip + STRIDE > len {
            // Non-halt opcode with a truncated operand list.
            return Err(ExecError::OutOfBounds {
                addr: len as i64,
                ip,
                len,
            });
        }

        let p1 = fetch(mem, mem[ip + 1], ip)?;
        let p2 = fetch(mem, mem[ip + 2], ip)?;
        let dst = index(mem, mem[ip + 3], ip)?;

        mem[dst] = match opcode {
            ADD => p1.wrapping_add(p2),
            _ => p1.wrapping_mul(p2),
        };

        ip += STRIDE;
    }

    Ok(())
}

/// Bounds-check an operand address and convert it to a usable index.
fn index(mem: &[i64], addr: i64, ip: usize) -> Result<usize, ExecError> {
    if addr < 0 || addr as usize >= mem.len() {
        return Err(ExecError::OutOfBounds {
            addr,
            ip,
            len: mem.len(),
        });
    }
    Ok(addr as usize)
}

/// Read the cell an operand address points at.
fn fetch(mem: &[i64], addr: i64, ip: usize) -> Result<i64, ExecError> {
    Ok(mem[index(mem, addr, ip)?])
}

/// Pretty-print a static listing of memory for human inspection.
///
/// The walk decodes greedily from cell 0: full add/multiply instructions
/// take four cells, a halt takes one, and anything else is shown as a bare
/// data cell. Self-modifying programs may of course execute differently
/// than they disassemble.
pub fn disassemble(mem: &[i64]) -> String {
    use std::fmt::Write;
    let mut out = String::new();
    let mut ip = 0;
    while ip < mem.len() {
        match mem[ip] {
            HALT => {
                let _ = writeln!(out, "{ip:04}: [99]  halt");
                ip += 1;
            }
            op @ (ADD | MUL) if ip + STRIDE <= mem.len() => {
                let p1 = mem[ip + 1];
                let p2 = mem[ip + 2];
                let dst = mem[ip + 3];
                let sym = if op == ADD { '+' } else { '*' };
                let _ = writeln!(
                    out,
                    "{ip:04}: [{op} {p1} {p2} {dst}]  mem[{dst}] = mem[{p1}] {sym} mem[{p2}]"
                );
                ip += STRIDE;
            }
            other => {
                let _ = writeln!(out, "{ip:04}: {other}  (data)");
                ip += 1;
            }
        }
    }
    out
}
