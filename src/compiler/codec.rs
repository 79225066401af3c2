//! Byte encoding of compilation units.
//!
//! Layout, integers little-endian, strings as a u32 length then UTF-8:
//!
//! ```text
//! "SNBC" version:u8 name:str entry_name:str max_stack:u32 op_count:u32 op*
//! ```
//!
//! Each op is an opcode byte followed by its operands.

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::unit::{Builtin, CompilationUnit, Op, Procedure, Sink};

pub const MAGIC: &[u8; 4] = b"SNBC";
pub const FORMAT_VERSION: u8 = 1;

const OP_PUSH_NULL: u8 = 0x01;
const OP_PUSH_INT: u8 = 0x02;
const OP_PUSH_STR: u8 = 0x03;
const OP_PUSH_BOOL: u8 = 0x04;
const OP_GET_SINK: u8 = 0x05;
const OP_INVOKE: u8 = 0x06;
const OP_POP: u8 = 0x07;
const OP_RETURN: u8 = 0x08;

const SINK_STDOUT: u8 = 0x00;
const BUILTIN_PRINTLN: u8 = 0x00;

fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn write_str(out: &mut Vec<u8>, value: &str) {
    write_u32(out, value.len() as u32);
    out.extend_from_slice(value.as_bytes());
}

fn sink_code(sink: Sink) -> u8 {
    match sink {
        Sink::Stdout => SINK_STDOUT,
    }
}

fn builtin_code(builtin: Builtin) -> u8 {
    match builtin {
        Builtin::Println => BUILTIN_PRINTLN,
    }
}

impl CompilationUnit {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + self.entry.ops.len() * 2);

        out.extend_from_slice(MAGIC);
        out.push(FORMAT_VERSION);
        write_str(&mut out, &self.name);
        write_str(&mut out, &self.entry.name);
        write_u32(&mut out, self.entry.max_stack);
        write_u32(&mut out, self.entry.ops.len() as u32);

        for op in &self.entry.ops {
            match op {
                Op::PushNull => out.push(OP_PUSH_NULL),
                Op::PushInt(value) => {
                    out.push(OP_PUSH_INT);
                    out.extend_from_slice(&value.to_le_bytes());
                }
                Op::PushStr(value) => {
                    out.push(OP_PUSH_STR);
                    write_str(&mut out, value);
                }
                Op::PushBool(value) => {
                    out.push(OP_PUSH_BOOL);
                    out.push(*value as u8);
                }
                Op::GetSink(sink) => {
                    out.push(OP_GET_SINK);
                    out.push(sink_code(*sink));
                }
                Op::Invoke { builtin, argc } => {
                    out.push(OP_INVOKE);
                    out.push(builtin_code(*builtin));
                    out.push(*argc);
                }
                Op::Pop => out.push(OP_POP),
                Op::Return => out.push(OP_RETURN),
            }
        }

        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<CompilationUnit, Error> {
        let mut reader = ByteReader::new(bytes);

        if reader.take(MAGIC.len())? != MAGIC {
            return Err(reader.error_at(0, "missing SNBC magic"));
        }
        let version = reader.read_u8()?;
        if version != FORMAT_VERSION {
            return Err(reader.error_at(4, format!("unsupported format version {}", version)));
        }

        let name = reader.read_str()?;
        let entry_name = reader.read_str()?;
        let max_stack = reader.read_u32()?;
        let count = reader.read_u32()? as usize;

        let mut ops = Vec::with_capacity(count.min(bytes.len()));
        for _ in 0..count {
            ops.push(reader.read_op()?);
        }

        if !reader.is_done() {
            return Err(reader.error("trailing bytes after the last op"));
        }

        Ok(CompilationUnit {
            name,
            entry: Procedure {
                name: entry_name,
                max_stack,
                ops,
            },
        })
    }
}

struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, offset: 0 }
    }

    fn is_done(&self) -> bool {
        self.offset == self.bytes.len()
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        self.error_at(self.offset, reason)
    }

    fn error_at(&self, offset: usize, reason: impl Into<String>) -> Error {
        Error::new(
            ErrorImpl::MalformedUnit {
                offset,
                reason: reason.into(),
            },
            Position::null(),
        )
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| self.error(format!("expected {} more bytes", len)))?;

        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, Error> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32, Error> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i64(&mut self) -> Result<i64, Error> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(i64::from_le_bytes(buf))
    }

    fn read_str(&mut self) -> Result<String, Error> {
        let len = self.read_u32()? as usize;
        let start = self.offset;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec())
            .map_err(|_| self.error_at(start, "string is not valid UTF-8"))
    }

    fn read_op(&mut self) -> Result<Op, Error> {
        let start = self.offset;
        let op = match self.read_u8()? {
            OP_PUSH_NULL => Op::PushNull,
            OP_PUSH_INT => Op::PushInt(self.read_i64()?),
            OP_PUSH_STR => Op::PushStr(self.read_str()?),
            OP_PUSH_BOOL => match self.read_u8()? {
                0 => Op::PushBool(false),
                1 => Op::PushBool(true),
                other => return Err(self.error_at(start + 1, format!("invalid boolean {}", other))),
            },
            OP_GET_SINK => match self.read_u8()? {
                SINK_STDOUT => Op::GetSink(Sink::Stdout),
                other => return Err(self.error_at(start + 1, format!("unknown sink {}", other))),
            },
            OP_INVOKE => {
                let builtin = match self.read_u8()? {
                    BUILTIN_PRINTLN => Builtin::Println,
                    other => {
                        return Err(self.error_at(start + 1, format!("unknown builtin {}", other)))
                    }
                };
                let argc = self.read_u8()?;
                if argc > builtin.max_args() {
                    return Err(self.error_at(
                        start + 2,
                        format!("{} takes at most {} arguments, got {}", builtin, builtin.max_args(), argc),
                    ));
                }
                Op::Invoke { builtin, argc }
            }
            OP_POP => Op::Pop,
            OP_RETURN => Op::Return,
            other => return Err(self.error_at(start, format!("unknown opcode {:#04x}", other))),
        };
        Ok(op)
    }
}
