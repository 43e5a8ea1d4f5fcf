use crate::options::{ByteOrder, CodecOptions, Int64Layout};
use packmsg_types::{ScalarType, Value};
use std::mem;

/// Reads and writes fixed-width scalars at a byte offset.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct WireFormat {
    pub byte_order: ByteOrder,
    pub int64_layout: Int64Layout,
}

impl From<&CodecOptions> for WireFormat {
    fn from(opts: &CodecOptions) -> Self {
        Self {
            byte_order: opts.byte_order(),
            int64_layout: opts.int64_layout,
        }
    }
}

impl Default for WireFormat {
    fn default() -> Self {
        Self::from(&CodecOptions::default())
    }
}

macro_rules! put {
    ($self:ident, $buf:ident, $off:expr, $v:expr) => {{
        let v = $v;
        let bytes = match $self.byte_order {
            ByteOrder::Little => v.to_le_bytes(),
            ByteOrder::Big => v.to_be_bytes(),
        };
        let off = $off;
        $buf[off..off + bytes.len()].copy_from_slice(&bytes);
    }};
}

macro_rules! get {
    ($self:ident, $buf:ident, $off:expr, $t:ty) => {{
        let off = $off;
        let bytes = $buf.get(off..off.checked_add(mem::size_of::<$t>())?)?;
        let bytes = bytes.try_into().ok()?;
        match $self.byte_order {
            ByteOrder::Little => <$t>::from_le_bytes(bytes),
            ByteOrder::Big => <$t>::from_be_bytes(bytes),
        }
    }};
}

impl WireFormat {
    /// Writes `val` as `scalar` at `off`.
    ///
    /// Integers are narrowed by truncation. Returns false, writing nothing, if `val` is
    /// neither a number nor a bool (except for `bool` fields, which take any value's truthiness).
    ///
    /// The caller guarantees that `buf` holds `off + scalar.width()` bytes.
    pub fn write_scalar(
        &self,
        buf: &mut [u8],
        off: usize,
        scalar: ScalarType,
        val: &Value,
    ) -> bool {
        if scalar == ScalarType::Bool {
            buf[off] = val.is_truthy() as u8;
            return true;
        }

        match scalar {
            ScalarType::Float32 | ScalarType::Float64 => {
                let f = match val.as_f64() {
                    None => return false,
                    Some(f) => f,
                };
                match scalar {
                    ScalarType::Float32 => put!(self, buf, off, f as f32),
                    _ => put!(self, buf, off, f),
                }
            }
            _ => {
                let i = match val.as_i64() {
                    None => return false,
                    Some(i) => i,
                };
                match scalar {
                    ScalarType::Int8 => put!(self, buf, off, i as i8),
                    ScalarType::UInt8 => put!(self, buf, off, i as u8),
                    ScalarType::Int16 => put!(self, buf, off, i as i16),
                    ScalarType::UInt16 => put!(self, buf, off, i as u16),
                    ScalarType::Int32 => put!(self, buf, off, i as i32),
                    ScalarType::UInt32 => put!(self, buf, off, i as u32),
                    _ => self.write_i64(buf, off, i),
                }
            }
        }
        true
    }

    fn write_i64(&self, buf: &mut [u8], off: usize, i: i64) {
        match self.int64_layout {
            Int64Layout::Canonical => put!(self, buf, off, i),
            Int64Layout::LowWordFirst => {
                let u = i as u64;
                put!(self, buf, off, u as u32);
                put!(self, buf, off + mem::size_of::<u32>(), (u >> 32) as u32);
            }
        }
    }

    /// Reads a `scalar` at `off`. `None` if the buffer ends before the scalar does.
    pub fn read_scalar(&self, buf: &[u8], off: usize, scalar: ScalarType) -> Option<Value> {
        let val = match scalar {
            ScalarType::Int8 => Value::Int(get!(self, buf, off, i8).into()),
            ScalarType::UInt8 => Value::UInt(get!(self, buf, off, u8).into()),
            ScalarType::Int16 => Value::Int(get!(self, buf, off, i16).into()),
            ScalarType::UInt16 => Value::UInt(get!(self, buf, off, u16).into()),
            ScalarType::Int32 => Value::Int(get!(self, buf, off, i32).into()),
            ScalarType::UInt32 => Value::UInt(get!(self, buf, off, u32).into()),
            ScalarType::Int64 => Value::Int(self.read_i64(buf, off)?),
            ScalarType::Float32 => Value::Float(get!(self, buf, off, f32).into()),
            ScalarType::Float64 => Value::Float(get!(self, buf, off, f64)),
            ScalarType::Bool => Value::Bool(get!(self, buf, off, u8) != 0),
        };
        Some(val)
    }

    fn read_i64(&self, buf: &[u8], off: usize) -> Option<i64> {
        let i = match self.int64_layout {
            Int64Layout::Canonical => get!(self, buf, off, i64),
            Int64Layout::LowWordFirst => {
                let lo = get!(self, buf, off, u32);
                let hi = get!(self, buf, off.checked_add(mem::size_of::<u32>())?, u32);
                ((u64::from(hi) << 32) | u64::from(lo)) as i64
            }
        };
        Some(i)
    }
}
