//! Minimal class-file header reader.
//!
//! Only enough of the format is parsed to confirm a payload is a class file
//! and to recover the name it declares. Fields, methods, and attributes are
//! never touched. Utf8 constants stay as raw modified UTF-8 bytes; only the
//! declared class name is decoded.

use cesu8::from_java_cesu8;
use thiserror::Error;

const MAGIC: u32 = 0xCAFE_BABE;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClassParseError {
    #[error("unexpected end of class file")]
    UnexpectedEof,
    #[error("invalid class file magic header 0x{0:08X}")]
    InvalidMagic(u32),
    #[error("unsupported constant pool tag {tag}")]
    UnsupportedConstant { tag: u8 },
    #[error("invalid constant pool index {index}")]
    InvalidConstantIndex { index: u16 },
    #[error("class name is not valid modified UTF-8")]
    Utf8Decode,
}

/// What a class file says about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    /// Declared name, dot-delimited (`a/b/C` becomes `a.b.C`).
    pub name: String,
    pub major_version: u16,
    pub minor_version: u16,
}

/// Parse the header of a class file up to and including `this_class`.
pub fn read_class_header(bytes: &[u8]) -> Result<ClassHeader, ClassParseError> {
    let mut reader = ClassReader::new(bytes);
    let magic = reader.read_u4()?;
    if magic != MAGIC {
        return Err(ClassParseError::InvalidMagic(magic));
    }
    let minor_version = reader.read_u2()?;
    let major_version = reader.read_u2()?;
    let pool = ConstantPool::parse(&mut reader)?;

    let _access_flags = reader.read_u2()?;
    let this_class = reader.read_u2()?;
    let name = pool.class_name(this_class)?.replace('/', ".");

    Ok(ClassHeader { name, major_version, minor_version })
}

#[derive(Debug, Clone)]
enum Constant<'a> {
    Utf8(&'a [u8]),
    Class { name_index: u16 },
    Other,
    Unusable,
}

struct ConstantPool<'a> {
    entries: Vec<Constant<'a>>,
}

impl<'a> ConstantPool<'a> {
    fn parse(reader: &mut ClassReader<'a>) -> Result<Self, ClassParseError> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count);
        // index 0 is never valid
        entries.push(Constant::Unusable);

        let mut index = 1;
        while index < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let length = reader.read_u2()? as usize;
                    Constant::Utf8(reader.read_slice(length)?)
                }
                7 => Constant::Class { name_index: reader.read_u2()? },
                3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                    reader.skip(4)?;
                    Constant::Other
                }
                5 | 6 => {
                    // 8-byte constants occupy two slots
                    reader.skip(8)?;
                    entries.push(Constant::Other);
                    index += 1;
                    Constant::Unusable
                }
                8 | 16 | 19 | 20 => {
                    reader.skip(2)?;
                    Constant::Other
                }
                15 => {
                    reader.skip(3)?;
                    Constant::Other
                }
                other => return Err(ClassParseError::UnsupportedConstant { tag: other }),
            };
            entries.push(entry);
            index += 1;
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Constant<'a>, ClassParseError> {
        self.entries.get(index as usize).ok_or(ClassParseError::InvalidConstantIndex { index })
    }

    fn utf8(&self, index: u16) -> Result<String, ClassParseError> {
        match self.get(index)? {
            Constant::Utf8(bytes) => from_java_cesu8(bytes)
                .map(|value| value.into_owned())
                .map_err(|_| ClassParseError::Utf8Decode),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }

    fn class_name(&self, index: u16) -> Result<String, ClassParseError> {
        match self.get(index)? {
            Constant::Class { name_index } => self.utf8(*name_index),
            _ => Err(ClassParseError::InvalidConstantIndex { index }),
        }
    }
}

struct ClassReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ClassReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], ClassParseError> {
        let end = self.pos.checked_add(len).ok_or(ClassParseError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(ClassParseError::UnexpectedEof);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassParseError> {
        self.read_slice(len).map(|_| ())
    }

    fn read_u1(&mut self) -> Result<u8, ClassParseError> {
        Ok(self.read_slice(1)?[0])
    }

    fn read_u2(&mut self) -> Result<u16, ClassParseError> {
        let b = self.read_slice(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn read_u4(&mut self) -> Result<u32, ClassParseError> {
        let b = self.read_slice(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
