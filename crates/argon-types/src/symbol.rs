use std::fmt;

/// The kind a declared name is bound to. Numeric kinds carry their
/// width/signedness; `Err` is the poison value handed out for failed
/// lookups so callers can keep going without re-reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolType {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    F80,
    F128,
    Function,
    Struct,
    Enum,
    Err,
}

impl SymbolType {
    /// Maps a datatype keyword to its symbol kind. `char` and `bool` bind
    /// to `U8`, their one-byte storage class. Returns `None` for names
    /// that are not built-in datatypes (user types resolve through the
    /// table instead).
    pub fn from_type_name(name: &str) -> Option<SymbolType> {
        let ty = match name {
            "i8" => SymbolType::I8,
            "i16" => SymbolType::I16,
            "i32" => SymbolType::I32,
            "i64" => SymbolType::I64,
            "i128" => SymbolType::I128,
            "u8" => SymbolType::U8,
            "u16" => SymbolType::U16,
            "u32" => SymbolType::U32,
            "u64" => SymbolType::U64,
            "u128" => SymbolType::U128,
            "f32" => SymbolType::F32,
            "f64" => SymbolType::F64,
            "f80" => SymbolType::F80,
            "f128" => SymbolType::F128,
            "char" | "bool" => SymbolType::U8,
            _ => return None,
        };
        Some(ty)
    }

    /// Byte width of a value of this kind; zero for kinds without a fixed
    /// storage footprint.
    pub fn storage_space(self) -> usize {
        match self {
            SymbolType::I8 | SymbolType::U8 => 1,
            SymbolType::I16 | SymbolType::U16 => 2,
            SymbolType::I32 | SymbolType::U32 | SymbolType::F32 => 4,
            SymbolType::I64 | SymbolType::U64 | SymbolType::F64 => 8,
            SymbolType::F80 => 10,
            SymbolType::I128 | SymbolType::U128 | SymbolType::F128 => 16,
            SymbolType::Function | SymbolType::Struct | SymbolType::Enum | SymbolType::Err => 0,
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolType::I8 => "i8",
            SymbolType::I16 => "i16",
            SymbolType::I32 => "i32",
            SymbolType::I64 => "i64",
            SymbolType::I128 => "i128",
            SymbolType::U8 => "u8",
            SymbolType::U16 => "u16",
            SymbolType::U32 => "u32",
            SymbolType::U64 => "u64",
            SymbolType::U128 => "u128",
            SymbolType::F32 => "f32",
            SymbolType::F64 => "f64",
            SymbolType::F80 => "f80",
            SymbolType::F128 => "f128",
            SymbolType::Function => "fn",
            SymbolType::Struct => "struct",
            SymbolType::Enum => "enum",
            SymbolType::Err => "<err>",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Symbol {
    pub name: String,
    pub ty: SymbolType,
    pub scope_level: usize,
    pub storage_space: usize,
}

impl Symbol {
    pub fn new(name: impl Into<String>, ty: SymbolType, scope_level: usize) -> Self {
        Self {
            name: name.into(),
            ty,
            scope_level,
            storage_space: ty.storage_space(),
        }
    }

    /// The already-diagnosed placeholder returned by failed lookups.
    pub fn poison() -> Self {
        Self::new("", SymbolType::Err, 0)
    }
}
