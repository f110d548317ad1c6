use serde::{Deserialize, Serialize};

///Field type as written in a descriptor, e.g. `"u64"`, `{"vec": "u8"}`, `{"defined": "Config"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdlType {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    U128,
    I128,
    String,
    Bytes,
    #[serde(rename = "publicKey", alias = "pubkey")]
    PublicKey,
    Vec(Box<IdlType>),
    Option(Box<IdlType>),
    Array(Box<IdlType>, usize),
    Defined(String),
}

impl IdlType {
    ///Bounds for integer types, `None` for everything else
    pub fn int_bounds(&self) -> Option<(i128, u128)> {
        match self {
            IdlType::U8 => Some((0, u8::MAX as u128)),
            IdlType::U16 => Some((0, u16::MAX as u128)),
            IdlType::U32 => Some((0, u32::MAX as u128)),
            IdlType::U64 => Some((0, u64::MAX as u128)),
            IdlType::U128 => Some((0, u128::MAX)),
            IdlType::I8 => Some((i8::MIN as i128, i8::MAX as u128)),
            IdlType::I16 => Some((i16::MIN as i128, i16::MAX as u128)),
            IdlType::I32 => Some((i32::MIN as i128, i32::MAX as u128)),
            IdlType::I64 => Some((i64::MIN as i128, i64::MAX as u128)),
            IdlType::I128 => Some((i128::MIN, i128::MAX as u128)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: IdlType,
}
