use borsh::BorshDeserialize;
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::{
    descriptor::{ProgramDescriptor, TypeDefKind},
    error::DescriptorError,
    idl_type::{Field, IdlType},
    value::Value,
};

pub const DISCRIMINATOR_LEN: usize = 8;

pub type Discriminator = [u8; DISCRIMINATOR_LEN];

fn sighash(namespace: &str, name: &str) -> Discriminator {
    let mut hasher = Sha256::new();
    hasher.update(format!("{namespace}:{name}").as_bytes());
    let hash = hasher.finalize();

    let mut disc = [0; DISCRIMINATOR_LEN];
    disc.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    disc
}

pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn instruction_discriminator(name: &str) -> Discriminator {
    sighash("global", &to_snake_case(name))
}

pub fn account_discriminator(name: &str) -> Discriminator {
    sighash("account", name)
}

///Account contents decoded against its descriptor layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAccount {
    pub type_name: String,
    pub fields: Vec<(String, Value)>,
}

impl DecodedAccount {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

impl ProgramDescriptor {
    ///Instruction data: discriminator followed by every declared argument in order
    pub fn encode_instruction(
        &self,
        name: &str,
        args: &[(&str, Value)],
    ) -> Result<Vec<u8>, DescriptorError> {
        let ix = self.instruction(name)?;

        if let Some((extra, _)) = args
            .iter()
            .find(|(arg, _)| !ix.args.iter().any(|decl| decl.name == *arg))
        {
            return Err(DescriptorError::UnexpectedArgument {
                instruction: name.to_string(),
                arg: extra.to_string(),
            });
        }

        let mut data = instruction_discriminator(&ix.name).to_vec();

        for decl in &ix.args {
            let Some((_, value)) = args.iter().find(|(arg, _)| *arg == decl.name) else {
                return Err(DescriptorError::MissingArgument {
                    instruction: name.to_string(),
                    arg: decl.name.clone(),
                });
            };

            self.encode_value(&decl.name, &decl.ty, value, &mut data)?;
        }

        Ok(data)
    }

    ///Decode account bytes as `type_name`; trailing bytes past the layout are ignored
    pub fn decode_account(
        &self,
        type_name: &str,
        data: &[u8],
    ) -> Result<DecodedAccount, DescriptorError> {
        let def = self.account(type_name)?;

        if data.len() < DISCRIMINATOR_LEN
            || data[..DISCRIMINATOR_LEN] != account_discriminator(&def.name)
        {
            return Err(DescriptorError::DiscriminatorMismatch(type_name.to_string()));
        }

        let TypeDefKind::Struct { fields } = &def.ty else {
            return Err(DescriptorError::UnknownAccount(type_name.to_string()));
        };

        let mut buf = &data[DISCRIMINATOR_LEN..];

        Ok(DecodedAccount {
            type_name: def.name.clone(),
            fields: self.decode_fields(fields, &mut buf)?,
        })
    }

    ///Account bytes as the program would store them, discriminator included
    pub fn encode_account(
        &self,
        type_name: &str,
        fields: &[(&str, Value)],
    ) -> Result<Vec<u8>, DescriptorError> {
        let def = self.account(type_name)?;
        let TypeDefKind::Struct { fields: decls } = &def.ty else {
            return Err(DescriptorError::UnknownAccount(type_name.to_string()));
        };

        let mut data = account_discriminator(&def.name).to_vec();
        for decl in decls {
            let value = fields
                .iter()
                .find(|(name, _)| *name == decl.name)
                .map(|(_, value)| value)
                .ok_or_else(|| DescriptorError::type_mismatch(&decl.name, &decl.ty))?;

            self.encode_value(&decl.name, &decl.ty, value, &mut data)?;
        }

        Ok(data)
    }

    fn decode_fields(
        &self,
        fields: &[Field],
        buf: &mut &[u8],
    ) -> Result<Vec<(String, Value)>, DescriptorError> {
        fields
            .iter()
            .map(|field| Ok((field.name.clone(), self.decode_value(&field.ty, buf)?)))
            .collect()
    }

    fn encode_value(
        &self,
        field: &str,
        ty: &IdlType,
        value: &Value,
        out: &mut Vec<u8>,
    ) -> Result<(), DescriptorError> {
        let mismatch = || DescriptorError::type_mismatch(field, ty);

        match (ty, value) {
            (IdlType::Bool, Value::Bool(b)) => borsh::to_writer(&mut *out, b)?,
            (IdlType::String, Value::String(s)) => borsh::to_writer(&mut *out, s)?,
            (IdlType::Bytes, Value::Bytes(bytes)) => borsh::to_writer(&mut *out, bytes)?,
            (IdlType::PublicKey, Value::PublicKey(key)) => out.extend_from_slice(key.as_ref()),
            (IdlType::Vec(inner), Value::Vec(items)) => {
                let len = u32::try_from(items.len()).map_err(|_| mismatch())?;
                borsh::to_writer(&mut *out, &len)?;
                for item in items {
                    self.encode_value(field, inner, item, out)?;
                }
            }
            (IdlType::Array(inner, len), Value::Vec(items)) => {
                if items.len() != *len {
                    return Err(mismatch());
                }
                for item in items {
                    self.encode_value(field, inner, item, out)?;
                }
            }
            (IdlType::Option(_), Value::Option(None)) => out.push(0),
            (IdlType::Option(inner), Value::Option(Some(item))) => {
                out.push(1);
                self.encode_value(field, inner, item, out)?;
            }
            (IdlType::Defined(name), _) => {
                let def = self.defined_type(name)?;
                match (&def.ty, value) {
                    (TypeDefKind::Struct { fields }, Value::Struct(values)) => {
                        for decl in fields {
                            let item = values
                                .iter()
                                .find(|(n, _)| *n == decl.name)
                                .map(|(_, v)| v)
                                .ok_or_else(mismatch)?;
                            self.encode_value(&decl.name, &decl.ty, item, out)?;
                        }
                    }
                    (TypeDefKind::Enum { variants }, Value::Enum(variant)) => {
                        let idx = variants
                            .iter()
                            .position(|v| v.name == *variant)
                            .ok_or_else(mismatch)?;
                        out.push(u8::try_from(idx).map_err(|_| mismatch())?);
                    }
                    _ => return Err(mismatch()),
                }
            }
            (int_ty, Value::Unsigned(_) | Value::Signed(_)) => {
                encode_int(int_ty, value, out).ok_or_else(mismatch)?;
            }
            _ => return Err(mismatch()),
        }

        Ok(())
    }

    fn decode_value(&self, ty: &IdlType, buf: &mut &[u8]) -> Result<Value, DescriptorError> {
        let value = match ty {
            IdlType::Bool => Value::Bool(bool::deserialize(buf)?),
            IdlType::U8 => Value::Unsigned(u8::deserialize(buf)?.into()),
            IdlType::U16 => Value::Unsigned(u16::deserialize(buf)?.into()),
            IdlType::U32 => Value::Unsigned(u32::deserialize(buf)?.into()),
            IdlType::U64 => Value::Unsigned(u64::deserialize(buf)?.into()),
            IdlType::U128 => Value::Unsigned(u128::deserialize(buf)?),
            IdlType::I8 => Value::Signed(i8::deserialize(buf)?.into()),
            IdlType::I16 => Value::Signed(i16::deserialize(buf)?.into()),
            IdlType::I32 => Value::Signed(i32::deserialize(buf)?.into()),
            IdlType::I64 => Value::Signed(i64::deserialize(buf)?.into()),
            IdlType::I128 => Value::Signed(i128::deserialize(buf)?),
            IdlType::String => Value::String(String::deserialize(buf)?),
            IdlType::Bytes => Value::Bytes(Vec::<u8>::deserialize(buf)?),
            IdlType::PublicKey => Value::PublicKey(Pubkey::new_from_array(
                <[u8; 32]>::deserialize(buf)?,
            )),
            IdlType::Vec(inner) => {
                let len = u32::deserialize(buf)?;
                let mut items = Vec::new();
                for _ in 0..len {
                    items.push(self.decode_value(inner, buf)?);
                }
                Value::Vec(items)
            }
            IdlType::Array(inner, len) => {
                let mut items = Vec::with_capacity(*len);
                for _ in 0..*len {
                    items.push(self.decode_value(inner, buf)?);
                }
                Value::Vec(items)
            }
            IdlType::Option(inner) => match u8::deserialize(buf)? {
                0 => Value::Option(None),
                _ => Value::Option(Some(Box::new(self.decode_value(inner, buf)?))),
            },
            IdlType::Defined(name) => match &self.defined_type(name)?.ty {
                TypeDefKind::Struct { fields } => Value::Struct(self.decode_fields(fields, buf)?),
                TypeDefKind::Enum { variants } => {
                    let idx = u8::deserialize(buf)? as usize;
                    let variant = variants
                        .get(idx)
                        .ok_or_else(|| DescriptorError::type_mismatch(name, ty))?;
                    Value::Enum(variant.name.clone())
                }
            },
        };

        Ok(value)
    }
}

fn encode_int(ty: &IdlType, value: &Value, out: &mut Vec<u8>) -> Option<()> {
    let (min, max) = ty.int_bounds()?;
    let wide: i128 = match value {
        Value::Unsigned(n) if *n > max => return None,
        Value::Unsigned(n) => {
            // u128 values above i128::MAX only fit a u128 field
            if let IdlType::U128 = ty {
                out.extend_from_slice(&n.to_le_bytes());
                return Some(());
            }
            i128::try_from(*n).ok()?
        }
        Value::Signed(n) if *n < min || (*n >= 0 && *n as u128 > max) => return None,
        Value::Signed(n) => *n,
        _ => return None,
    };

    match ty {
        IdlType::U8 => out.extend_from_slice(&(wide as u8).to_le_bytes()),
        IdlType::U16 => out.extend_from_slice(&(wide as u16).to_le_bytes()),
        IdlType::U32 => out.extend_from_slice(&(wide as u32).to_le_bytes()),
        IdlType::U64 => out.extend_from_slice(&(wide as u64).to_le_bytes()),
        IdlType::U128 => out.extend_from_slice(&(wide as u128).to_le_bytes()),
        IdlType::I8 => out.extend_from_slice(&(wide as i8).to_le_bytes()),
        IdlType::I16 => out.extend_from_slice(&(wide as i16).to_le_bytes()),
        IdlType::I32 => out.extend_from_slice(&(wide as i32).to_le_bytes()),
        IdlType::I64 => out.extend_from_slice(&(wide as i64).to_le_bytes()),
        IdlType::I128 => out.extend_from_slice(&wide.to_le_bytes()),
        _ => return None,
    }

    Some(())
}
