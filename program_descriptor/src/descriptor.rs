use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::{error::DescriptorError, idl_type::Field};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountItem {
    pub name: String,
    pub is_mut: bool,
    pub is_signer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionDef {
    pub name: String,
    pub accounts: Vec<AccountItem>,
    #[serde(default)]
    pub args: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVariant {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDefKind {
    Struct { fields: Vec<Field> },
    Enum { variants: Vec<EnumVariant> },
}

///Named account layout or user type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDefKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDef {
    pub code: u32,
    pub name: String,
    #[serde(default)]
    pub msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub address: String,
}

///Static description of a deployed program: its address and the shape of its interface.
///
///Loaded once and then only read. Clients receive it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramDescriptor {
    pub version: String,
    pub name: String,
    #[serde(default)]
    pub instructions: Vec<InstructionDef>,
    #[serde(default)]
    pub accounts: Vec<TypeDef>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub errors: Vec<ErrorDef>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl ProgramDescriptor {
    pub fn from_json(raw: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, DescriptorError> {
        let file = File::open(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        Ok(serde_json::from_reader(reader)?)
    }

    ///Network address of the deployed program
    pub fn program_id(&self) -> Result<Pubkey, DescriptorError> {
        let Some(metadata) = &self.metadata else {
            return Err(DescriptorError::MissingAddress);
        };

        Pubkey::from_str(&metadata.address)
            .map_err(|_| DescriptorError::InvalidAddress(metadata.address.clone()))
    }

    pub fn instruction(&self, name: &str) -> Result<&InstructionDef, DescriptorError> {
        self.instructions
            .iter()
            .find(|ix| ix.name == name)
            .ok_or_else(|| DescriptorError::UnknownInstruction(name.to_string()))
    }

    pub fn account(&self, name: &str) -> Result<&TypeDef, DescriptorError> {
        self.accounts
            .iter()
            .find(|acc| acc.name == name)
            .ok_or_else(|| DescriptorError::UnknownAccount(name.to_string()))
    }

    ///Looks in `types` first, then in `accounts`
    pub fn defined_type(&self, name: &str) -> Result<&TypeDef, DescriptorError> {
        self.types
            .iter()
            .chain(self.accounts.iter())
            .find(|def| def.name == name)
            .ok_or_else(|| DescriptorError::UnknownType(name.to_string()))
    }

    pub fn error_message(&self, code: u32) -> Option<&ErrorDef> {
        self.errors.iter().find(|err| err.code == code)
    }
}
