pub mod codec;
pub mod descriptor;
pub mod error;
pub mod idl_type;
pub mod pda;
pub mod value;

pub use codec::{DecodedAccount, account_discriminator, instruction_discriminator};
pub use descriptor::{AccountItem, InstructionDef, ProgramDescriptor};
pub use error::DescriptorError;
pub use idl_type::IdlType;
pub use pda::derive_address;
pub use value::Value;
