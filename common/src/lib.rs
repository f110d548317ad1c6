pub mod connection;
pub mod error;
pub mod rpc_client;

pub use connection::{Commitment, Connection, RawAccount};
pub use error::RpcClientError;
