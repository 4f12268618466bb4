#![doc = include_str!("../README.md")]

pub mod config;
pub mod enforcer;
pub mod error;
pub mod flow;
pub mod transport;

pub use config::{OdlClientConfig, OdlClientConfigBuilder};
pub use enforcer::OdlFlowEnforcer;
pub use error::OdlError;
pub use flow::{FlowRule, flow_id};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
