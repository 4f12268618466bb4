#![doc = include_str!("../README.md")]

pub mod alert;
pub mod error;
pub mod extractor;
pub mod reader;
pub mod responder;
pub mod rule;

pub use alert::{Alert, RULE_ID_UNAVAILABLE};
pub use error::AlertError;
pub use extractor::{TargetExtractor, extract};
pub use reader::{AlertReader, read_alert};
pub use responder::{Responder, ResponseOutcome, respond};
pub use rule::RuleClass;
