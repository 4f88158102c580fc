//! Commands module - service layer for template-to-policy conversion.

mod convert;
pub(crate) mod service;

pub use convert::LIST_POLICY_FILENAME;
pub use service::ConvertService;
