//! SOAP method handlers for the ClassicMapper and ClassicInventory services.

pub mod dispatcher;
pub mod fragment;
pub mod inventory;
pub mod mapper;
pub mod registry;

pub use dispatcher::{SoapDispatcher, SoapReply};
pub use registry::{HandlerFn, MethodInfo, MethodRegistry};
