//! Envelope codec.
//!
//! Turns an inbound SOAP envelope into a [`SoapRequest`](crate::SoapRequest)
//! and wraps a handler's result fragment into the response envelope the
//! mocked service sends back.

pub mod envelope;

pub use envelope::{
    decode, encode, escape_text, extract_result, SERVICE_NS, SOAP_ENV_NS, XSD_NS, XSI_NS,
};
