//! Domain entities

mod synthesis_request;

pub use synthesis_request::SynthesisRequest;
