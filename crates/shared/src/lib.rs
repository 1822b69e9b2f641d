//! Fichas Shared - wire contracts for the REST API
//!
//! Pure data types and serialization. Documents, sheet edits and roll
//! requests are domain types and cross the wire unchanged; this crate adds
//! the envelopes around them.

pub mod requests;
pub mod responses;

pub use requests::{ApplyEditsRequest, CharacterInput, ParseDamageRequest, RollBody};
pub use responses::{
    ErrorBody, ParseDamageResponse, RollResponse, SystemInfo, HISTORY_HEAD_LEN,
};
