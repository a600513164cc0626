//! A json format of assignment requests used by the rotation heuristics.

use cpsearch::utils::GenericError;
use dispatch_core::heuristics::AssignmentRequest;
use std::io::{BufReader, Read};

/// Reads an assignment request from json.
pub fn read_request<R: Read>(reader: BufReader<R>) -> Result<AssignmentRequest, GenericError> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize assignment request: '{err}'").into())
}
