//! Extractors that reject with `SrsError`, so malformed input gets the same
//! JSON error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::data::models::SrsError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(SrsError))]
pub struct JsonBody<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(SrsError))]
pub struct PathParam<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(SrsError))]
pub struct QueryParams<T>(pub T);
