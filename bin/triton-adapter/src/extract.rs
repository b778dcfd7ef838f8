use axum::extract::FromRequest;

use crate::error::ServerError;

/// `axum::Json` whose rejection is rendered as a [`ServerError`] JSON body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);
