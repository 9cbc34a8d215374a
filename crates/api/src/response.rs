//! Shared response types for API handlers.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dockforge_core::generate::Artifact;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// An artifact delivered as a file download.
#[derive(Debug)]
pub struct Download(pub Artifact);

impl IntoResponse for Download {
    fn into_response(self) -> Response {
        let Artifact {
            file_name,
            content_type,
            content,
            ..
        } = self.0;

        (
            StatusCode::OK,
            [
                (CONTENT_TYPE, content_type.to_string()),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{file_name}\""),
                ),
            ],
            content,
        )
            .into_response()
    }
}
