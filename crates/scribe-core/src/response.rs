use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope: every 2xx body is `{"data": ...}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
