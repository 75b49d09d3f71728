use serde::Serialize;

/// Uniform success envelope. Listings also carry `total`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            total: None,
            data,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn listing(data: Vec<T>) -> Self {
        Self {
            success: true,
            total: Some(data.len()),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub ok: bool,
    pub time: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
pub struct Endpoint {
    pub route: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceIndex {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<Endpoint>,
}
