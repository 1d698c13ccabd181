pub enum MapsServiceError {
    Internal(String),
    Status {
        status: String,
        message: Option<String>,
    },
}

impl std::fmt::Display for MapsServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MapsServiceError::Internal(e) => write!(f, "Internal error: {}", e),
            MapsServiceError::Status {
                status,
                message: Some(message),
            } => write!(f, "Places API returned {}: {}", status, message),
            MapsServiceError::Status {
                status,
                message: None,
            } => write!(f, "Places API returned {}", status),
        }
    }
}
