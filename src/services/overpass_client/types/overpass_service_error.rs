pub enum OverpassServiceError {
    Request(String),
    Status(u16),
    InvalidResponse(String),
}

impl std::fmt::Display for OverpassServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OverpassServiceError::Request(e) => write!(f, "Request failed: {}", e),
            OverpassServiceError::Status(code) => write!(f, "Overpass returned status {}", code),
            OverpassServiceError::InvalidResponse(e) => write!(f, "Invalid response: {}", e),
        }
    }
}
