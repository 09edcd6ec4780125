use std::fmt;

/// Health reported by a registered service
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceHealth {
    Healthy,
    /// Running, but has not produced its first result yet
    Starting,
    /// Running on stale or partial data
    Degraded(String),
    /// Running without usable data
    Unhealthy(String),
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ServiceHealth::Healthy)
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, ServiceHealth::Unhealthy(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceHealth::Healthy => "healthy",
            ServiceHealth::Starting => "starting",
            ServiceHealth::Degraded(_) => "degraded",
            ServiceHealth::Unhealthy(_) => "unhealthy",
        }
    }
}

impl fmt::Display for ServiceHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceHealth::Degraded(detail) | ServiceHealth::Unhealthy(detail) => {
                write!(f, "{} ({})", self.label(), detail)
            }
            _ => f.write_str(self.label()),
        }
    }
}
