/// Log tags identify the subsystem a message comes from
///
/// Each tag maps to a `--debug-<key>` command-line flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTag {
    System,
    Api,
    Pricing,
    Webserver,
    Config,
    Other(String),
}

impl LogTag {
    /// Key used in `--debug-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Api => "api".to_string(),
            LogTag::Pricing => "pricing".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uncolored label used in fixed-width output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::System => "SYSTEM".to_string(),
            LogTag::Api => "API".to_string(),
            LogTag::Pricing => "PRICING".to_string(),
            LogTag::Webserver => "WEBSERVER".to_string(),
            LogTag::Config => "CONFIG".to_string(),
            LogTag::Other(name) => name.to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
