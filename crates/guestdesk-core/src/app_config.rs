#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What the order mapper does with a row that carries no usable id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingIdPolicy {
    /// Assign a random `order_xxxxxxxx` id so the row is still surfaced.
    #[default]
    Generate,
    /// Treat the row as unmappable and leave it out of the result.
    Drop,
}

impl std::fmt::Display for MissingIdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingIdPolicy::Generate => write!(f, "generate"),
            MissingIdPolicy::Drop => write!(f, "drop"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Deepest object level the array locator descends to.
    pub orders_max_depth: usize,
    pub orders_missing_id: MissingIdPolicy,
    /// Maximum number of characters of an unparsable body echoed back in errors.
    pub orders_sample_len: usize,
}
