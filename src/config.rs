//! Router configuration

/// Settings fixed when the router is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Panic on closure shape mismatch instead of skipping the invocation
    pub strict_shapes: bool,

    /// Initial capacity of the binding map
    pub capacity: usize,
}

impl RouterConfig {
    pub fn new() -> Self {
        Self {
            strict_shapes: cfg!(debug_assertions),
            capacity: 64,
        }
    }

    /// Set the shape mismatch policy
    pub fn with_strict_shapes(mut self, strict: bool) -> Self {
        self.strict_shapes = strict;
        self
    }

    /// Set the initial binding map capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}
