use std::collections::HashMap;

/// Event handlers the host makes available to a document.
///
/// An attribute such as `on_press: calculate` names a handler; when a
/// registry is given to the [`Loader`](crate::Loader) the name is looked up
/// here and the handler travels to the toolkit with the widget.
///
/// `H` is whatever the host toolkit calls: typically an `Rc<dyn Fn(..)>`.
pub struct HandlerRegistry<H> {
    handlers: HashMap<String, H>,
}

impl<H> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self { handlers: HashMap::new() }
    }

    pub fn with(mut self, name: impl Into<String>, handler: H) -> Self {
        self.register(name, handler);
        self
    }

    /// Register `handler` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, handler: H) {
        self.handlers.insert(name.into(), handler);
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.handlers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

/// Attribute keys of this form name an event handler.
pub fn is_handler_key(key: &str) -> bool {
    key.starts_with("on_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = HandlerRegistry::new().with("calculate", 1);
        registry.register("reset", 2);
        registry.register("calculate", 3);

        assert_eq!(registry.get("calculate"), Some(&3));
        assert!(registry.contains("reset"));
        assert!(!registry.contains("launch"));
        assert_eq!(registry.names(), vec!["calculate", "reset"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn handler_keys() {
        assert!(is_handler_key("on_press"));
        assert!(!is_handler_key("online"));
        assert!(!is_handler_key("text"));
    }
}
