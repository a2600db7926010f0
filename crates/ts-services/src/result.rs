//! Service output type

/// A successful service call: its result plus a message for display
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceOutput<T> {
    result: T,
    message: String,
}

impl<T> ServiceOutput<T> {
    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self {
            result,
            message: message.into(),
        }
    }

    pub fn result(&self) -> &T {
        &self.result
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_parts(self) -> (T, String) {
        (self.result, self.message)
    }
}
