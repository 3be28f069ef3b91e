//! Post-resolution value processing.
//!
//! Processors transform a resolved raw value before conversion, e.g.
//! decoding or decryption. They run in registration order through a
//! [`ProcessorChain`].

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ProcessingError;

/// A single post-resolution transform.
pub trait Processor: Send + Sync {
    fn process(&self, value: &str) -> Result<String, ProcessingError>;
}

/// Ordered pipeline of processors.
#[derive(Default)]
pub struct ProcessorChain {
    processors: Vec<Arc<dyn Processor>>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor to the end of the pipeline.
    pub fn register(&mut self, processor: Arc<dyn Processor>) {
        self.processors.push(processor);
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Run all processors over `value` in registration order.
    pub fn process(&self, value: String) -> Result<String, ProcessingError> {
        let mut current = value;
        for processor in &self.processors {
            current = processor.process(&current)?;
        }
        Ok(current)
    }
}

/// Decodes standard base64 values into UTF-8 strings.
pub struct Base64Processor;

impl Processor for Base64Processor {
    fn process(&self, value: &str) -> Result<String, ProcessingError> {
        let bytes = STANDARD
            .decode(value)
            .map_err(|e| ProcessingError::failed("base64", e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ProcessingError::failed("base64", e.to_string()))
    }
}
