//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::models::ResolutionRequest;
use crate::sources::{PdfSource, RequiredField, SourceError};

/// A mock source that returns a scripted outcome.
///
/// Records how many times it was invoked so tests can assert that the
/// chain short-circuits.
#[derive(Debug)]
pub struct MockPdfSource {
    id: String,
    requires: RequiredField,
    outcome: Mutex<Option<Result<String, SourceError>>>,
    calls: Mutex<usize>,
}

impl MockPdfSource {
    /// Create a mock with no scripted outcome (locating reports not-found)
    pub fn new(id: impl Into<String>, requires: RequiredField) -> Self {
        Self {
            id: id.into(),
            requires,
            outcome: Mutex::new(None),
            calls: Mutex::new(0),
        }
    }

    /// Script a successful outcome
    pub fn succeeding(id: impl Into<String>, requires: RequiredField, url: &str) -> Self {
        let mock = Self::new(id, requires);
        mock.set_outcome(Ok(url.to_string()));
        mock
    }

    /// Script a failing outcome
    pub fn failing(id: impl Into<String>, requires: RequiredField, error: SourceError) -> Self {
        let mock = Self::new(id, requires);
        mock.set_outcome(Err(error));
        mock
    }

    /// Set the outcome returned by the next `locate` calls
    pub fn set_outcome(&self, outcome: Result<String, SourceError>) {
        let mut guard = self.outcome.lock().unwrap();
        *guard = Some(outcome);
    }

    /// Number of times `locate` ran
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PdfSource for MockPdfSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn requires(&self) -> RequiredField {
        self.requires
    }

    async fn locate(&self, _request: &ResolutionRequest) -> Result<String, SourceError> {
        *self.calls.lock().unwrap() += 1;

        let guard = self.outcome.lock().unwrap();
        match &*guard {
            Some(Ok(url)) => Ok(url.clone()),
            Some(Err(SourceError::NotFound(msg))) => Err(SourceError::NotFound(msg.clone())),
            Some(Err(SourceError::Network(msg))) => Err(SourceError::Network(msg.clone())),
            Some(Err(SourceError::Api(msg))) => Err(SourceError::Api(msg.clone())),
            Some(Err(SourceError::Parse(msg))) => Err(SourceError::Parse(msg.clone())),
            Some(Err(SourceError::InvalidRequest(msg))) => {
                Err(SourceError::InvalidRequest(msg.clone()))
            }
            None => Err(SourceError::NotFound("nothing scripted".to_string())),
        }
    }
}
