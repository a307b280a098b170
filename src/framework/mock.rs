//! # Mock Framework
//!
//! A [`MockClient`] hands out a real [`ResourceClient`] whose requests are answered from a
//! queue of scripted expectations instead of a running store. It is the easiest way to inject
//! failures that a healthy in-process store never produces: closed channels, timeouts and
//! store-side refusals.
//!
//! ```rust,ignore
//! let mut users = MockClient::<User>::new();
//! users.expect_get("A".to_string()).return_err(FrameworkError::ActorClosed);
//!
//! let client = UserClient::new(users.client());
//! // ... exercise code that uses the client ...
//! users.verify(); // every expectation consumed
//! ```
//!
//! [`MockClient::request_count`] reports how many requests reached the mock, which is how
//! tests prove that a rejected call never touched the backend.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

/// Represents an expected request to the mock client.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Find {
        response: Result<Option<T>, FrameworkError>,
    },
    FindOrCreate {
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    requests: Arc<AtomicUsize>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let requests = Arc::new(AtomicUsize::new(0));
        let expectations_clone = expectations.clone();
        let requests_clone = requests.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                requests_clone.fetch_add(1, Ordering::SeqCst);
                let expectation = expectations_clone.lock().unwrap_or_else(PoisonError::into_inner).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Get for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Find { respond_to, .. }, Some(Expectation::Find { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::FindOrCreate { respond_to, .. },
                        Some(Expectation::FindOrCreate { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Action for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            requests,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Number of requests that reached the mock so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `find` operation.
    pub fn expect_find(&mut self) -> ExpectationBuilder<T, Option<T>> {
        self.builder(|response| Expectation::Find { response })
    }

    /// Expects a `find_or_create` operation.
    pub fn expect_find_or_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::FindOrCreate { response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap_or_else(PoisonError::into_inner);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder that records the response for one expectation.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap_or_else(PoisonError::into_inner).push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<User>::new();
        mock.expect_get("A".to_string())
            .return_ok(Some(User::new("A", "alice", "0001")));
        mock.expect_get("B".to_string())
            .return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        let found = client.get("A".to_string()).await.unwrap().unwrap();
        assert_eq!(found.username, "alice");

        let failed = client.get("B".to_string()).await;
        assert!(matches!(failed, Err(FrameworkError::ActorClosed)));

        assert_eq!(mock.request_count(), 2);
        mock.verify();
    }
}
