//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

pub mod clock {
    //! Controllable clocks for expiry tests.

    use std::sync::{Mutex, MutexGuard};
    use std::time::Duration;

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Fixed instant used as "now" by default.
    ///
    /// # Examples
    /// ```
    /// use taskboard::test_support::clock::fixture_now;
    ///
    /// assert_eq!(fixture_now().timestamp(), 1_767_225_600);
    /// ```
    pub fn fixture_now() -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).single() {
            Some(now) => now,
            None => panic!("fixture timestamp must be unambiguous"),
        }
    }

    /// Clock whose time only moves when told to.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance(&self, delta: Duration) {
            let delta = match TimeDelta::from_std(delta) {
                Ok(delta) => delta,
                Err(error) => {
                    panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
                }
            };
            *self.lock_clock() += delta;
        }

        pub fn advance_seconds(&self, seconds: u64) {
            self.advance(Duration::from_secs(seconds));
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    impl Default for MutableClock {
        fn default() -> Self {
            Self::new(fixture_now())
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod board {
    //! In-memory board wiring for HTTP tests.

    use std::sync::Arc;

    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::{App, web};
    use mockable::Clock;

    use super::clock::MutableClock;
    use crate::Trace;
    use crate::domain::ports::CredentialService;
    use crate::domain::{AccountServiceImpl, ActorPolicy, BoardServiceImpl, ContextResolver};
    use crate::inbound::http::rpc_scope;
    use crate::inbound::http::state::HttpState;
    use crate::outbound::credentials::{JwtCredentialService, TokenSecret};
    use crate::outbound::memory::InMemoryBoardStore;

    /// Signing secret shared by test boards.
    pub const TEST_SECRET: &[u8] = b"test-secret-0123456789abcdef0123";

    /// A fully wired board backed by the in-memory store and a
    /// [`MutableClock`].
    pub struct TestBoard {
        pub state: HttpState,
        pub clock: Arc<MutableClock>,
        pub store: Arc<InMemoryBoardStore>,
    }

    impl TestBoard {
        /// Wire a board acting under `policy`.
        pub fn new(policy: ActorPolicy) -> Self {
            let clock = Arc::new(MutableClock::default());
            let store = Arc::new(InMemoryBoardStore::new());
            let shared_clock: Arc<dyn Clock> = clock.clone();
            let credentials: Arc<dyn CredentialService> = Arc::new(JwtCredentialService::new(
                TokenSecret::new(TEST_SECRET),
                shared_clock.clone(),
            ));
            let state = HttpState::new(
                Arc::new(AccountServiceImpl::new(
                    store.clone(),
                    credentials.clone(),
                    shared_clock,
                )),
                Arc::new(BoardServiceImpl::new(store.clone(), store.clone(), policy)),
                ContextResolver::new(credentials),
            );
            Self {
                state,
                clock,
                store,
            }
        }
    }

    impl Default for TestBoard {
        fn default() -> Self {
            Self::new(ActorPolicy::default())
        }
    }

    /// Application serving the procedures behind the trace middleware.
    pub fn test_app(
        state: HttpState,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(rpc_scope())
    }
}
