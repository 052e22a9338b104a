//! Store for a booking session.
//!
//! Wraps the reducer with shared state and drives the effects it returns.
//! Each dispatched action is one atomic transition: the write lock is held
//! only while the reducer runs, never across an await, so effect execution
//! can overlap dispatches without any transition observing a half-updated
//! state.

use cinebook_core::{effect::Effect, reducer::Reducer};
use futures::future::{BoxFuture, join_all};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::actions::BookingAction;
use super::environment::BookingEnvironment;
use super::reducer::BookingReducer;
use super::types::BookingState;
use crate::types::{OrderTotals, ScreeningEvent};

/// Store for one booking session
pub struct BookingStore {
    state: Arc<RwLock<BookingState>>,
    reducer: BookingReducer,
    env: BookingEnvironment,
}

impl BookingStore {
    /// Start a session for a screening event
    #[must_use]
    pub fn new(event: ScreeningEvent, env: BookingEnvironment) -> Self {
        Self {
            state: Arc::new(RwLock::new(BookingState::new(event))),
            reducer: BookingReducer::new(),
            env,
        }
    }

    /// Dispatch an action and run its effects to completion
    ///
    /// Actions produced by effects (coupon results, payment settlement) are
    /// fed back through the reducer before this returns.
    pub async fn dispatch(&self, action: BookingAction) {
        tracing::debug!(?action, "dispatching booking action");

        let effects = {
            let mut state = self.state.write().await;
            self.reducer.reduce(&mut state, action, &self.env)
        };

        for effect in effects {
            self.run_effect(effect).await;
        }
    }

    fn run_effect(&self, effect: Effect<BookingAction>) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            match effect {
                Effect::None => {}
                Effect::Future(future) => {
                    if let Some(action) = future.await {
                        self.dispatch(action).await;
                    }
                }
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    self.dispatch(*action).await;
                }
                Effect::Parallel(effects) => {
                    join_all(effects.into_iter().map(|effect| self.run_effect(effect))).await;
                }
                Effect::Sequential(effects) => {
                    for effect in effects {
                        self.run_effect(effect).await;
                    }
                }
            }
        })
    }

    /// Snapshot of the current session state
    pub async fn state(&self) -> BookingState {
        self.state.read().await.clone()
    }

    /// Current order summary, derived fresh from the state
    pub async fn totals(&self) -> OrderTotals {
        self.state.read().await.totals()
    }
}
