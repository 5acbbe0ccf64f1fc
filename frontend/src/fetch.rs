//! Fetch-on-mount, scoped to the lifetime of the view.
//!
//! Each load runs under a [`ViewScope`]. Unmounting the page or changing its
//! route parameters aborts the scope, and whatever the aborted request
//! returns is thrown away instead of overwriting newer state.

use std::future::Future;
use std::rc::Rc;

use log::{debug, error};
use web_sys::{AbortController, AbortSignal};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::error::ApiError;

/// `Idle → Loading → {Loaded, Failed}`; a reload goes back to `Loading`.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn begin() -> Self {
        FetchState::Loading
    }

    /// Outcome of a finished request, `None` when it was cancelled and
    /// must not touch the state.
    pub fn settle(result: Result<T, ApiError>) -> Option<Self> {
        match result {
            Ok(value) => Some(FetchState::Loaded(value)),
            Err(e) if e.is_aborted() => None,
            Err(e) => Some(FetchState::Failed(e.to_string())),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(v) => Some(v),
            _ => None,
        }
    }
}

/// Owns the abort controller for one load; dropping it aborts.
pub struct ViewScope {
    controller: Option<AbortController>,
}

impl ViewScope {
    pub fn new() -> Self {
        let controller = AbortController::new()
            .map_err(|e| error!("AbortController unavailable: {e:?}"))
            .ok();
        Self { controller }
    }

    pub fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().map(AbortController::signal)
    }

    pub fn cancel(&self) {
        if let Some(c) = &self.controller {
            c.abort();
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Reload counter. Bumped through a reducer so handles captured by older
/// renders still step from the live value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generation(u32);

pub enum GenerationAction {
    Bump,
}

impl Reducible for Generation {
    type Action = GenerationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            GenerationAction::Bump => Rc::new(Generation(self.0.wrapping_add(1))),
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct FetchHandle<T> {
    state: UseStateHandle<FetchState<T>>,
    generation: UseReducerHandle<Generation>,
}

impl<T> FetchHandle<T> {
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Re-runs the loader. Every mutation ends with this.
    pub fn reload(&self) {
        self.generation.dispatch(GenerationAction::Bump);
    }

    pub fn reload_callback<E>(&self) -> Callback<E>
    where
        T: 'static,
    {
        let handle = FetchHandle {
            state: self.state.clone(),
            generation: self.generation.clone(),
        };
        Callback::from(move |_| handle.reload())
    }
}

/// Loads `loader(deps, signal)` on mount, whenever `deps` changes and on
/// every [`FetchHandle::reload`].
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, loader: F) -> FetchHandle<T>
where
    T: 'static,
    D: Clone + PartialEq + 'static,
    F: FnOnce(D, Option<AbortSignal>) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = use_state(|| FetchState::Idle);
    let generation = use_reducer(Generation::default);

    {
        let state = state.clone();
        use_effect_with((deps, *generation), move |(deps, _)| {
            let scope = ViewScope::new();
            let signal = scope.signal();
            let deps = deps.clone();

            state.set(FetchState::begin());
            spawn_local(async move {
                let result = loader(deps, signal).await;
                match FetchState::settle(result) {
                    Some(next) => {
                        if let FetchState::Failed(reason) = &next {
                            error!("load failed: {reason}");
                        }
                        state.set(next);
                    }
                    None => debug!("dropped response of a cancelled load"),
                }
            });

            move || drop(scope)
        });
    }

    FetchHandle { state, generation }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_loads_and_failure_fails() {
        assert_eq!(FetchState::settle(Ok(3)), Some(FetchState::Loaded(3)));
        let failed = FetchState::<i32>::settle(Err(ApiError::Status { status: 404, message: None }));
        assert_eq!(failed, Some(FetchState::Failed("HTTP 404".into())));
    }

    #[test]
    fn cancelled_response_never_transitions() {
        assert_eq!(FetchState::<Vec<u8>>::settle(Err(ApiError::Aborted)), None);
    }

    #[test]
    fn every_reload_moves_to_a_new_generation() {
        let start = Rc::new(Generation::default());
        let first = Rc::clone(&start).reduce(GenerationAction::Bump);
        let second = Rc::clone(&first).reduce(GenerationAction::Bump);
        assert_ne!(*first, *start);
        assert_ne!(*second, *first);
        assert_eq!(*second, Generation(2));
    }

    #[test]
    fn generation_wraps_instead_of_overflowing() {
        let last = Rc::new(Generation(u32::MAX));
        assert_eq!(*last.reduce(GenerationAction::Bump), Generation(0));
    }

    #[test]
    fn reload_restarts_from_loading() {
        let mut state = FetchState::Loaded(vec![1, 2]);
        assert_eq!(state.loaded(), Some(&vec![1, 2]));
        state = FetchState::begin();
        assert_eq!(state, FetchState::Loading);
        assert_eq!(state.loaded(), None);
    }
}
