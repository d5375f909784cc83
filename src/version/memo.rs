//! Resolve-once slots for lazily computed facts

use std::cell::RefCell;

use crate::version::error::VersionError;

#[derive(Debug)]
enum State<T> {
    Unresolved,
    Resolving,
    Resolved(T),
}

/// A value computed on first access and reused afterwards.
///
/// A failed computation leaves the slot `Unresolved`, so the next access
/// retries from scratch instead of observing a half-filled value.
#[derive(Debug)]
pub(crate) struct Memo<T> {
    name: &'static str,
    state: RefCell<State<T>>,
}

impl<T: Clone> Memo<T> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            state: RefCell::new(State::Unresolved),
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self) -> Option<T> {
        match &*self.state.borrow() {
            State::Resolved(value) => Some(value.clone()),
            _ => None,
        }
    }

    pub(crate) fn get_or_try_init(
        &self,
        init: impl FnOnce() -> Result<T, VersionError>,
    ) -> Result<T, VersionError> {
        match &*self.state.borrow() {
            State::Resolved(value) => return Ok(value.clone()),
            State::Resolving => return Err(VersionError::ReentrantResolution(self.name)),
            State::Unresolved => {}
        }

        self.state.replace(State::Resolving);
        match init() {
            Ok(value) => {
                self.state.replace(State::Resolved(value.clone()));
                Ok(value)
            }
            Err(e) => {
                self.state.replace(State::Unresolved);
                Err(e)
            }
        }
    }
}
