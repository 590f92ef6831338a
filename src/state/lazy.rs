//! Load lifecycle for screens whose data arrives after first render.

#[cfg(test)]
#[path = "lazy_test.rs"]
mod lazy_test;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    /// Enter `Loading` from `NotLoaded` or `Failed`. Returns whether a load
    /// should be started; `false` while one is already in flight or done.
    pub fn begin(&mut self) -> bool {
        match self {
            LoadState::NotLoaded | LoadState::Failed(_) => {
                *self = LoadState::Loading;
                true
            }
            LoadState::Loading | LoadState::Ready(_) => false,
        }
    }

    /// Like `begin`, but only from `Failed`.
    pub fn retry(&mut self) -> bool {
        matches!(self, LoadState::Failed(_)) && self.begin()
    }

    /// Record a load result. Ignored unless a load is in flight.
    pub fn finish(&mut self, result: Result<T, String>) {
        if !matches!(self, LoadState::Loading) {
            return;
        }
        *self = match result {
            Ok(value) => LoadState::Ready(value),
            Err(message) => LoadState::Failed(message),
        };
    }

    /// Drop any loaded value so the next `begin` reloads.
    pub fn reset(&mut self) {
        *self = LoadState::NotLoaded;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::NotLoaded | LoadState::Loading)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
