//! Stack navigation over serializable configurations.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Failed to encode navigation state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to decode navigation state: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Navigation state has no entries")]
    Empty,
}

type Factory<C, T> = Box<dyn Fn(&C) -> T + Send + Sync>;

/// Stack of `(configuration, child)` pairs.
///
/// Configurations are plain data describing a destination; children are
/// built from them by the factory. The stack is never empty: popping the
/// last entry is refused. Removed children are dropped, which disposes
/// them.
pub struct ChildStack<C, T> {
    entries: Vec<(C, T)>,
    factory: Factory<C, T>,
    configs: watch::Sender<Vec<C>>,
}

impl<C, T> ChildStack<C, T>
where
    C: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: C, factory: impl Fn(&C) -> T + Send + Sync + 'static) -> Self {
        let factory: Factory<C, T> = Box::new(factory);
        let child = factory(&initial);
        Self {
            configs: watch::channel(vec![initial.clone()]).0,
            entries: vec![(initial, child)],
            factory,
        }
    }

    /// Rebuild a stack from saved configurations, bottom first.
    pub fn restore(
        configs: Vec<C>,
        factory: impl Fn(&C) -> T + Send + Sync + 'static,
    ) -> Result<Self, NavigationError> {
        if configs.is_empty() {
            return Err(NavigationError::Empty);
        }
        let factory: Factory<C, T> = Box::new(factory);
        let entries = configs
            .iter()
            .map(|config| (config.clone(), factory(config)))
            .collect();
        Ok(Self {
            configs: watch::channel(configs).0,
            entries,
            factory,
        })
    }

    pub fn push(&mut self, config: C) {
        let child = (self.factory)(&config);
        self.entries.push((config, child));
        self.publish();
    }

    /// Pop the top entry. Returns `false` when only the root is left.
    pub fn pop(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.entries.pop();
        self.publish();
        true
    }

    /// Swap the top entry for `config`.
    pub fn replace_top(&mut self, config: C) {
        let child = (self.factory)(&config);
        if let Some(top) = self.entries.last_mut() {
            *top = (config, child);
        }
        self.publish();
    }

    pub fn active(&self) -> &T {
        &self.top().1
    }

    pub fn active_config(&self) -> &C {
        &self.top().0
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn configs(&self) -> Vec<C> {
        self.entries.iter().map(|(config, _)| config.clone()).collect()
    }

    /// Observable list of configurations, bottom first.
    pub fn watch_configs(&self) -> watch::Receiver<Vec<C>> {
        self.configs.subscribe()
    }

    pub fn children(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, child)| child)
    }

    fn top(&self) -> &(C, T) {
        // `new` and `restore` guarantee one entry and `pop` keeps it.
        &self.entries[self.entries.len() - 1]
    }

    fn publish(&self) {
        let configs = self.configs();
        self.configs.send_if_modified(|current| {
            if *current == configs {
                false
            } else {
                *current = configs;
                true
            }
        });
    }
}

impl<C, T> ChildStack<C, T>
where
    C: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn save_json(&self) -> Result<String, NavigationError> {
        serde_json::to_string_pretty(&self.configs()).map_err(NavigationError::Encode)
    }

    pub fn restore_json(
        json: &str,
        factory: impl Fn(&C) -> T + Send + Sync + 'static,
    ) -> Result<Self, NavigationError> {
        let configs: Vec<C> = serde_json::from_str(json).map_err(NavigationError::Decode)?;
        Self::restore(configs, factory)
    }
}
