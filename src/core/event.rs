//! Lifecycle events delivered to plugin subscribers.

use crate::core::requirement::Module;
use crate::models::options::FixerOptions;
use std::path::{Path, PathBuf};

/// Sent once when the plugin is activated for a project.
#[derive(Debug, Clone)]
pub struct ActivateEvent {
    root: PathBuf,
    verbose: bool,
}

impl ActivateEvent {
    pub fn new(root: PathBuf, verbose: bool) -> Self {
        Self { root, verbose }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Sent after dependencies are installed, carrying the installed modules.
pub struct ConfigureEvent<'a> {
    modules: Vec<&'a dyn Module>,
    options: FixerOptions,
}

impl<'a> ConfigureEvent<'a> {
    pub fn new(modules: Vec<&'a dyn Module>, options: FixerOptions) -> Self {
        Self { modules, options }
    }

    pub fn modules(&self) -> &[&'a dyn Module] {
        &self.modules
    }

    pub fn options(&self) -> &FixerOptions {
        &self.options
    }
}

pub enum Event<'a> {
    Activate(ActivateEvent),
    Configure(ConfigureEvent<'a>),
}

impl Event<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Event::Activate(_) => "activate",
            Event::Configure(_) => "configure",
        }
    }
}

pub trait Subscriber {
    fn on_activate(&mut self, _event: &ActivateEvent) {}

    fn on_configure(&mut self, event: &ConfigureEvent<'_>);
}

/// Deliver `event` to each subscriber in order.
pub fn dispatch(subscribers: &mut [&mut dyn Subscriber], event: &Event<'_>) {
    tracing::debug!(event = event.name(), subscribers = subscribers.len(), "dispatch");
    for subscriber in subscribers.iter_mut() {
        match event {
            Event::Activate(e) => subscriber.on_activate(e),
            Event::Configure(e) => subscriber.on_configure(e),
        }
    }
}
