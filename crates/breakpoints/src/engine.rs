//! Lifecycle and signal routing.

use crate::classify::{PassSummary, classify, strip};
use crate::config::{Config, InitOn, Options};
use crate::discovery::{Module, discover};
use crate::error::{ConfigError, ModuleError};
use crate::host::{Host, Signal};
use crate::ordering::order_modules;
use log::debug;

/// Where an engine is in its lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    #[default]
    Uninitialized,
    /// Waiting for a startup signal from the host.
    Initializing,
    /// Registry built and classified; resize signals reclassify.
    Ready,
    /// Torn down. `init` or `re_init` starts over.
    Destroyed,
}

/// A breakpoint engine bound to one configuration.
///
/// The engine holds no reference to the document; every entry point takes the
/// host explicitly. Signals the engine subscribed to are routed back in through
/// [`Engine::handle_signal`].
#[derive(Debug)]
pub struct Engine<H: Host> {
    config: Config,
    state: State,
    /// Startup signal being waited on while `Initializing`.
    awaiting: Option<Signal>,
    registry: Option<Vec<Module<H::Node>>>,
    errors: Vec<ModuleError>,
    /// Host subscriptions made so far. Only ever grows.
    subscriptions: Vec<Signal>,
}

impl<H: Host> Engine<H> {
    /// Create an engine with `options` merged over the defaults. Does not touch the page.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the merged configuration is invalid.
    pub fn new(options: Options) -> Result<Self, ConfigError> {
        Ok(Self::with_config(Config::from_options(options)?))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            state: State::Uninitialized,
            awaiting: None,
            registry: None,
            errors: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Create an engine and immediately [`init`](Self::init) it.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the merged configuration is invalid.
    pub fn attach(options: Options, host: &mut H) -> Result<Self, ConfigError> {
        let mut engine = Self::new(options)?;
        engine.init(host);
        Ok(engine)
    }

    /// Start the engine according to the configured deferral strategy.
    ///
    /// Deferred strategies run at once when the host reports the signal has
    /// already fired; otherwise startup waits for the first matching signal.
    pub fn init(&mut self, host: &mut H) {
        let signal = match self.config.init_on {
            InitOn::Immediate => None,
            InitOn::DocumentReady => Some(Signal::DocumentReady),
            InitOn::WindowLoad => Some(Signal::WindowLoad),
        };

        match signal {
            Some(signal) if !host.has_fired(signal) => {
                debug!("breakpoint engine waiting for {signal:?}");
                self.subscribe(host, signal);
                self.awaiting = Some(signal);
                self.state = State::Initializing;
            }
            _ => self.start(host),
        }
    }

    /// Route a host signal.
    ///
    /// Startup signals only matter while waiting for them, and only the first
    /// one counts. Resize and reclassify requests run a pass when ready and are
    /// ignored otherwise.
    pub fn handle_signal(&mut self, host: &mut H, signal: Signal) {
        match signal {
            Signal::DocumentReady | Signal::WindowLoad => {
                if self.state == State::Initializing && self.awaiting == Some(signal) {
                    self.start(host);
                }
            }
            Signal::Resize | Signal::Reclassify => {
                if self.state == State::Ready && self.subscriptions.contains(&signal) {
                    self.update_classes(host);
                }
            }
        }
    }

    /// Run one classification pass over the registry.
    ///
    /// Returns `None` without touching the page when there is no registry,
    /// i.e. before startup or after [`destroy`](Self::destroy).
    pub fn update_classes(&mut self, host: &mut H) -> Option<PassSummary> {
        let modules = self.registry.as_deref()?;
        let summary = classify(host, &self.config, modules);
        if !summary.is_quiet() {
            debug!(
                "classified {} modules: {} classes added, {} removed",
                summary.modules, summary.added, summary.removed
            );
        }
        Some(summary)
    }

    /// Strip every class and attribute the engine applied and drop the registry.
    ///
    /// Subscriptions stay with the host; signals arriving afterwards are no-ops.
    pub fn destroy(&mut self, host: &mut H) {
        if let Some(modules) = self.registry.take() {
            strip(host, &self.config, &modules);
            debug!("breakpoint engine destroyed, {} modules released", modules.len());
        }
        self.awaiting = None;
        self.errors.clear();
        self.state = State::Destroyed;
    }

    /// Full rebuild: [`destroy`](Self::destroy) then [`init`](Self::init).
    pub fn re_init(&mut self, host: &mut H) {
        self.destroy(host);
        self.init(host);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registry in classification order. Empty when there is no registry.
    pub fn modules(&self) -> &[Module<H::Node>] {
        self.registry.as_deref().unwrap_or_default()
    }

    /// Overrides rejected by the most recent discovery.
    pub fn errors(&self) -> &[ModuleError] {
        &self.errors
    }

    fn start(&mut self, host: &mut H) {
        self.state = State::Initializing;
        self.awaiting = None;

        let discovery = discover(host, &self.config);
        let mut modules = discovery.modules;
        order_modules(&mut modules);
        debug!(
            "discovered {} modules matching {} ({} rejected overrides)",
            modules.len(),
            self.config.selector(),
            discovery.errors.len()
        );
        self.errors = discovery.errors;
        self.registry = Some(modules);
        self.update_classes(host);

        if self.config.bind_resize {
            self.subscribe(host, Signal::Resize);
        }
        self.subscribe(host, Signal::Reclassify);
        self.state = State::Ready;
    }

    fn subscribe(&mut self, host: &mut H, signal: Signal) {
        if !self.subscriptions.contains(&signal) {
            host.subscribe(signal);
            self.subscriptions.push(signal);
        }
    }
}
