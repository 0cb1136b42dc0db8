//! Notifications between game state and UI
//!
//! Handlers subscribe per [`EventType`] and receive events synchronously
//! from [`EventSystem::emit`]. Events carry named arguments. A handler may
//! stop propagation by returning `true`, except for broadcast types (score
//! and game-over notifications), which always reach every subscriber.

use std::collections::HashMap;

use log::trace;

/// Kinds of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// The session score changed
    ScoreChanged,
    /// The session ended in a game over
    GameOver,
    /// A gameplay session started
    SessionStarted,
    /// A gameplay session was torn down
    SessionEnded,
    /// A scene finished loading
    SceneLoaded,
}

impl EventType {
    /// Whether every subscriber sees the event regardless of what earlier
    /// handlers return
    pub fn is_broadcast(self) -> bool {
        matches!(self, Self::ScoreChanged | Self::GameOver)
    }
}

/// Typed argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventArg {
    /// Score value
    Score(i32),
    /// Scene name
    Scene(String),
}

/// A notification with named arguments
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened
    pub event_type: EventType,
    /// Game time of the event in seconds
    pub timestamp: f64,
    args: HashMap<&'static str, EventArg>,
}

impl Event {
    /// Event without arguments
    pub fn new(event_type: EventType, timestamp: f64) -> Self {
        Self {
            event_type,
            timestamp,
            args: HashMap::new(),
        }
    }

    /// Attach a named argument
    #[must_use]
    pub fn with_arg(mut self, key: &'static str, value: EventArg) -> Self {
        self.args.insert(key, value);
        self
    }

    /// Argument stored under `key`
    pub fn get_arg(&self, key: &str) -> Option<&EventArg> {
        self.args.get(key)
    }

    /// The `score` argument
    pub fn get_score(&self) -> Option<i32> {
        match self.get_arg("score") {
            Some(EventArg::Score(score)) => Some(*score),
            _ => None,
        }
    }

    /// The `scene` argument
    pub fn get_scene(&self) -> Option<&str> {
        match self.get_arg("scene") {
            Some(EventArg::Scene(name)) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Receives events of the types it was registered for.
///
/// Returning `true` marks the event as consumed; later handlers of the same
/// type do not see it. The return value is ignored for broadcast types.
pub trait EventHandler {
    /// React to `event`
    fn on_event(&mut self, event: &Event) -> bool;
}

struct FnHandler<F>(F);

impl<F: FnMut(&Event) -> bool> EventHandler for FnHandler<F> {
    fn on_event(&mut self, event: &Event) -> bool {
        (self.0)(event)
    }
}

/// Identifies a registered handler so it can be removed again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type HandlerList = Vec<(HandlerId, Box<dyn EventHandler>)>;

/// Handler registry
pub struct EventSystem {
    handlers: HashMap<EventType, HandlerList>,
    now: f64,
    next_id: u64,
}

impl EventSystem {
    /// System without handlers
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            now: 0.0,
            next_id: 0,
        }
    }

    /// Set the time stamped on events built from this system
    pub fn update_time(&mut self, time: f64) {
        self.now = time;
    }

    /// Time last set with [`EventSystem::update_time`]
    pub fn current_time(&self) -> f64 {
        self.now
    }

    /// Add a handler for `event_type`. Handlers run in registration order.
    pub fn register_handler(&mut self, event_type: EventType, handler: Box<dyn EventHandler>) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(event_type).or_default().push((id, handler));
        id
    }

    /// Add a closure as a handler
    pub fn subscribe<F>(&mut self, event_type: EventType, handler: F) -> HandlerId
    where
        F: FnMut(&Event) -> bool + 'static,
    {
        self.register_handler(event_type, Box::new(FnHandler(handler)))
    }

    /// Remove a handler. Returns `false` if it was not registered.
    pub fn unregister_handler(&mut self, id: HandlerId) -> bool {
        self.handlers.values_mut().any(|list| {
            let before = list.len();
            list.retain(|(handler_id, _)| *handler_id != id);
            list.len() != before
        })
    }

    /// Number of handlers registered for an event type
    pub fn handler_count(&self, event_type: EventType) -> usize {
        self.handlers.get(&event_type).map_or(0, Vec::len)
    }

    /// Deliver an event to its handlers right away
    pub fn emit(&mut self, event: &Event) {
        trace!("Delivering {:?}", event.event_type);
        let Some(list) = self.handlers.get_mut(&event.event_type) else {
            return;
        };
        let broadcast = event.event_type.is_broadcast();
        for (_, handler) in list.iter_mut() {
            if handler.on_event(event) && !broadcast {
                break;
            }
        }
    }
}

impl Default for EventSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSystem")
            .field("handler_types", &self.handlers.len())
            .field("now", &self.now)
            .finish()
    }
}
