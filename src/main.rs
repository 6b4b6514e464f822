//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the geolookup
//! library and the Zellij plugin system. It implements the `ZellijPlugin`
//! trait, translates host events into library events, and turns library
//! actions into host calls.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │
//! │  │     State (plugin)     │  │  ← event mapping, action execution
//! │  └────────────────────────┘  │
//! │     │ web_request   ▲        │
//! │     ▼               │        │
//! │  ┌────────────────────────┐  │
//! │  │  Host HTTP / timers    │  │  ← WebRequestResult, Timer
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, Mouse, Timer, Visible, `WebRequestResult` events
//! 3. **Update**: Map events, delegate to `handle_event`, execute actions
//! 4. **Render**: Draw the view model and keep it for mouse hit-testing
//!
//! # Host Correlation
//!
//! Host timers cannot be cancelled and come back only as a duration, so every
//! `StartTimer` is recorded in a [`TimerQueue`] that maps the elapsed duration
//! back to the timer's kind and token. Web requests carry their lookup kind,
//! generation and trace context in the request context map.
//!
//! # Keybindings
//!
//! - `Down` / `Ctrl+n`: Move down
//! - `Up` / `Ctrl+p`: Move up
//! - `Enter`: Choose suggestion / open result
//! - `Esc`: Close list and clear highlight
//! - `Ctrl+c`: Close plugin
//! - Any other character: Type into the address field

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use geolookup::app::AppState;
use geolookup::domain::GeocodeError;
use geolookup::geocode::{decode_candidates, decode_suggestions, GeocodeClient, LookupKind, RequestTag};
use geolookup::infrastructure::TimerQueue;
use geolookup::ui::{Hit, UIViewModel};
use geolookup::{handle_event, Action, Config, Event, Locale, NavKey, Theme};

register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like timer
/// correlation and the last drawn frame.
struct State {
    /// Core application state from library layer.
    app: AppState,

    /// Endpoint configuration; `None` only if no endpoint could be parsed.
    client: Option<GeocodeClient>,

    locale: Locale,
    theme: Theme,

    /// Pending host timers, in the order they were started.
    timers: TimerQueue,

    /// View model of the last render, used for mouse hit-testing.
    last_view: Option<UIViewModel>,

    /// Command used to open map links.
    open_command: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: geolookup::initialize(&default_config),
            client: GeocodeClient::from_config(&default_config).ok(),
            locale: default_config.locale,
            theme: Theme::default(),
            timers: TimerQueue::default(),
            last_view: None,
            open_command: default_config.open_command,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `WebAccess`: Query the geocoding service
    /// - `RunCommands`: Open map links with the configured command
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        geolookup::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            country_code = %config.country_code,
            locale = ?config.locale,
            "parsed configuration"
        );
        self.app = geolookup::initialize(&config);
        self.client = GeocodeClient::from_config(&config)
            .or_else(|e| {
                tracing::warn!(error = %e, "invalid geocoder endpoint - using defaults");
                let defaults = Config::default();
                GeocodeClient::from_config(&Config {
                    suggest_url: defaults.suggest_url,
                    find_url: defaults.find_url,
                    ..config.clone()
                })
            })
            .ok();
        self.locale = config.locale;
        self.theme = config.theme();
        self.open_command.clone_from(&config.open_command);

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        tracing::debug!("subscribing to events");
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::Visible,
            EventType::WebRequestResult,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete");
    }

    /// Handles incoming Zellij events.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        tracing::debug!(event = %event_name, "processing event");

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Mouse(mouse) => match self.map_mouse_event(mouse) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Visible(visible) => {
                if visible {
                    Event::Focus
                } else {
                    Event::Blur
                }
            }
            zellij_tile::prelude::Event::Timer(elapsed) => match self.timers.pop_elapsed(elapsed) {
                Some((kind, token)) => Event::TimerElapsed { kind, token },
                None => {
                    tracing::debug!(elapsed, "timer with no pending entry");
                    return false;
                }
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result_event(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::RunCommandResult(exit_code, _stdout, stderr, _context) => {
                if exit_code != Some(0) {
                    tracing::warn!(
                        exit_code = ?exit_code,
                        stderr = %String::from_utf8_lossy(&stderr),
                        "open command failed"
                    );
                }
                return false;
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match permissions {
                    PermissionStatus::Granted => tracing::debug!("permissions granted"),
                    PermissionStatus::Denied => {
                        tracing::warn!("permissions denied - lookups will fail");
                    }
                }
                return false;
            }
            _ => return false,
        };

        self.dispatch(our_event)
    }

    /// Renders the plugin UI and keeps the view model for hit-testing.
    fn render(&mut self, rows: usize, cols: usize) {
        self.last_view = Some(geolookup::ui::render(
            &self.app,
            self.locale,
            &self.theme,
            rows,
            cols,
        ));
    }
}

impl State {
    /// Runs an event through the library and executes the resulting actions.
    ///
    /// Actions that cannot be carried out feed a follow-up event back in.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut pending = vec![event];
        let mut should_render = false;

        while let Some(event) = pending.pop() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    tracing::debug!(
                        action_count = actions.len(),
                        should_render = render,
                        "event handled successfully"
                    );
                    should_render |= render;
                    for action in &actions {
                        pending.extend(self.execute_action(action));
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "error handling event");
                }
            }
        }

        should_render
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::Key(NavKey::Down)),
                BareKey::Char('p') => Some(Event::Key(NavKey::Up)),
                BareKey::Char('c') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::Key(NavKey::Down),
            BareKey::Up => Event::Key(NavKey::Up),
            BareKey::Enter => Event::Key(NavKey::Enter),
            BareKey::Esc => Event::Key(NavKey::Escape),
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Maps mouse events to application events using the last drawn frame.
    fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, _col) => {
                let hit = match (usize::try_from(line), &self.last_view) {
                    (Ok(line), Some(view)) => view.hit_test(line),
                    _ => Hit::Outside,
                };
                tracing::debug!(line, hit = ?hit, "click");
                match hit {
                    Hit::Suggestion(index) => Some(Event::SuggestionClicked(index)),
                    Hit::Result(index) => Some(Event::ResultClicked(index)),
                    Hit::Input => Some(Event::Focus),
                    Hit::Chrome => None,
                    Hit::Outside => Some(Event::OutsideInteraction),
                }
            }
            Mouse::ScrollDown(_) => Some(Event::Key(NavKey::Down)),
            Mouse::ScrollUp(_) => Some(Event::Key(NavKey::Up)),
            _ => None,
        }
    }

    /// Maps a web request result to a lookup settlement.
    ///
    /// Responses without a recognizable request tag are ignored.
    fn map_web_result_event(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(tag) = RequestTag::from_context(context) else {
            tracing::debug!(status, "web result without request tag");
            return None;
        };

        let span = tracing::debug_span!(
            "lookup_settled",
            lookup = ?tag.lookup,
            generation = %tag.generation,
            trace_id = tag.trace_context.as_ref().map(|t| t.trace_id.as_str()),
            parent_span_id = tag.trace_context.as_ref().map(|t| t.parent_span_id.as_str()),
        );
        let _guard = span.entered();
        tracing::debug!(status, body_len = body.len(), "web result received");

        Some(match tag.lookup {
            LookupKind::Suggest => Event::SuggestionsSettled {
                generation: tag.generation,
                outcome: decode_suggestions(status, body),
            },
            LookupKind::FindCandidates => Event::CandidatesSettled {
                generation: tag.generation,
                outcome: decode_candidates(status, body),
            },
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns a follow-up event when the action could not be issued.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> Option<Event> {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                None
            }
            Action::StartTimer { kind, token, delay } => {
                let secs = delay.as_secs_f64();
                self.timers.push(*kind, *token, secs);
                set_timeout(secs);
                None
            }
            Action::FetchSuggestions { generation, text } => {
                let Some(client) = &self.client else {
                    return Some(Event::SuggestionsSettled {
                        generation: *generation,
                        outcome: Err(Self::no_endpoint()),
                    });
                };
                let tag = RequestTag::new(LookupKind::Suggest, *generation);
                tracing::debug!(%generation, text = %text, "fetching suggestions");
                web_request(
                    client.suggest_url(text),
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    tag.to_context(),
                );
                None
            }
            Action::FindCandidates {
                generation,
                single_line,
                magic_key,
            } => {
                let Some(client) = &self.client else {
                    return Some(Event::CandidatesSettled {
                        generation: *generation,
                        outcome: Err(Self::no_endpoint()),
                    });
                };
                let tag = RequestTag::new(LookupKind::FindCandidates, *generation);
                tracing::debug!(%generation, single_line = %single_line, "finding candidates");
                web_request(
                    client.find_candidates_url(single_line, magic_key.as_deref()),
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    tag.to_context(),
                );
                None
            }
            Action::OpenExternalLink(url) => {
                tracing::debug!(url = %url, command = %self.open_command, "opening link");
                run_command(&[self.open_command.as_str(), url.as_str()], BTreeMap::new());
                None
            }
        }
    }

    fn no_endpoint() -> GeocodeError {
        GeocodeError::Malformed("no usable geocoder endpoint configured".to_string())
    }
}
