//! End-to-end interaction flows driven through the public API.
//!
//! A small in-memory host plays the plugin runtime: it records timers and
//! web requests instead of issuing them, and answers requests with canned
//! service bodies routed through the request tag, the way the plugin does.

use std::collections::BTreeMap;
use std::time::Duration;

use geolookup::app::{AppState, Mode, ResultPhase, Status, TimerKind, TimerToken};
use geolookup::geocode::{decode_candidates, decode_suggestions, GeocodeClient, LookupKind, RequestTag};
use geolookup::{handle_event, initialize, Action, Config, Event, NavKey};

const SOFIA_SUGGESTIONS: &[u8] = br#"{"suggestions":[
    {"text":"Sofia, str. Shipka 6","magicKey":"k-shipka","isCollection":false},
    {"text":"Sofia, str. Shishman 12","magicKey":"k-shishman","isCollection":false}
]}"#;

const SHIPKA_CANDIDATES: &[u8] = br#"{"spatialReference":{"wkid":4326},"candidates":[
    {"address":"ul. Shipka 6, 1504 Sofia","location":{"x":23.3368,"y":42.6943},"score":100},
    {"address":"ul. Shipka, 1504 Sofia","location":{"x":23.3371,"y":42.6939},"score":92.5}
]}"#;

/// A web request the host would have issued.
struct Request {
    url: String,
    context: BTreeMap<String, String>,
}

struct Host {
    state: AppState,
    client: GeocodeClient,
    timers: Vec<(TimerKind, TimerToken, Duration)>,
    requests: Vec<Request>,
    opened: Vec<String>,
    renders: usize,
}

impl Host {
    fn new() -> Self {
        let config = Config::default();
        Self {
            state: initialize(&config),
            client: GeocodeClient::from_config(&config).expect("default endpoints parse"),
            timers: Vec::new(),
            requests: Vec::new(),
            opened: Vec::new(),
            renders: 0,
        }
    }

    fn send(&mut self, event: Event) -> Vec<Action> {
        let (render, actions) = handle_event(&mut self.state, &event).expect("handled");
        if render {
            self.renders += 1;
        }
        for action in &actions {
            match action {
                Action::StartTimer { kind, token, delay } => self.timers.push((*kind, *token, *delay)),
                Action::FetchSuggestions { generation, text } => self.requests.push(Request {
                    url: self.client.suggest_url(text),
                    context: RequestTag::new(LookupKind::Suggest, *generation).to_context(),
                }),
                Action::FindCandidates {
                    generation,
                    single_line,
                    magic_key,
                } => self.requests.push(Request {
                    url: self
                        .client
                        .find_candidates_url(single_line, magic_key.as_deref()),
                    context: RequestTag::new(LookupKind::FindCandidates, *generation).to_context(),
                }),
                Action::OpenExternalLink(url) => self.opened.push(url.clone()),
                Action::CloseFocus => {}
            }
        }
        actions
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    /// Fires every pending timer in start order.
    fn fire_timers(&mut self) {
        for (kind, token, _) in std::mem::take(&mut self.timers) {
            self.send(Event::TimerElapsed { kind, token });
        }
    }

    /// Answers the request at `index` with `status` and `body`.
    fn respond(&mut self, index: usize, status: u16, body: &[u8]) -> bool {
        let tag = RequestTag::from_context(&self.requests[index].context).expect("tagged request");
        let event = match tag.lookup {
            LookupKind::Suggest => Event::SuggestionsSettled {
                generation: tag.generation,
                outcome: decode_suggestions(status, body),
            },
            LookupKind::FindCandidates => Event::CandidatesSettled {
                generation: tag.generation,
                outcome: decode_candidates(status, body),
            },
        };
        let (render, actions) = handle_event(&mut self.state, &event).expect("handled");
        assert!(actions.is_empty(), "settlements never emit effects");
        if render {
            self.renders += 1;
        }
        render
    }

    fn suggest_requests(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| r.url.contains("/suggest?"))
            .count()
    }
}

#[test]
fn typing_an_address_issues_one_lookup_after_the_pause() {
    let mut host = Host::new();
    host.type_text("Sofia str");

    assert_eq!(host.timers.len(), 7, "every keystroke from the third on re-arms the debounce");
    assert!(host.requests.is_empty(), "nothing is fetched while typing");
    assert_eq!(host.state.status, Some(Status::SearchingSuggestions));

    host.fire_timers();
    assert_eq!(host.suggest_requests(), 1, "only the last timer is current");
    assert!(host.requests[0].url.contains("text=Sofia+str"));
    assert!(host.state.snapshot().loading);

    assert!(host.respond(0, 200, SOFIA_SUGGESTIONS));
    assert_eq!(host.state.mode(), Mode::Suggest);
    assert_eq!(host.state.suggestions.items().len(), 2);
    assert_eq!(host.state.status, None);
    assert!(!host.state.snapshot().loading);
}

#[test]
fn short_input_never_reaches_the_service() {
    let mut host = Host::new();
    host.type_text("ab");
    host.fire_timers();

    assert!(host.requests.is_empty());
    assert_eq!(
        host.state.status,
        Some(Status::NeedsMoreInput { min_chars: 3 })
    );
    assert_eq!(host.state.mode(), Mode::Idle);
}

#[test]
fn whitespace_does_not_count_toward_the_minimum() {
    let mut host = Host::new();
    host.send(Event::InputChanged("  ab  ".to_string()));
    host.fire_timers();
    assert!(host.requests.is_empty());
}

#[test]
fn shrinking_below_the_minimum_cancels_a_pending_lookup() {
    let mut host = Host::new();
    host.type_text("Sofia");
    host.fire_timers();
    assert_eq!(host.requests.len(), 1);

    host.send(Event::InputChanged("So".to_string()));
    assert!(!host.respond(0, 200, SOFIA_SUGGESTIONS), "cancelled lookup is stale");
    assert!(!host.state.suggestions.is_open());
    assert_eq!(host.state.mode(), Mode::Idle);
}

#[test]
fn shrinking_below_the_minimum_clears_open_lists() {
    let mut host = Host::new();
    host.type_text("Sofia");
    host.fire_timers();
    host.respond(0, 200, SOFIA_SUGGESTIONS);
    host.send(Event::SuggestionClicked(0));
    host.respond(1, 200, SHIPKA_CANDIDATES);
    assert_eq!(host.state.mode(), Mode::Results);
    assert_eq!(host.state.results.items().len(), 2);

    host.send(Event::InputChanged("So".to_string()));

    assert!(!host.state.suggestions.is_open());
    assert!(host.state.suggestions.items().is_empty());
    assert!(host.state.results.items().is_empty());
    assert_eq!(host.state.results.phase(), ResultPhase::Idle);
    assert_eq!(host.state.mode(), Mode::Idle);
    assert_eq!(
        host.state.status,
        Some(Status::NeedsMoreInput { min_chars: 3 })
    );

    // A list that was open when the input shrank is closed too.
    host.type_text("fia");
    host.fire_timers();
    let last = host.requests.len() - 1;
    host.respond(last, 200, SOFIA_SUGGESTIONS);
    assert_eq!(host.state.mode(), Mode::Suggest);
    host.send(Event::InputChanged("Sf".to_string()));
    assert!(host.state.suggestions.items().is_empty());
    assert_eq!(host.state.mode(), Mode::Idle);
}

#[test]
fn out_of_order_responses_apply_only_the_latest() {
    let mut host = Host::new();
    host.type_text("Sof");
    host.fire_timers();
    host.type_text("ia");
    host.fire_timers();
    assert_eq!(host.requests.len(), 2);

    let latest = br#"{"suggestions":[{"text":"Sofia, center","magicKey":"k"}]}"#;
    assert!(host.respond(1, 200, latest));
    let renders = host.renders;
    assert!(!host.respond(0, 200, SOFIA_SUGGESTIONS), "older generation is dropped");
    assert_eq!(host.renders, renders);

    let texts: Vec<&str> = host
        .state
        .suggestions
        .items()
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(texts, ["Sofia, center"]);
}

#[test]
fn choosing_a_suggestion_resolves_and_opens_a_candidate() {
    let mut host = Host::new();
    host.type_text("Sofia Shi");
    host.fire_timers();
    host.respond(0, 200, SOFIA_SUGGESTIONS);

    host.send(Event::Key(NavKey::Down));
    host.send(Event::Key(NavKey::Enter));

    assert!(!host.state.suggestions.is_open());
    assert_eq!(host.state.input, "Sofia, str. Shipka 6");
    assert_eq!(host.state.status, Some(Status::SearchingResults));
    assert!(matches!(host.state.results.phase(), ResultPhase::Searching(_)));
    let find = &host.requests[1].url;
    assert!(find.contains("findAddressCandidates?"));
    assert!(find.contains("magicKey=k-shipka"));
    assert!(find.contains("langCode=bg"));

    assert!(host.respond(1, 200, SHIPKA_CANDIDATES));
    assert_eq!(host.state.mode(), Mode::Results);
    assert_eq!(host.state.results.items().len(), 2);
    assert_eq!(host.state.status, None);

    host.send(Event::Key(NavKey::Down));
    host.send(Event::Key(NavKey::Down));
    host.send(Event::Key(NavKey::Up));
    host.send(Event::Key(NavKey::Enter));
    assert_eq!(host.opened.len(), 1);
    assert!(host.opened[0].contains("42.6943"));
    assert!(host.opened[0].contains("23.3368"));
}

#[test]
fn failed_search_leaves_an_empty_result_list() {
    let mut host = Host::new();
    host.type_text("Sofia");
    host.fire_timers();
    host.respond(0, 200, SOFIA_SUGGESTIONS);
    host.send(Event::SuggestionClicked(1));

    assert!(host.respond(1, 503, b"Service Unavailable"));
    assert_eq!(host.state.status, Some(Status::SearchFailed));
    assert!(host.state.results.items().is_empty());
    assert_eq!(host.state.results.phase(), ResultPhase::Failed);
    assert_eq!(host.state.mode(), Mode::Results, "failure renders an empty result list");
    assert!(host.opened.is_empty());
}

#[test]
fn sofia_street_walkthrough() {
    let mut host = Host::new();
    host.type_text("Sofia str");
    host.fire_timers();
    host.respond(
        0,
        200,
        br#"{"suggestions":[{"text":"Sofia, str. X","magicKey":"k1","isCollection":false}]}"#,
    );
    assert_eq!(host.state.suggestions.items().len(), 1);
    assert_eq!(host.state.mode(), Mode::Suggest);

    host.send(Event::Key(NavKey::Down));
    assert_eq!(host.state.suggestions.cursor().index(), Some(0));
    let actions = host.send(Event::Key(NavKey::Enter));
    assert!(matches!(
        actions.as_slice(),
        [Action::FindCandidates { single_line, magic_key: Some(key), .. }]
            if single_line == "Sofia, str. X" && key == "k1"
    ));
    assert!(!host.state.suggestions.is_open());

    host.respond(
        1,
        200,
        br#"{"candidates":[{"address":"Sofia, str. X 12","score":100,"location":{"x":23.3,"y":42.7}}]}"#,
    );
    assert_eq!(host.state.mode(), Mode::Results);
    assert_eq!(host.state.results.items().len(), 1);
    assert_eq!(host.state.results.cursor().index(), None);
}

#[test]
fn service_error_envelope_counts_as_a_failed_lookup() {
    let mut host = Host::new();
    host.type_text("Sofia");
    host.fire_timers();

    let envelope = br#"{"error":{"code":498,"message":"Invalid token.","details":[]}}"#;
    assert!(host.respond(0, 200, envelope));
    assert_eq!(host.state.status, Some(Status::SuggestionsFailed));
    assert!(!host.state.suggestions.is_open());
}

#[test]
fn escape_closes_the_list_and_keeps_the_text() {
    let mut host = Host::new();
    host.type_text("Sofia");
    host.fire_timers();
    host.respond(0, 200, SOFIA_SUGGESTIONS);
    host.send(Event::Key(NavKey::Down));

    host.send(Event::Key(NavKey::Escape));
    assert_eq!(host.state.mode(), Mode::Idle);
    assert_eq!(host.state.input, "Sofia");
    assert!(host.state.snapshot().live_cursor().is_none());

    // Navigation keys do nothing without a list.
    let actions = host.send(Event::Key(NavKey::Enter));
    assert!(actions.is_empty());
}

#[test]
fn blur_closes_suggestions_after_the_grace_period() {
    let mut host = Host::new();
    host.type_text("Sofia");
    host.fire_timers();
    host.respond(0, 200, SOFIA_SUGGESTIONS);

    host.send(Event::Blur);
    let [(TimerKind::BlurGrace, _, delay)] = host.timers.as_slice() else {
        panic!("expected a single blur grace timer");
    };
    assert_eq!(*delay, Duration::from_millis(120));
    assert!(host.state.suggestions.is_open(), "list stays open during the grace period");

    host.fire_timers();
    assert!(!host.state.suggestions.is_open());
}
