//! Request tags carried through the host's web request context map.
//!
//! The host hands the context map back untouched with the response, so the
//! tag is how a `WebRequestResult` finds its way back to the session and
//! generation that issued it. The current trace context rides along so the
//! settlement span can be linked to the span that issued the request.

use crate::app::Generation;
use std::collections::BTreeMap;

const LOOKUP_KEY: &str = "lookup";
const GENERATION_KEY: &str = "generation";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Which remote operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Suggest,
    FindCandidates,
}

impl LookupKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Suggest => "suggest",
            Self::FindCandidates => "find",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "suggest" => Some(Self::Suggest),
            "find" => Some(Self::FindCandidates),
            _ => None,
        }
    }
}

/// Distributed tracing context captured when a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,
    /// Span ID of the issuing span.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when no valid span is active (tracing disabled or
    /// not sampled).
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        span_context.is_valid().then(|| Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Identity of an issued lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub lookup: LookupKind,
    pub generation: Generation,
    pub trace_context: Option<TraceContext>,
}

impl RequestTag {
    /// Tags a request issued now, capturing the current trace context.
    #[must_use]
    pub fn new(lookup: LookupKind, generation: Generation) -> Self {
        Self {
            lookup,
            generation,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the tag as a host context map.
    ///
    /// # Examples
    ///
    /// ```
    /// use geolookup::app::Generation;
    /// use geolookup::geocode::{LookupKind, RequestTag};
    ///
    /// let tag = RequestTag {
    ///     lookup: LookupKind::Suggest,
    ///     generation: Generation::from_raw(7),
    ///     trace_context: None,
    /// };
    /// let context = tag.to_context();
    /// assert_eq!(context.get("generation").map(String::as_str), Some("7"));
    /// assert_eq!(RequestTag::from_context(&context), Some(tag));
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(LOOKUP_KEY.to_string(), self.lookup.as_str().to_string());
        context.insert(GENERATION_KEY.to_string(), self.generation.raw().to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Decodes a tag from a host context map.
    ///
    /// Returns `None` for maps this plugin did not produce.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let lookup = LookupKind::parse(context.get(LOOKUP_KEY)?)?;
        let generation = Generation::from_raw(context.get(GENERATION_KEY)?.parse().ok()?);
        let trace_context = match (context.get(TRACE_ID_KEY), context.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };
        Some(Self {
            lookup,
            generation,
            trace_context,
        })
    }
}
