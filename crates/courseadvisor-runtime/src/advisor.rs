//! Advisor turns: one utterance in, one rendered reply out.

use std::sync::Arc;
use std::time::Instant;

use courseadvisor_core::{AdvisorConfig, CapabilitySet, Error, Result};
use courseadvisor_intent::IntentResolver;
use courseadvisor_resolve::{CapabilityCall, CapabilityOutput, QueryEngine};
use courseadvisor_store::Catalog;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::compose::decompose_for;
use crate::log::ConversationLog;
use crate::render::{render_output, CLARIFY};
use crate::types::{AdvisorReply, Role, SYSTEM_PROMPT};

/// Resolves, executes and renders advisor turns against a shared catalog.
pub struct Advisor {
    catalog: Arc<Catalog>,
    resolver: IntentResolver,
    capabilities: CapabilitySet,
    log: Option<ConversationLog>,
}

impl Advisor {
    /// Advisor offering every capability. The conversation log is opened
    /// from `config`; if that fails the advisor runs without one.
    pub fn new(catalog: Arc<Catalog>, config: &AdvisorConfig) -> Self {
        let log = config
            .conversation_log
            .as_ref()
            .and_then(|path| match ConversationLog::open(path) {
                Ok(log) => Some(log),
                Err(e) => {
                    warn!("Conversation log disabled, cannot open {}: {}", path.display(), e);
                    None
                }
            });

        info!(
            "Advisor initialized: result_limit={}, log={:?}",
            config.result_limit,
            log.as_ref().map(|l| l.path())
        );

        Self {
            catalog,
            resolver: IntentResolver::new(config.result_limit),
            capabilities: CapabilitySet::all(),
            log,
        }
    }

    /// Restrict the capabilities calls may use; resolved calls are
    /// rewritten to fit.
    pub fn with_capabilities(mut self, capabilities: CapabilitySet) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn resolver(&self) -> &IntentResolver {
        &self.resolver
    }

    /// Engine over the catalog, loading the dataset on first use.
    pub fn engine(&self) -> Result<QueryEngine> {
        Ok(QueryEngine::new(self.catalog.sections()?))
    }

    /// Record the persona line that opens a session.
    pub fn start_session(&self) {
        self.record(Role::System, SYSTEM_PROMPT, None);
    }

    /// The call that would run for `utterance`, after fallback.
    pub fn plan(&self, utterance: &str) -> Option<CapabilityCall> {
        self.resolver
            .resolve(utterance)
            .and_then(|call| decompose_for(call, &self.capabilities))
    }

    /// Run one call. Calls outside the offered set are rejected.
    pub fn invoke(&self, call: &CapabilityCall) -> Result<CapabilityOutput> {
        let capability = call.capability();
        if !self.capabilities.contains(capability) {
            return Err(Error::UnknownCapability(capability.to_string()));
        }
        Ok(self.engine()?.invoke(call))
    }

    /// Handle one user turn.
    ///
    /// Unactionable utterances get a clarifying question. The only error
    /// is a dataset load failure.
    pub fn respond(&self, utterance: &str) -> Result<AdvisorReply> {
        let utterance = utterance.trim();
        self.record(Role::User, utterance, None);

        let Some(call) = self.plan(utterance) else {
            debug!("No actionable intent in {:?}", utterance);
            self.record(
                Role::Assistant,
                CLARIFY,
                Some(json!({ "intent": { "tool": null, "args": {} } })),
            );
            return Ok(AdvisorReply {
                text: CLARIFY.to_string(),
                call: None,
                output: None,
                latency_ms: 0.0,
            });
        };

        let started = Instant::now();
        let output = self.invoke(&call)?;
        let elapsed = started.elapsed();
        let text = render_output(&output, elapsed);

        let latency_s = (elapsed.as_secs_f64() * 1000.0).round() / 1000.0;
        self.record(
            Role::Assistant,
            &text,
            Some(json!({
                "tool": call.capability().name(),
                "args": call.args(),
                "latency_s": latency_s,
            })),
        );

        Ok(AdvisorReply {
            text,
            call: Some(call),
            output: Some(output),
            latency_ms: elapsed.as_secs_f64() * 1000.0,
        })
    }

    fn record(&self, role: Role, text: &str, meta: Option<serde_json::Value>) {
        if let Some(log) = &self.log {
            log.record(role, text, meta);
        }
    }
}
