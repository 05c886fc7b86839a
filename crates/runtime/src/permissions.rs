//! Permission check and request handlers.

use std::sync::Arc;

use policy::{CallSite, Decision, PermissionKind, PermissionPolicy};
use tracing::warn;

use crate::Responder;

/// Callback for an asynchronous permission request.
pub type PermissionResponder = Responder<bool>;

/// Answers the host's permission hooks from a [`PermissionPolicy`].
#[derive(Debug, Clone)]
pub struct PermissionHandlers {
    policy: Arc<PermissionPolicy>,
}

impl PermissionHandlers {
    pub fn new(policy: PermissionPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &PermissionPolicy {
        &self.policy
    }

    /// Evaluate once at `site`, keeping the reason.
    pub fn decide(&self, site: CallSite, permission: &PermissionKind, origin: &str) -> Decision {
        self.policy.decide(site, permission, origin)
    }

    /// Synchronous capability query from embedded content.
    ///
    /// `requesting_origin` is the origin string the engine reports.
    pub fn check_permission(&self, permission: &PermissionKind, requesting_origin: &str) -> bool {
        self.decide(CallSite::Check, permission, requesting_origin)
            .is_allowed()
    }

    /// Decision for an active permission request.
    ///
    /// `requesting_url` is the URL of the requesting page, not the frame
    /// origin.
    pub fn decide_request(&self, permission: &PermissionKind, requesting_url: &str) -> bool {
        self.decide(CallSite::Request, permission, requesting_url)
            .is_allowed()
    }

    /// Answer an active permission request through the host's callback.
    ///
    /// Returns the decision that was delivered.
    pub fn request_permission(
        &self,
        permission: &PermissionKind,
        requesting_url: &str,
        responder: &PermissionResponder,
    ) -> Decision {
        let decision = self.decide(CallSite::Request, permission, requesting_url);
        if !responder.respond(decision.is_allowed()) {
            warn!(%permission, "permission request was already answered");
        }
        decision
    }
}
