use crate::auth::AuthGateway;
use crate::blob::BlobStore;
use crate::catalog::SchemeResolver;
use crate::lifecycle::StorefrontSystem;
use crate::orders::OrderWorkflow;
use std::sync::Arc;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthGateway,
    pub resolver: SchemeResolver,
    pub workflow: OrderWorkflow,
    pub blobs: Arc<dyn BlobStore>,
}

impl AppState {
    pub fn new(system: &StorefrontSystem, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            auth: system.auth.clone(),
            resolver: system.resolver.clone(),
            workflow: system.workflow.clone(),
            blobs,
        }
    }
}
