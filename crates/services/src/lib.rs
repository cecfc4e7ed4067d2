//! # services
//!
//! Orchestration between validators and the document store. Each service
//! owns an `Arc<dyn DocumentStore>` handed in at construction; nothing here
//! reaches for a global client.

pub mod comment;
pub mod community;
pub mod records;
pub mod submission;

pub use comment::CommentService;
pub use community::{CommunityListing, CommunityService, DeleteReport};
pub use submission::{SubmissionService, SubmissionSummary, SubmissionThread};

use domains::ports::DocumentStore;
use std::sync::Arc;

/// Behaviour switches that come from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceOptions {
    /// Also delete comments when their submission is deleted.
    pub cascade_comments: bool,
}

/// All services, sharing one store handle.
#[derive(Clone)]
pub struct Services {
    pub communities: CommunityService,
    pub submissions: SubmissionService,
    pub comments: CommentService,
}

impl Services {
    pub fn new(store: Arc<dyn DocumentStore>, options: ServiceOptions) -> Self {
        let submissions = SubmissionService::new(store.clone(), options.cascade_comments);
        Self {
            communities: CommunityService::new(store.clone(), options.cascade_comments),
            comments: CommentService::new(store, submissions.clone()),
            submissions,
        }
    }
}
