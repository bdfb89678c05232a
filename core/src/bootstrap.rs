//! Application startup sequence.
//!
//! # Design
//! The UI shell, session store, remote configuration and analytics are all
//! collaborators behind traits; this module only fixes their ordering:
//!
//! - analytics is initialised first;
//! - the remote configuration fetch is spawned and left to race, its failure
//!   is logged and dropped;
//! - mounting waits for the session load to finish, whether it succeeded.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::ApiError;

/// DOM target the application is mounted on.
pub const MOUNT_TARGET: &str = "#app";

/// Signed-in account as held by the session store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserData {
    pub id: u64,
    pub cid: u32,
}

pub trait Analytics: Send + Sync {
    fn init(&self, project_id: &str);
    fn identify(&self, tag: &str);
}

pub trait ServerConfigStore: Send + Sync {
    fn fetch_config(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
}

pub trait SessionStore: Send + Sync {
    fn init_user(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `Some` while a user is logged in.
    fn current_user(&self) -> Option<UserData>;
}

pub trait Mount: Send + Sync {
    fn mount(&self, target: &str);
}

/// Left-pad a CID with zeros to four digits.
///
/// Assumed display format; the backend's canonical formatting is not pinned
/// down here.
pub fn format_cid(cid: u32) -> String {
    format!("{cid:04}")
}

/// Tag sent to analytics for a logged-in user: `id(cid)`.
pub fn identity_tag(user: &UserData) -> String {
    format!("{}({})", user.id, format_cid(user.cid))
}

pub struct Startup<A, C, S, M> {
    pub project_id: String,
    pub analytics: A,
    pub config_store: Arc<C>,
    pub session: S,
    pub mount: M,
}

impl<A, C, S, M> Startup<A, C, S, M>
where
    A: Analytics,
    C: ServerConfigStore + 'static,
    S: SessionStore,
    M: Mount,
{
    /// Run the startup sequence. Returns the handle of the detached
    /// configuration fetch; nothing here waits on it.
    pub async fn run(self) -> JoinHandle<()> {
        self.analytics.init(&self.project_id);

        let store = Arc::clone(&self.config_store);
        let config_task = tokio::spawn(async move {
            if let Err(err) = store.fetch_config().await {
                debug!(error = %err, "server config fetch failed, ignoring");
            }
        });

        if let Err(err) = self.session.init_user().await {
            debug!(error = %err, "session load failed");
        }
        if let Some(user) = self.session.current_user() {
            self.analytics.identify(&identity_tag(&user));
        }

        self.mount.mount(MOUNT_TARGET);
        info!(mount_target = MOUNT_TARGET, "application mounted");
        config_task
    }
}
