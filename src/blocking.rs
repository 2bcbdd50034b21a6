//! Synchronous wrapper around [`Dashboard`] for callers without a runtime.
//!
//! Owns a current-thread Tokio runtime and blocks on each pipeline run.
//! Feeds are still fetched concurrently within that single thread.
//!
//! # Example
//!
//! ```no_run
//! use rwa_metrics::{BlockingDashboard, Dashboard};
//!
//! let dashboard = BlockingDashboard::new(Dashboard::builder().build().unwrap()).unwrap();
//! let snapshot = dashboard.load_tab("private-credit").unwrap();
//! println!("{:?}", snapshot.kpi("deposits"));
//! ```

use tokio::runtime::{Builder, Runtime};

use crate::error::Result;
use crate::{Dashboard, TabSession, TabSnapshot};

pub struct BlockingDashboard {
    inner: Dashboard,
    runtime: Runtime,
}

impl BlockingDashboard {
    /// Wrap a dashboard, starting a dedicated current-thread runtime.
    pub fn new(inner: Dashboard) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { inner, runtime })
    }

    /// Blocking version of [`Dashboard::load_tab`].
    pub fn load_tab(&self, tab_id: &str) -> Result<TabSnapshot> {
        self.runtime.block_on(self.inner.load_tab(tab_id))
    }

    /// Blocking version of [`Dashboard::open_tab`] followed by
    /// [`Dashboard::run`].
    pub fn open_and_run(&self, tab_id: &str) -> Result<TabSession> {
        let mut session = self.inner.open_tab(tab_id)?;
        self.runtime.block_on(self.inner.run(&mut session));
        Ok(session)
    }
}
