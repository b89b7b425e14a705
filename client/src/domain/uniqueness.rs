//! Debounced identifier uniqueness checks.
//!
//! Every call to [`UniquenessChecker::check`] issues a new [`CheckTicket`] and
//! publishes it on a watch channel. Pending checks race their debounce timer
//! against that channel: a newer ticket cancels the wait before any request is
//! sent. Checks that already reached the gateway cannot be cancelled, so their
//! result is compared with the latest ticket once it arrives and discarded if
//! it lost.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};

use crate::domain::ports::CatalogGateway;
use crate::domain::{PRODUCT_ID_MIN, ProductId};

/// Quiet period before an identifier is sent for verification.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Sequence number of one uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CheckTicket(u64);

impl CheckTicket {
    /// Raw sequence number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The candidate identifier is already used by another product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdConflict;

/// Result of one uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The check ran to completion.
    Resolved {
        /// Ticket issued when the check started.
        ticket: CheckTicket,
        /// `Some` when the identifier is taken.
        conflict: Option<IdConflict>,
    },
    /// A newer check replaced this one; its result must not be applied.
    Superseded {
        /// Ticket issued when the check started.
        ticket: CheckTicket,
    },
}

impl CheckOutcome {
    /// Ticket the outcome belongs to.
    pub const fn ticket(&self) -> CheckTicket {
        match self {
            Self::Resolved { ticket, .. } | Self::Superseded { ticket } => *ticket,
        }
    }
}

/// Debounced, cancel-on-newer uniqueness checker for one identifier field.
pub struct UniquenessChecker<G> {
    gateway: Arc<G>,
    debounce: Duration,
    latest: watch::Sender<u64>,
}

impl<G> UniquenessChecker<G> {
    /// Create a checker with the default debounce window.
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_debounce(gateway, DEFAULT_DEBOUNCE)
    }

    /// Create a checker with an explicit debounce window.
    pub fn with_debounce(gateway: Arc<G>, debounce: Duration) -> Self {
        let (latest, _) = watch::channel(0);
        Self {
            gateway,
            debounce,
            latest,
        }
    }

    /// Whether `ticket` belongs to the most recent check.
    pub fn is_latest(&self, ticket: CheckTicket) -> bool {
        *self.latest.borrow() == ticket.0
    }

    /// Invalidate every check started so far.
    ///
    /// Pending checks resolve as [`CheckOutcome::Superseded`] and finished
    /// ones are no longer the latest.
    pub fn supersede(&self) {
        let ticket = self.issue_ticket();
        debug!(ticket = ticket.0, "outstanding uniqueness checks superseded");
    }

    fn issue_ticket(&self) -> CheckTicket {
        let mut issued = 0;
        self.latest.send_modify(|seq| {
            *seq = seq.wrapping_add(1);
            issued = *seq;
        });
        CheckTicket(issued)
    }
}

impl<G> UniquenessChecker<G>
where
    G: CatalogGateway + 'static,
{
    /// Start a check for `candidate`.
    ///
    /// The ticket is issued and the debounce window starts when this method
    /// is called, not when the returned future is first polled. Candidates
    /// shorter than the identifier minimum, and candidates equal to
    /// `current_id`, resolve without a conflict and without a network call.
    /// Gateway failures also resolve without a conflict.
    pub fn check(
        &self,
        candidate: &str,
        current_id: Option<&ProductId>,
    ) -> impl Future<Output = CheckOutcome> + Send + use<G> {
        let ticket = self.issue_ticket();
        let skip = candidate.chars().count() < PRODUCT_ID_MIN
            || current_id.is_some_and(|current| current.as_str() == candidate);
        let candidate = ProductId::new(candidate);
        let deadline = Instant::now() + self.debounce;
        let gateway = Arc::clone(&self.gateway);
        let mut latest = self.latest.subscribe();

        async move {
            if skip {
                return CheckOutcome::Resolved {
                    ticket,
                    conflict: None,
                };
            }

            tokio::select! {
                () = sleep_until(deadline) => {}
                _ = latest.changed() => {
                    debug!(ticket = ticket.0, "uniqueness check cancelled during debounce");
                    return CheckOutcome::Superseded { ticket };
                }
            }
            if !is_current(&latest, ticket) {
                return CheckOutcome::Superseded { ticket };
            }

            let conflict = match gateway.verify_product_id(&candidate).await {
                Ok(true) => Some(IdConflict),
                Ok(false) => None,
                Err(error) => {
                    warn!(product_id = %candidate, error = %error, "id verification failed; treating as free");
                    None
                }
            };

            if is_current(&latest, ticket) {
                CheckOutcome::Resolved { ticket, conflict }
            } else {
                debug!(ticket = ticket.0, product_id = %candidate, "stale uniqueness result discarded");
                CheckOutcome::Superseded { ticket }
            }
        }
    }
}

fn is_current(latest: &watch::Receiver<u64>, ticket: CheckTicket) -> bool {
    let seq = *latest.borrow();
    seq == ticket.0
}
