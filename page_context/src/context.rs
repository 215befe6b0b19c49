//! Request-scoped context
//!
//! An immutable chain of nodes. Deriving a context adds one node pointing at
//! its parent, so parents never observe values attached to their children.
//! Cancellation and deadlines only report that the request is over; values
//! stay readable for as long as a handle to the context is alive.

use crate::errors::ContextError;
use futures::future::select_all;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

type DoneFuture = Pin<Box<dyn Future<Output = ContextError> + Send>>;

#[derive(Clone)]
pub struct RequestContext {
    node: Arc<Node>,
}

struct Node {
    parent: Option<RequestContext>,
    value: Option<Arc<dyn Any + Send + Sync>>,
    cancel: Option<Arc<watch::Sender<bool>>>,
    // effective deadline: the earliest along the chain
    deadline: Option<Instant>,
}

/// Cancels the context it was created with, and every context derived from it
#[derive(Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl fmt::Debug for CancelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelHandle")
            .field("cancelled", &*self.sender.borrow())
            .finish()
    }
}

impl RequestContext {
    /// Root context: never cancelled, no deadline, no values
    pub fn background() -> Self {
        Self {
            node: Arc::new(Node {
                parent: None,
                value: None,
                cancel: None,
                deadline: None,
            }),
        }
    }

    fn derive(
        &self,
        value: Option<Arc<dyn Any + Send + Sync>>,
        cancel: Option<Arc<watch::Sender<bool>>>,
        deadline: Option<Instant>,
    ) -> Self {
        let deadline = match (self.node.deadline, deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        Self {
            node: Arc::new(Node {
                parent: Some(self.clone()),
                value,
                cancel,
                deadline,
            }),
        }
    }

    /// Child context carrying `value`, shadowing any ancestor value of the same type
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        self.derive(Some(Arc::new(value)), None, None)
    }

    /// Child context that can be cancelled through the returned handle
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (sender, _) = watch::channel(false);
        let sender = Arc::new(sender);
        let ctx = self.derive(None, Some(sender.clone()), None);
        (ctx, CancelHandle { sender })
    }

    /// Child context that is done once `deadline` passes (or the parent's, if earlier)
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.derive(None, None, Some(deadline))
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Nearest value of type `T` along the chain
    pub fn value<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.ancestors()
            .filter_map(|node| node.value.clone())
            .find_map(|value| value.downcast::<T>().ok())
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.node.deadline
    }

    /// Why the context is done, if it is
    pub fn err(&self) -> Option<ContextError> {
        let cancelled = self
            .ancestors()
            .filter_map(|node| node.cancel.as_ref())
            .any(|sender| *sender.borrow());

        if cancelled {
            return Some(ContextError::Cancelled);
        }

        match self.node.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves when the context is cancelled or its deadline passes.
    ///
    /// Never resolves for a context with neither.
    pub async fn done(&self) -> ContextError {
        let mut waits: Vec<DoneFuture> = Vec::new();

        for sender in self.ancestors().filter_map(|node| node.cancel.as_ref()) {
            let mut receiver = sender.subscribe();
            waits.push(Box::pin(async move {
                let closed = receiver.wait_for(|cancelled| *cancelled).await.is_err();
                if closed {
                    std::future::pending::<()>().await;
                }
                ContextError::Cancelled
            }));
        }

        if let Some(deadline) = self.node.deadline {
            waits.push(Box::pin(async move {
                tokio::time::sleep_until(deadline.into()).await;
                ContextError::DeadlineExceeded
            }));
        }

        if waits.is_empty() {
            return std::future::pending().await;
        }

        let (reason, _, _) = select_all(waits).await;
        reason
    }

    fn ancestors(&self) -> impl Iterator<Item = &Node> {
        std::iter::successors(Some(self.node.as_ref()), |&node| {
            node.parent.as_ref().map(|parent| parent.node.as_ref())
        })
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("depth", &self.ancestors().count())
            .field("deadline", &self.node.deadline)
            .field("err", &self.err())
            .finish()
    }
}
