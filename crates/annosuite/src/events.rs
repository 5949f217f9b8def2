//! Registration event channel.
//!
//! A process-global publish/subscribe mechanism keyed by annotation kind and
//! event name. Dispatch is synchronous, on the emitting context, in
//! subscription order; there is no queueing or replay. A handler error
//! propagates to the emitter's caller and aborts the remaining handlers for
//! that emission.
//!
//! Handlers must not re-emit the event they are handling: the handler list
//! is snapshotted per emission, so a reentrant emit cannot deadlock, but
//! subscription-order guarantees no longer hold for the nested dispatch.

use hashbrown::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use annosuite_harness::TargetRef;

use crate::annotations::AnnotationKind;
use crate::errors::RunnerError;

/// The only event name this core emits: an annotation was added.
pub const ADDED: &str = "Added";

type Handler = Arc<dyn Fn(TargetRef) -> Result<(), RunnerError> + Send + Sync>;

type ChannelKey = (AnnotationKind, &'static str);

static CHANNELS: LazyLock<Mutex<HashMap<ChannelKey, Vec<(u64, Handler)>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn lock_channels() -> MutexGuard<'static, HashMap<ChannelKey, Vec<(u64, Handler)>>> {
    CHANNELS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Token identifying one subscription, used to unsubscribe.
///
/// Closures are not comparable, so unsubscription works by token rather
/// than by handler value; the observable semantics match a by-handler
/// `off`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    kind: AnnotationKind,
    event: &'static str,
    id: u64,
}

/// Subscribes `handler` to `(kind, event)` and returns its token.
///
/// Handlers fire in subscription order.
pub fn on(
    kind: AnnotationKind,
    event: &'static str,
    handler: impl Fn(TargetRef) -> Result<(), RunnerError> + Send + Sync + 'static,
) -> Subscription {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    lock_channels()
        .entry((kind, event))
        .or_default()
        .push((id, Arc::new(handler)));
    Subscription { kind, event, id }
}

/// Unsubscribes a previously registered handler.
///
/// Idempotent: a stale or unknown token is a no-op, not an error.
pub fn off(subscription: Subscription) {
    let mut channels = lock_channels();
    if let Some(handlers) = channels.get_mut(&(subscription.kind, subscription.event)) {
        handlers.retain(|(id, _)| *id != subscription.id);
    }
}

/// Emits `(kind, event)` to every current subscriber, synchronously and in
/// subscription order.
///
/// # Errors
///
/// Propagates the first handler error, aborting the remaining handlers for
/// this emission.
pub fn emit(kind: AnnotationKind, event: &'static str, target: TargetRef) -> Result<(), RunnerError> {
    let handlers: Vec<Handler> = lock_channels()
        .get(&(kind, event))
        .map(|handlers| handlers.iter().map(|(_, h)| Arc::clone(h)).collect())
        .unwrap_or_default();
    log::debug!(
        "emitting {kind} '{event}' for '{id}' to {count} subscriber(s)",
        id = target.id(),
        count = handlers.len(),
    );
    for handler in handlers {
        handler(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
