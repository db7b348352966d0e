//! Host abstraction for the visual flip transition.
//!
//! The engine never measures elapsed time to decide when a flip is done;
//! it waits for the host's animation-completion event. This keeps flips
//! correct when the host timeline pauses (e.g. a render loop that stops
//! ticking). A host that cannot animate completes immediately, which
//! degrades to "correct final text, no animation".

use futures_util::future::{self, BoxFuture};

/// A display surface a board is mounted into.
///
/// One host per board. `animate` is called with "fire once" semantics per
/// flip: the returned future resolves exactly when this flip's visual
/// transition finishes, and is never reused.
pub trait FlipHost: Send + Sync {
    /// Begins the visual transition for the cell at `index` and resolves
    /// when the host signals completion.
    ///
    /// Hosts without animation support must resolve immediately.
    fn animate(&self, index: usize, outgoing: char, incoming: char) -> BoxFuture<'static, ()>;

    /// Whether the mount point still exists. Flips against a detached
    /// host are silent no-ops.
    fn is_attached(&self) -> bool {
        true
    }
}

/// Host that completes every flip immediately.
///
/// Used for reduced-motion rendering, headless operation, and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantHost;

impl FlipHost for InstantHost {
    fn animate(&self, _index: usize, _outgoing: char, _incoming: char) -> BoxFuture<'static, ()> {
        Box::pin(future::ready(()))
    }
}
