//! Resize notifications for the window the demos render into.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::hooks::{Cleanup, EffectSlot, StateCell};
use crate::mvi::Subscription;

pub type ResizeListener = Box<dyn Fn(u16, u16) + Send + Sync>;

/// Released on drop; see [`Subscription`].
pub type ResizeSubscription = Subscription;

pub trait Viewport: Send + Sync {
    /// Current `(cols, rows)`, if known.
    fn size(&self) -> Option<(u16, u16)>;

    /// Call `listener` with the new size after every resize.
    fn subscribe(&self, listener: ResizeListener) -> ResizeSubscription;
}

#[derive(Clone, Default)]
struct Listeners {
    inner: Arc<Mutex<ListenerSet>>,
}

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(u64, Arc<dyn Fn(u16, u16) + Send + Sync>)>,
}

impl Listeners {
    fn add(&self, listener: ResizeListener) -> ResizeSubscription {
        let id = {
            let mut set = self.inner.lock();
            let id = set.next_id;
            set.next_id += 1;
            set.entries.push((id, Arc::from(listener)));
            id
        };
        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.lock().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    fn emit(&self, cols: u16, rows: u16) {
        let listeners: Vec<_> = self
            .inner
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(cols, rows);
        }
    }

    fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

/// Viewport resized by hand. Used by tests and scripted demos.
pub struct ManualViewport {
    size: Mutex<(u16, u16)>,
    listeners: Listeners,
}

impl ManualViewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: Mutex::new((cols, rows)),
            listeners: Listeners::default(),
        }
    }

    pub fn resize(&self, cols: u16, rows: u16) {
        *self.size.lock() = (cols, rows);
        self.listeners.emit(cols, rows);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Viewport for ManualViewport {
    fn size(&self) -> Option<(u16, u16)> {
        Some(*self.size.lock())
    }

    fn subscribe(&self, listener: ResizeListener) -> ResizeSubscription {
        self.listeners.add(listener)
    }
}

/// The controlling terminal, resized when the process receives `SIGWINCH`.
pub struct TerminalViewport {
    listeners: Listeners,
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: Option<std::thread::JoinHandle<()>>,
}

impl TerminalViewport {
    pub fn start() -> std::io::Result<Self> {
        let listeners = Listeners::default();

        #[cfg(unix)]
        {
            use signal_hook::consts::signal::SIGWINCH;
            use signal_hook::iterator::Signals;

            let mut signals = Signals::new([SIGWINCH])?;
            let handle = signals.handle();
            let emitter = listeners.clone();
            let thread = std::thread::spawn(move || {
                for _ in signals.forever() {
                    match crossterm::terminal::size() {
                        Ok((cols, rows)) => emitter.emit(cols, rows),
                        Err(err) => tracing::debug!(error = %err, "Terminal size unavailable"),
                    }
                }
            });
            return Ok(Self {
                listeners,
                handle,
                thread: Some(thread),
            });
        }

        #[cfg(not(unix))]
        {
            Ok(Self { listeners })
        }
    }
}

impl Viewport for TerminalViewport {
    fn size(&self) -> Option<(u16, u16)> {
        crossterm::terminal::size().ok()
    }

    fn subscribe(&self, listener: ResizeListener) -> ResizeSubscription {
        self.listeners.add(listener)
    }
}

impl Drop for TerminalViewport {
    fn drop(&mut self) {
        #[cfg(unix)]
        {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

/// Window width kept current for as long as the readout is alive.
///
/// The resize subscription is acquired on mount and released on drop.
pub struct WidthReadout {
    width: StateCell<Option<u16>>,
    _listener: EffectSlot<()>,
}

impl WidthReadout {
    pub fn mount(viewport: &dyn Viewport) -> Self {
        let width = StateCell::new(viewport.size().map(|(cols, _)| cols));
        let mut listener = EffectSlot::new();
        let target = width.clone();
        listener.run((), move |_| {
            Cleanup::from(viewport.subscribe(Box::new(move |cols, _| target.set(Some(cols)))))
        });
        Self {
            width,
            _listener: listener,
        }
    }

    pub fn width(&self) -> Option<u16> {
        self.width.get()
    }

    pub fn cell(&self) -> &StateCell<Option<u16>> {
        &self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_follows_resizes_until_dropped() {
        let viewport = ManualViewport::new(80, 24);
        let readout = WidthReadout::mount(&viewport);
        assert_eq!(readout.width(), Some(80));

        viewport.resize(120, 40);
        assert_eq!(readout.width(), Some(120));
        assert_eq!(viewport.listener_count(), 1);

        drop(readout);
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn each_listener_gets_every_resize() {
        let viewport = ManualViewport::new(10, 10);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = viewport.subscribe(Box::new(move |cols, rows| sink.lock().push((cols, rows))));

        viewport.resize(11, 12);
        viewport.resize(13, 14);
        assert_eq!(*seen.lock(), vec![(11, 12), (13, 14)]);
    }
}
