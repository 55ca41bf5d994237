use std::io;
use std::thread;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::metrics::{Collector, HostSource, ProbeFailure, Snapshot};

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    /// One completed collection, possibly carrying a probe failure.
    Sample(Box<Snapshot>, Option<ProbeFailure>),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Starts the terminal reader task and the sampler thread.
    ///
    /// The sampler runs `collect_snapshot` back to back; the CPU window
    /// paces it at one sample per interval. It exits once the handler is
    /// dropped.
    pub fn new<H>(collector: Collector<H>) -> io::Result<Self>
    where
        H: HostSource + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        spawn_sampler(collector, tx.clone())?;

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();

            while let Some(maybe_event) = reader.next().await {
                let Ok(evt) = maybe_event else {
                    break;
                };
                let mapped = match evt {
                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                    _ => None,
                };
                if let Some(e) = mapped
                    && tx.send(e).is_err()
                {
                    break;
                }
            }
        });

        Ok(Self { rx, _task: task })
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Collection blocks for the CPU window, so it runs on its own thread
/// instead of the async runtime.
pub fn spawn_sampler<H>(
    mut collector: Collector<H>,
    tx: mpsc::UnboundedSender<Event>,
) -> io::Result<thread::JoinHandle<()>>
where
    H: HostSource + Send + 'static,
{
    thread::Builder::new()
        .name("pcmonitor-sampler".to_string())
        .spawn(move || {
            loop {
                let (snapshot, error) = collector.collect_snapshot();
                if tx.send(Event::Sample(Box::new(snapshot), error)).is_err() {
                    tracing::debug!("event receiver dropped, sampler exiting");
                    break;
                }
            }
        })
}
