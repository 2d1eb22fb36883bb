use dockdns_application::ports::ContainerEventSource;
use dockdns_application::use_cases::{
    RegisterContainerUseCase, SyncContainersUseCase, UnregisterContainerUseCase,
};
use dockdns_domain::{ContainerEvent, ContainerEventKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const DEFAULT_EVENT_BUFFER: usize = 256;
const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps the registry's container entries in step with the runtime.
///
/// Two tasks cooperate over a bounded channel: the pump subscribes to the
/// runtime's lifecycle events (reconnecting when the stream drops) and the
/// consumer applies them one at a time. The consumer runs a full sync first
/// and again after every reconnect.
pub struct ContainerWatcherJob {
    events: Arc<dyn ContainerEventSource>,
    sync: Arc<SyncContainersUseCase>,
    register: Arc<RegisterContainerUseCase>,
    unregister: Arc<UnregisterContainerUseCase>,
    event_buffer: usize,
    reconnect_interval: Duration,
    shutdown: CancellationToken,
}

impl ContainerWatcherJob {
    pub fn new(
        events: Arc<dyn ContainerEventSource>,
        sync: Arc<SyncContainersUseCase>,
        register: Arc<RegisterContainerUseCase>,
        unregister: Arc<UnregisterContainerUseCase>,
    ) -> Self {
        Self {
            events,
            sync,
            register,
            unregister,
            event_buffer: DEFAULT_EVENT_BUFFER,
            reconnect_interval: DEFAULT_RECONNECT_INTERVAL,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }

    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            event_buffer = self.event_buffer,
            reconnect_ms = self.reconnect_interval.as_millis() as u64,
            "Starting container watcher"
        );

        let (event_tx, event_rx) = mpsc::channel(self.event_buffer);
        let (resync_tx, resync_rx) = mpsc::channel(1);

        let pump = Arc::clone(&self);
        tokio::spawn(async move { pump.pump_events(event_tx, resync_tx).await });

        let consumer = Arc::clone(&self);
        tokio::spawn(async move { consumer.consume(event_rx, resync_rx).await });
    }

    async fn pump_events(&self, sink: mpsc::Sender<ContainerEvent>, resync: mpsc::Sender<()>) {
        let mut connected_before = false;
        loop {
            if connected_before {
                // Events may have been missed while disconnected.
                let _ = resync.try_send(());
            }
            connected_before = true;

            let result = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                result = self.events.stream_events(sink.clone()) => result,
            };

            if sink.is_closed() {
                break;
            }
            match result {
                Ok(()) => warn!("Container event stream ended"),
                Err(e) => error!(error = %e, "Container event stream failed"),
            }

            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.reconnect_interval) => {
                    info!("Reconnecting to container event stream");
                }
            }
        }
        debug!("ContainerWatcherJob (pump): shutting down");
    }

    async fn consume(
        &self,
        mut events: mpsc::Receiver<ContainerEvent>,
        mut resync: mpsc::Receiver<()>,
    ) {
        self.run_sync().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("ContainerWatcherJob: shutting down");
                    break;
                }
                Some(()) = resync.recv() => self.run_sync().await,
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => break,
                },
            }
        }
    }

    async fn run_sync(&self) {
        if let Err(e) = self.sync.execute().await {
            error!(error = %e, "Container sync failed");
        }
    }

    async fn handle_event(&self, event: ContainerEvent) {
        match event.kind {
            ContainerEventKind::Start => match self.register.execute(&event.id).await {
                Ok(count) => debug!(id = %event.id, entries = count, "Start event applied"),
                Err(e) => warn!(id = %event.id, error = %e, "Skipping container"),
            },
            ContainerEventKind::Stop => {
                self.unregister.execute(&event.id);
            }
        }
    }
}
