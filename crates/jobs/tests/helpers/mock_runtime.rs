use async_trait::async_trait;
use dockdns_application::ports::{ContainerEventSource, ContainerRuntime};
use dockdns_domain::{ContainerDetails, ContainerEvent, DomainError};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub fn container(id: &str, hostname: &str, ip: &str) -> ContainerDetails {
    let mut networks = HashMap::new();
    networks.insert("bridge".to_string(), ip.parse().unwrap());
    ContainerDetails {
        id: id.into(),
        name: format!("/{}", id),
        hostname: hostname.to_string(),
        domainname: None,
        env: Vec::new(),
        networks,
    }
}

#[derive(Clone, Default)]
pub struct MockContainerRuntime {
    containers: Arc<Mutex<BTreeMap<String, ContainerDetails>>>,
    list_calls: Arc<AtomicUsize>,
}

impl MockContainerRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, container: ContainerDetails) {
        self.containers
            .lock()
            .unwrap()
            .insert(container.id.to_string(), container);
    }

    pub fn stop(&self, id: &str) {
        self.containers.lock().unwrap().remove(id);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContainerRuntime for MockContainerRuntime {
    async fn list_running(&self) -> Result<Vec<String>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.containers.lock().unwrap().keys().cloned().collect())
    }

    async fn inspect(&self, id: &str) -> Result<ContainerDetails, DomainError> {
        self.containers
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::ContainerInspection {
                id: id.to_string(),
                reason: "no such container".to_string(),
            })
    }
}

type Session = (Vec<ContainerEvent>, Option<DomainError>);

/// Scripted connections first, then a live feed driven by [`MockEventSource::push`].
pub struct MockEventSource {
    scripted: Mutex<VecDeque<Session>>,
    live_tx: mpsc::UnboundedSender<ContainerEvent>,
    live_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<ContainerEvent>>,
    connections: AtomicUsize,
}

impl MockEventSource {
    pub fn new() -> Self {
        let (live_tx, live_rx) = mpsc::unbounded_channel();
        Self {
            scripted: Mutex::new(VecDeque::new()),
            live_tx,
            live_rx: tokio::sync::Mutex::new(live_rx),
            connections: AtomicUsize::new(0),
        }
    }

    /// Queues a connection that delivers `events` and then ends, with
    /// `error` if given.
    pub fn script(&self, events: Vec<ContainerEvent>, error: Option<DomainError>) {
        self.scripted.lock().unwrap().push_back((events, error));
    }

    pub fn push(&self, event: ContainerEvent) {
        let _ = self.live_tx.send(event);
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

impl Default for MockEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerEventSource for MockEventSource {
    async fn stream_events(&self, sink: mpsc::Sender<ContainerEvent>) -> Result<(), DomainError> {
        self.connections.fetch_add(1, Ordering::SeqCst);

        let session = self.scripted.lock().unwrap().pop_front();
        if let Some((events, error)) = session {
            for event in events {
                if sink.send(event).await.is_err() {
                    return Ok(());
                }
            }
            return match error {
                Some(error) => Err(error),
                None => Ok(()),
            };
        }

        let mut live = self.live_rx.lock().await;
        while let Some(event) = live.recv().await {
            if sink.send(event).await.is_err() {
                return Ok(());
            }
        }
        Ok(())
    }
}
