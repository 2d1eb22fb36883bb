use dockdns_application::services::Registry;
use dockdns_application::use_cases::{
    ContainerNaming, RegisterContainerUseCase, ResolveDnsRequestUseCase, SyncContainersUseCase,
    UnregisterContainerUseCase,
};
use dockdns_domain::Config;
use dockdns_infrastructure::container::DockerRuntime;
use dockdns_infrastructure::dns::UdpUpstreamForwarder;
use dockdns_jobs::{ContainerWatcherJob, JobRunner};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct Services {
    pub resolve_request: Arc<ResolveDnsRequestUseCase>,
    container_watcher: Option<ContainerWatcherJob>,
}

impl Services {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let registry = Arc::new(Registry::new(config.static_entries()?));
        info!(entries = registry.static_len(), "Static entries loaded");

        let upstream_servers = config.dns.upstream_addrs()?;
        info!(
            upstream = ?upstream_servers.first(),
            configured = upstream_servers.len(),
            "Upstream forwarding configured"
        );

        let resolve_request = Arc::new(
            ResolveDnsRequestUseCase::new(
                Arc::clone(&registry),
                Arc::new(UdpUpstreamForwarder::new()),
                upstream_servers,
            )
            .with_query_timeout(config.dns.query_timeout())
            .with_request_timeout(config.dns.request_timeout()),
        );

        let container_watcher = if config.containers.enabled {
            Some(Self::build_container_watcher(config, &registry)?)
        } else {
            info!("Container discovery disabled");
            None
        };

        Ok(Self {
            resolve_request,
            container_watcher,
        })
    }

    fn build_container_watcher(
        config: &Config,
        registry: &Arc<Registry>,
    ) -> anyhow::Result<ContainerWatcherJob> {
        let containers = &config.containers;
        let docker = Arc::new(DockerRuntime::connect(&containers.socket_path)?);
        info!(
            socket = %containers.socket_path,
            network = %containers.network,
            "Docker runtime configured"
        );

        let register = Arc::new(
            RegisterContainerUseCase::new(docker.clone(), Arc::clone(registry))
                .with_naming(ContainerNaming::from(containers)),
        );
        let sync = Arc::new(SyncContainersUseCase::new(
            docker.clone(),
            Arc::clone(registry),
            Arc::clone(&register),
        ));
        let unregister = Arc::new(UnregisterContainerUseCase::new(Arc::clone(registry)));

        Ok(ContainerWatcherJob::new(docker, sync, register, unregister)
            .with_event_buffer(containers.event_buffer)
            .with_reconnect_interval(Duration::from_secs(containers.reconnect_secs)))
    }

    /// Moves the background jobs into a runner bound to `shutdown`.
    pub fn job_runner(&mut self, shutdown: CancellationToken) -> JobRunner {
        let runner = JobRunner::new().with_shutdown_token(shutdown);
        match self.container_watcher.take() {
            Some(job) => runner.with_container_watcher(job),
            None => runner,
        }
    }
}
