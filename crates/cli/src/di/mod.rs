use dnsblast_application::use_cases::RunDispatchUseCase;
use dnsblast_domain::Config;
use dnsblast_infrastructure::dns::UdpQuerySender;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Wires the UDP adapter into the dispatch engine.
pub fn build_dispatch(config: &Config, shutdown: CancellationToken) -> RunDispatchUseCase {
    let sender = Arc::new(UdpQuerySender::new());

    RunDispatchUseCase::new(sender, config.dispatch_target())
        .with_max_concurrency(config.load.max_concurrency)
        .with_cancellation(shutdown)
}
