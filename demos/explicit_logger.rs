use logmonitor::{info, warn, LogMonitor, Logger, Severity};

fn connect(lg: &Logger, host: &str) {
    info!(logger: lg, "connecting to {host}");
    warn!(logger: lg, "{host} is slow to answer");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logger = Logger::builder().stderr().build();
    let monitor = LogMonitor::install(&logger, Severity::Info);

    connect(&logger, "db-1");

    assert!(monitor.is_info_statement("connecting to db-1"));
    monitor.dump_to(&mut std::io::stdout())?;
    Ok(())
}
