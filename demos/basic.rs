use logmonitor::{debug, error, fatal, info, warn, LogMonitor, Pattern, Severity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // LOGMONITOR_LEVEL=warn LOGMONITOR_COLOR=always cargo run --example basic
    let monitor = LogMonitor::from_env()?;

    debug!("hello {}", "world");
    info!("hello {}", "world");
    warn!("disk almost full: {}%", 92);
    error!("request failed:\n  upstream timed out after {} ms", 500);
    fatal!("giving up");

    let disk = Pattern::new(r"disk almost full: \d+%")?;
    println!("threshold:   {}", monitor.threshold());
    println!("statements:  {}", monitor.count());
    println!("disk warning: {}", monitor.is_warn_statement(&disk));
    println!(
        "errors:      {:?}",
        monitor.statements_matching_str(Severity::Error, "(?s)request failed:.*")?
    );

    monitor.dump_to_stderr();
    Ok(())
}
