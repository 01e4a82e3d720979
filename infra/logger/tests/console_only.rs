use rcfg_logger::{LevelFilter, Logger};

#[test]
fn console_logger_holds_no_file_guard() {
    let logger = Logger::builder()
        .name("care-it-console")
        .level(LevelFilter::WARN)
        .env_filter("rcfg_engine=trace")
        .init()
        .expect("logger should initialize");

    tracing::warn!("console only");
    assert!(logger.guard().is_none());
    logger.flush();
}
