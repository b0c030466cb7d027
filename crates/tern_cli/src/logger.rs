use log::LevelFilter;

/// Initialize env_logger; an explicit level overrides `RUST_LOG`.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}
