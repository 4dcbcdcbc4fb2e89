use log::LevelFilter;

/// Map `-v`/`-q` flags to a log level: warnings by default, one `-v` per
/// step down to trace.
pub fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Off;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install `env_logger`.  `RUST_LOG`, when set, overrides the CLI flags.
pub fn init(verbosity: u8, quiet: bool) {
    let result = env_logger::Builder::new()
        .filter_level(level_filter(verbosity, quiet))
        .parse_env(env_logger::Env::default())
        .format_timestamp(None)
        .try_init();
    if let Err(e) = result {
        eprintln!("logger already initialised: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_steps_through_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::Warn);
        assert_eq!(level_filter(1, false), LevelFilter::Info);
        assert_eq!(level_filter(2, false), LevelFilter::Debug);
        assert_eq!(level_filter(3, false), LevelFilter::Trace);
        assert_eq!(level_filter(9, false), LevelFilter::Trace);
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_filter(2, true), LevelFilter::Off);
    }
}
