use slog::Drain;
use slog::Level;
use slog::Never;
use slog::OwnedKVList;
use slog::Record;
use slog::SendSyncRefUnwindSafeDrain;
use slog::SendSyncUnwindSafeDrain;

use crate::Config;
use crate::Opts;

/// Minimum level of events, resolved by module.
#[derive(Clone, Debug)]
pub struct LevelRules {
    app_prefix: String,
    default: Level,
    modules: Vec<(String, Level)>,
    verbose: bool,
}

impl LevelRules {
    pub fn new(config: &Config, opts: &Opts) -> LevelRules {
        let mut modules: Vec<(String, Level)> = config
            .modules
            .iter()
            .map(|(prefix, level)| (prefix.clone(), (*level).into()))
            .collect();
        // Longest prefix first so the most specific rule matches.
        modules.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
        LevelRules {
            app_prefix: opts.app_prefix.clone(),
            default: config.level.into(),
            modules,
            verbose: config.verbose,
        }
    }

    /// Minimum level of events emitted by `module`.
    pub fn level_for(&self, module: &str) -> Level {
        let rule = self
            .modules
            .iter()
            .find(|(prefix, _)| module.starts_with(prefix.as_str()));
        if let Some((_, level)) = rule {
            return *level;
        }
        if self.default == Level::Debug && !self.verbose && !module.starts_with(&self.app_prefix) {
            return Level::Info;
        }
        self.default
    }
}

/// Alternative implementation of slog's [`LevelFilter`] with `Ok == ()`.
///
/// The default [`LevelFilter`] implementation wraps `D::Ok` into an [`Option`].
/// This makes it impossible to wrap a filtering drain into a [`Logger`].
/// Levels are also resolved per module according to [`LevelRules`].
///
/// [`LevelFilter`]: slog/struct.LevelFilter.html
/// [`Logger`]: slog/struct.Logger.html
/// [`Option`]: core/option/enum.Option.html
#[derive(Debug, Clone)]
pub struct LevelFilter<D: Drain> {
    drain: D,
    rules: LevelRules,
}

impl<D: Drain> Drain for LevelFilter<D> {
    type Ok = ();
    type Err = D::Err;
    fn log(&self, record: &Record, logger_values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        if record.level().is_at_least(self.rules.level_for(record.module())) {
            self.drain.log(record, logger_values)?;
        }
        Ok(())
    }
}

/// Configures the desired logging levels.
pub fn level<D>(config: &Config, opts: &Opts, drain: D) -> LevelFilter<D>
where
    D: SendSyncUnwindSafeDrain<Ok = (), Err = Never>,
    D: 'static + SendSyncRefUnwindSafeDrain<Ok = (), Err = Never>,
{
    LevelFilter {
        drain,
        rules: LevelRules::new(config, opts),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use slog::debug;
    use slog::info;
    use slog::o;
    use slog::warn;
    use slog::Drain;
    use slog::Level;
    use slog::Logger;
    use slog::Never;
    use slog::OwnedKVList;
    use slog::Record;

    use super::level;
    use super::LevelRules;
    use crate::Config;
    use crate::LoggingLevel;
    use crate::Opts;

    /// Drain collecting event messages in memory.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<String>>>);

    impl Drain for Capture {
        type Ok = ();
        type Err = Never;
        fn log(&self, record: &Record, _: &OwnedKVList) -> Result<(), Never> {
            self.0.lock().unwrap().push(format!("{}", record.msg()));
            Ok(())
        }
    }

    fn config(level: LoggingLevel, verbose: bool) -> Config {
        Config {
            level,
            verbose,
            ..Config::default()
        }
    }

    #[test]
    fn default_level() {
        let rules = LevelRules::new(&config(LoggingLevel::Warning, false), &Opts::new("app", "1"));
        assert_eq!(rules.level_for("app::server"), Level::Warning);
        assert_eq!(rules.level_for("hyper::proto"), Level::Warning);
    }

    #[test]
    fn dependencies_capped_at_info() {
        let rules = LevelRules::new(&config(LoggingLevel::Debug, false), &Opts::new("app", "1"));
        assert_eq!(rules.level_for("app::server"), Level::Debug);
        assert_eq!(rules.level_for("hyper::proto"), Level::Info);
    }

    #[test]
    fn verbose_allows_all_debug() {
        let rules = LevelRules::new(&config(LoggingLevel::Debug, true), &Opts::new("app", "1"));
        assert_eq!(rules.level_for("hyper::proto"), Level::Debug);
    }

    #[test]
    fn longest_module_prefix_wins() {
        let mut config = config(LoggingLevel::Info, false);
        config.modules.insert("hyper".into(), LoggingLevel::Error);
        config.modules.insert("hyper::proto".into(), LoggingLevel::Debug);
        let rules = LevelRules::new(&config, &Opts::new("app", "1"));
        assert_eq!(rules.level_for("hyper::proto::h1"), Level::Debug);
        assert_eq!(rules.level_for("hyper::client"), Level::Error);
        assert_eq!(rules.level_for("app"), Level::Info);
    }

    #[test]
    fn filter_drops_events() {
        let capture = Capture::default();
        let opts = Opts::new("healthpoint_logging", "1");
        let drain = level(&config(LoggingLevel::Info, false), &opts, capture.clone());
        let logger = Logger::root(drain, o!());
        debug!(logger, "dropped");
        info!(logger, "kept info");
        warn!(logger, "kept warning");
        let events = capture.0.lock().unwrap().clone();
        assert_eq!(events, vec!["kept info", "kept warning"]);
    }

    #[test]
    fn filter_app_debug() {
        let capture = Capture::default();
        let opts = Opts::new("healthpoint_logging", "1");
        let drain = level(&config(LoggingLevel::Debug, false), &opts, capture.clone());
        let logger = Logger::root(drain, o!());
        debug!(logger, "app debug");
        let events = capture.0.lock().unwrap().clone();
        assert_eq!(events, vec!["app debug"]);

        let capture = Capture::default();
        let opts = Opts::new("some_other_app", "1");
        let drain = level(&config(LoggingLevel::Debug, false), &opts, capture.clone());
        let logger = Logger::root(drain, o!());
        debug!(logger, "dependency debug");
        assert!(capture.0.lock().unwrap().is_empty());
    }
}
