/// Additional program options given to the logging configuration.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Module prefix of the application emitting the logs.
    ///
    /// Events from modules with this prefix are allowed at DEBUG level
    /// even when verbose logging is off.
    pub app_prefix: String,

    /// The version string to attach to logs.
    pub version: String,
}

impl Opts {
    pub fn new<S1, S2>(app_prefix: S1, version: S2) -> Opts
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Opts {
            app_prefix: app_prefix.into(),
            version: version.into(),
        }
    }
}
