use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sets up the subscriber from the `-v` count.
///
/// The AWS SDK crates are quiet by default and only surface at `ERROR`.
/// A single `-v` enables our own debug logging, `-vv` (or more) also
/// un-silences the SDK and hyper internals.
pub fn init_cli_logger(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "cftcli=info,aws_config=error,aws_smithy_runtime=error,hyper=error",
        1 => "cftcli=debug,info,aws_config=error,aws_smithy_runtime=error,hyper=error",
        _ => "cftcli=trace,debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
