use log::level_filters::LevelFilter;
use ordo_log::{Formatting, MaybeSystemTime, TargetsExt};
use parking_lot::Once;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use ordo_test_log_proc_macro::test;

static INITIALIZE: Once = Once::new();

#[doc(hidden)]
pub fn initialize() {
    INITIALIZE.call_once(|| {
        // Another harness may already have installed a subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .event_format(Formatting(MaybeSystemTime(false))),
            )
            .with(
                Targets::new()
                    .with_default(LevelFilter::INFO)
                    .with_ordo_targets(LevelFilter::DEBUG)
                    .with_env(),
            )
            .try_init();
    });
}
