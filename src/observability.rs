use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("geminius.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("geminius.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("geminius.client.request_duration_seconds");

pub(crate) static STREAM_CHUNKS: Counter = Counter::new("geminius.stream.chunks");
pub(crate) static STREAM_ERRORS: Counter = Counter::new("geminius.stream.errors");
pub(crate) static STREAM_BYTES: Counter = Counter::new("geminius.stream.bytes");
pub(crate) static STREAM_TTFB: Moments = Moments::new("geminius.stream.ttfb_seconds");

pub(crate) static DEMUX_TRANSITIONS: Counter = Counter::new("geminius.demux.transitions");
pub(crate) static DEMUX_THINKING_PARTS: Counter = Counter::new("geminius.demux.thinking_parts");
pub(crate) static DEMUX_ANSWER_PARTS: Counter = Counter::new("geminius.demux.answer_parts");

pub(crate) static EXCHANGES: Counter = Counter::new("geminius.exchange.started");
pub(crate) static EXCHANGE_FAILURES: Counter = Counter::new("geminius.exchange.failures");
pub(crate) static EXCHANGE_DURATION: Moments =
    Moments::new("geminius.exchange.duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&STREAM_CHUNKS);
    collector.register_counter(&STREAM_ERRORS);
    collector.register_counter(&STREAM_BYTES);
    collector.register_moments(&STREAM_TTFB);

    collector.register_counter(&DEMUX_TRANSITIONS);
    collector.register_counter(&DEMUX_THINKING_PARTS);
    collector.register_counter(&DEMUX_ANSWER_PARTS);

    collector.register_counter(&EXCHANGES);
    collector.register_counter(&EXCHANGE_FAILURES);
    collector.register_moments(&EXCHANGE_DURATION);
}
