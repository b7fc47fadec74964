use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("aicli.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("aicli.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("aicli.client.request_duration_seconds");

pub(crate) static COMPLETIONS: Counter = Counter::new("aicli.completion.requests");
pub(crate) static COMPLETION_FAILURES: Counter = Counter::new("aicli.completion.failures");

pub(crate) static REPL_LINES: Counter = Counter::new("aicli.repl.lines");
pub(crate) static REPL_COMMANDS: Counter = Counter::new("aicli.repl.commands");
pub(crate) static SETTINGS_PERSISTED: Counter = Counter::new("aicli.settings.persisted");
pub(crate) static CONVERSATIONS_SAVED: Counter = Counter::new("aicli.conversation.saved");
pub(crate) static CONVERSATIONS_LOADED: Counter = Counter::new("aicli.conversation.loaded");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&COMPLETIONS);
    collector.register_counter(&COMPLETION_FAILURES);

    collector.register_counter(&REPL_LINES);
    collector.register_counter(&REPL_COMMANDS);
    collector.register_counter(&SETTINGS_PERSISTED);
    collector.register_counter(&CONVERSATIONS_SAVED);
    collector.register_counter(&CONVERSATIONS_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_register() {
        register_biometrics(Collector::new());
        COMPLETIONS.click();
        CLIENT_REQUEST_DURATION.add(0.25);
    }
}
