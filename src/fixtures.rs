#[cfg(test)]
pub mod test {
    use std::sync::{Arc, Mutex};

    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    use crate::error::EnvfigError;
    use crate::policy::ConfigPolicy;

    /// A typed target for `into_typed` / `resolve_into`.
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct ServerEnv {
        pub host: String,
        pub port: u16,
        pub log_level: Option<String>,
    }

    /// Structured payload for `get_json` tests.
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct Point {
        pub x: i64,
    }

    pub fn parse_bool(s: &str) -> Value {
        Value::Bool(s == "true")
    }

    /// One captured error-reaction call.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Reported {
        pub message: String,
        pub keys: Vec<String>,
        pub env: Option<Value>,
    }

    /// Records everything a policy is asked to log or react to. Never raises.
    #[derive(Default, Clone)]
    pub struct Recorder {
        pub logs: Arc<Mutex<Vec<String>>>,
        pub errors: Arc<Mutex<Vec<Reported>>>,
    }

    impl Recorder {
        pub fn policy(&self) -> ConfigPolicy {
            let logs = Arc::clone(&self.logs);
            let errors = Arc::clone(&self.errors);
            ConfigPolicy::default()
                .log(move |message| logs.lock().unwrap().push(message.to_string()))
                .on_error(move |error: EnvfigError, keys, env| {
                    errors.lock().unwrap().push(Reported {
                        message: error.to_string(),
                        keys: keys.to_vec(),
                        env: env.map(|e| Value::Object(e.as_map().clone())),
                    });
                    Ok(())
                })
        }

        pub fn logs(&self) -> Vec<String> {
            self.logs.lock().unwrap().clone()
        }

        pub fn errors(&self) -> Vec<Reported> {
            self.errors.lock().unwrap().clone()
        }
    }

    /// Writer handed to a `tracing_subscriber` so tests can read what was logged.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a thread-local subscriber and return its formatted output.
    pub fn capture_tracing<R>(f: impl FnOnce() -> R) -> (R, String) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8_lossy(&captured.0.lock().unwrap()).into_owned();
        (result, output)
    }
}
