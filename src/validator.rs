use tracing::debug;

use crate::types::{Envelope, REQUIRED_KEYS, StartConfig, argument_text};

/// Acknowledgment carried by a successful validation
pub const ACCEPTED: &str = "OK";

/// `Validate` Function
///
/// Check that `config` carries every required key. Keys are checked in
/// writer argument order and only the first problem is reported.
///
/// # Arguments
/// * `config` - The start configuration posted by the caller
///
/// # Returns
/// * `Envelope` - `{success: true, value: "OK"}` if every key is usable,
///   otherwise a failure naming the first missing or unusable key
#[must_use]
pub fn validate(config: &StartConfig) -> Envelope {
    for key in REQUIRED_KEYS {
        let problem = match config.get(key) {
            None => missing_argument(key),
            Some(value) if argument_text(value).is_none() => unsupported_argument(key),
            Some(_) => continue,
        };
        debug!(target: "writer_control::validator", key, "Rejecting start configuration");
        return Envelope::failure(problem);
    }

    Envelope::success(ACCEPTED)
}

fn missing_argument(key: &str) -> String {
    format!(
        "Argument {key} missing on the configuration file. Please, check the configuration template file."
    )
}

fn unsupported_argument(key: &str) -> String {
    format!(
        "Argument {key} must be a string or a number. Please, check the configuration template file."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Map, Value, json};

    fn full_config() -> Map<String, Value> {
        let value = json!({
            "connection_address": "tcp://a",
            "output_file": "/tmp/o.h5",
            "n_frames": "10",
            "user_id": "1000",
            "n_modules": "4",
            "rest_api_port": "8080",
            "dataset_name": "data",
            "max_frames_per_file": "1000",
            "statistics_monitor_address": "tcp://b"
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn accepts_complete_configuration() {
        let config = StartConfig::from(full_config());
        assert_eq!(validate(&config), Envelope::success("OK"));
    }

    #[test]
    fn ignores_extra_keys_and_input_order() {
        let mut reversed: Map<String, Value> = full_config().into_iter().rev().collect();
        reversed.insert("comment".to_string(), json!({"free": ["form"]}));
        reversed.insert("n_frames".to_string(), json!(10));

        assert_eq!(validate(&StartConfig::from(reversed)), Envelope::success("OK"));
    }

    #[test]
    fn reports_missing_n_frames_verbatim() {
        let mut map = full_config();
        map.remove("n_frames");

        assert_eq!(
            validate(&StartConfig::from(map)),
            Envelope::failure(
                "Argument n_frames missing on the configuration file. Please, check the configuration template file."
            )
        );
    }

    #[rstest]
    fn reports_first_missing_key(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8)] index: usize) {
        // drop the key at `index` and everything after it
        let mut map = full_config();
        for key in &REQUIRED_KEYS[index..] {
            map.remove(*key);
        }

        let envelope = validate(&StartConfig::from(map));
        assert!(!envelope.success);
        assert_eq!(envelope.value, missing_argument(REQUIRED_KEYS[index]));
    }

    #[test]
    fn rejects_non_scalar_required_value() {
        let mut map = full_config();
        map.insert("user_id".to_string(), Value::Null);
        map.remove("dataset_name");

        let envelope = validate(&StartConfig::from(map));
        assert_eq!(envelope, Envelope::failure(unsupported_argument("user_id")));
    }

    #[test]
    fn empty_configuration_reports_first_key() {
        let envelope = validate(&StartConfig::default());
        assert!(envelope.value.contains("connection_address"));
    }
}
