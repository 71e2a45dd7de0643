use serde::{Deserialize, Serialize};

/// A single action of a workflow rule.
///
/// Stored as tagged JSON (`{"type": "send_email", ...}`). Rules authored
/// against a newer backend may carry action types this build does not know;
/// those deserialize to `Unknown` and are skipped with a warning rather than
/// failing the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionSpec {
    /// Fan an in-app notification out to organization members.
    /// `target: "all"` is the only supported value today.
    SendNotification {
        title: String,
        body: String,
        target: String,
    },
    /// Send an email to a rule-specified recipient.
    SendEmail {
        to: String,
        subject: String,
        body: String,
    },
    /// Emit a log line; no external effect.
    Log { message: String },
    /// Forward-compatibility arm for unrecognized action types.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_deserialize_from_tagged_json() {
        let json = r#"{"type": "send_email", "to": "ops@example.com", "subject": "s", "body": "b"}"#;
        let action: ActionSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            action,
            ActionSpec::SendEmail {
                to: "ops@example.com".into(),
                subject: "s".into(),
                body: "b".into(),
            }
        );
    }

    #[test]
    fn unknown_action_type_deserializes_to_unknown() {
        let json = r#"{"type": "launch_rocket"}"#;
        let action: ActionSpec = serde_json::from_str(json).unwrap();
        assert_eq!(action, ActionSpec::Unknown);
    }

    #[test]
    fn log_action_round_trips() {
        let action = ActionSpec::Log {
            message: "invoice {{entity_id}} moved".into(),
        };
        let json = serde_json::to_string(&action).unwrap();
        let back: ActionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
