use serde::{Deserialize, Serialize};

/// Emojis offered by the picker.
pub const EMOJI_CHOICES: &[&str] = &[
    "👍", "😍", "🎉", "😂", "😢", "🔥", "👏", "🥳", "💖", "🙏",
];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    #[serde(default)]
    pub id: u64,
    pub emoji: String,
    pub count: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Increase,
}

/// Body of `POST /recipients/{id}/reactions/`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReactionRequest {
    pub emoji: String,
    #[serde(rename = "type")]
    pub kind: ReactionKind,
}

impl ReactionRequest {
    pub fn increase(emoji: &str) -> Self {
        ReactionRequest {
            emoji: emoji.to_string(),
            kind: ReactionKind::Increase,
        }
    }
}

/// Renders reactions as `👍 3  🎉 1`.
pub fn format_tally(reactions: &[Reaction]) -> String {
    reactions
        .iter()
        .map(|r| format!("{} {}", r.emoji, r.count))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_request_body() {
        let body = serde_json::to_value(ReactionRequest::increase("🎉")).unwrap();
        assert_eq!(body, serde_json::json!({ "emoji": "🎉", "type": "increase" }));
    }

    #[test]
    fn tally_keeps_server_order() {
        let reactions = vec![
            Reaction { id: 1, emoji: "👍".into(), count: 3 },
            Reaction { id: 2, emoji: "🎉".into(), count: 1 },
        ];
        assert_eq!(format_tally(&reactions), "👍 3  🎉 1");
        assert_eq!(format_tally(&[]), "");
    }
}
