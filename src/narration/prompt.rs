//! Prompt builder for Dungeon Master narration.

use std::fmt;

use super::context::CampaignContext;

/// Fixed instruction placed before the campaign settings.
pub const BASE_DM_INSTRUCTION: &str = "You are a Dungeon Master. Narrate the story based solely on the following context. Stay in character, do not add extraneous information, and follow the specified settings.\n\n";

/// Fully assembled instruction string sent to the model.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PromptText(String);

impl PromptText {
    /// Borrow the prompt as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the prompt and return the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Build a deterministic prompt from a campaign context.
#[must_use]
pub fn build_prompt(context: &CampaignContext) -> PromptText {
    let labeled = [
        ("World Context", &context.world_context),
        ("Genre", &context.genre),
        ("Difficulty", &context.difficulty),
        ("Narrative Tone", &context.narrative_tone),
        ("Campaign Name", &context.campaign_name),
    ];

    let mut out = String::with_capacity(estimate_len(context));
    out.push_str(BASE_DM_INSTRUCTION);
    for (label, value) in labeled {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out.push('\n');
    out.push_str("Now, here is the player's prompt: ");
    out.push_str(&context.user_question);

    PromptText(out)
}

const fn estimate_len(context: &CampaignContext) -> usize {
    BASE_DM_INSTRUCTION.len()
        + 128
        + context.world_context.len()
        + context.genre.len()
        + context.difficulty.len()
        + context.narrative_tone.len()
        + context.campaign_name.len()
        + context.user_question.len()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn ashfall() -> CampaignContext {
        CampaignContext {
            world_context: "A ruined keep".to_string(),
            genre: "dark fantasy".to_string(),
            difficulty: "hard".to_string(),
            narrative_tone: "grim".to_string(),
            campaign_name: "Ashfall".to_string(),
            user_question: "I open the door.".to_string(),
        }
    }

    #[test]
    fn test_build_prompt_example() {
        let prompt = build_prompt(&ashfall());
        let expected = format!(
            "{BASE_DM_INSTRUCTION}World Context: A ruined keep\nGenre: dark fantasy\nDifficulty: hard\nNarrative Tone: grim\nCampaign Name: Ashfall\n\nNow, here is the player's prompt: I open the door."
        );
        assert_eq!(prompt.as_str(), expected);
        assert!(prompt.as_str().starts_with("You are a Dungeon Master."));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let context = ashfall();
        assert_eq!(build_prompt(&context), build_prompt(&context.clone()));
    }

    #[test]
    fn test_field_order_ignores_source_order() {
        let pairs = [
            ("user_question", "Who goes there?"),
            ("campaign_name", "Ashfall"),
            ("narrative_tone", "grim"),
            ("difficulty", "hard"),
            ("genre", "dark fantasy"),
            ("world_context", "A ruined keep"),
        ];
        let fields: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let text = build_prompt(&CampaignContext::from_fields(&fields)).into_string();

        let positions: Vec<usize> = [
            "World Context:",
            "Genre:",
            "Difficulty:",
            "Narrative Tone:",
            "Campaign Name:",
            "Now, here is the player's prompt:",
        ]
        .iter()
        .filter_map(|label| text.find(label))
        .collect();
        assert_eq!(positions.len(), 6);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_context_keeps_labels() {
        let text = build_prompt(&CampaignContext::default()).to_string();
        assert!(text.ends_with(
            "World Context: \nGenre: \nDifficulty: \nNarrative Tone: \nCampaign Name: \n\nNow, here is the player's prompt: "
        ));
    }
}
