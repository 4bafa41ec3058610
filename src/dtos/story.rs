//! Story DTOs - Pubblicazione di una storia

use crate::entities::{Story, StoryType};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Il client invia la storia completa; l'id è opzionale e viene generato se assente
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostStoryDTO {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub story_type: StoryType,
    #[validate(length(max = 500, message = "Story content must be at most 500 characters"))]
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl PostStoryDTO {
    pub fn into_story(self, id: String) -> Story {
        Story {
            id: self.id.filter(|id| !id.trim().is_empty()).unwrap_or(id),
            story_type: self.story_type,
            content: self.content.trim().to_string(),
            media_url: self.media_url,
        }
    }
}
