//! Story entity - Storie raggruppate per utente

use super::enums::StoryType;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    #[serde(rename = "type")]
    pub story_type: StoryType,
    /// Testo della storia o didascalia del media
    pub content: String,
    /// Data URL base64 per immagini e video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl Story {
    /// Dimensione del media in MB, usata per il conteggio dello storage premium
    pub fn media_size_mb(&self) -> f64 {
        self.media_url
            .as_ref()
            .map(|url| url.len() as f64 / (1024.0 * 1024.0))
            .unwrap_or(0.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoryCollection {
    pub user_id: String,
    pub stories: Vec<Story>,
}
