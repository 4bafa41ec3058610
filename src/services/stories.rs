//! Story services - Pubblicazione storie e conteggio dello storage premium

use crate::core::{AppError, AppState};
use crate::dtos::PostStoryDTO;
use crate::entities::{StoryCollection, StoryType, User};
use crate::workflow::new_id;
use axum::{
    Extension,
    extract::{Json, State},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn post_story(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
    Json(body): Json<PostStoryDTO>,
) -> Result<Json<Vec<StoryCollection>>, AppError> {
    debug!("Posting story");
    // 1. Validare il DTO: le storie testuali richiedono testo, quelle media un mediaUrl
    // 2. L'id della storia deve essere unico (CONFLICT)
    // 3. Con premium attivo il media occupa storage, oltre la quota PAYLOAD_TOO_LARGE
    // 4. Accodare la storia nella collezione dell'utente, creandola se manca
    // 5. Ritornare tutte le collezioni
    body.validate()?;
    let story = body.into_story(new_id("story"));
    match story.story_type {
        StoryType::Text if story.content.is_empty() => {
            return Err(AppError::bad_request("Text stories need some content"));
        }
        StoryType::Image | StoryType::Video if story.media_url.is_none() => {
            return Err(AppError::bad_request("Media stories need a mediaUrl"));
        }
        _ => {}
    }

    let stories = state
        .store
        .transact(|data| {
            let taken = data
                .stories
                .iter()
                .flat_map(|c| c.stories.iter())
                .any(|s| s.id == story.id);
            if taken {
                warn!("Story id {} already in use", story.id);
                return Err(AppError::conflict("Story id already exists"));
            }

            let now = Utc::now();
            let account = data.account_mut(&current_user.id);
            account.expire_if_due(now);
            if account.is_premium(now) {
                account.reserve_storage(story.media_size_mb()).map_err(|remaining| {
                    warn!("Premium storage exhausted, {:.2}MB left", remaining);
                    AppError::payload_too_large("Premium storage quota exceeded")
                        .with_details(format!("{:.2}MB remaining", remaining))
                })?;
            }

            match data.stories.iter_mut().find(|c| c.user_id == current_user.id) {
                Some(collection) => collection.stories.push(story),
                None => data.stories.push(StoryCollection {
                    user_id: current_user.id.clone(),
                    stories: vec![story],
                }),
            }
            Ok::<_, AppError>(data.stories.clone())
        })
        .await?;

    info!("Story posted");
    Ok(Json(stories))
}
