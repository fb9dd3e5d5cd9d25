use std::sync::Arc;

use kanal::AsyncSender;
use lexi_core::card::Schedule;
use lexi_core::error::CoreError;
use lexi_core::types::AppEvent;
use lexi_core::{leitner, progress};

use crate::state::{AppState, today};

pub struct GradeOutcome {
    pub was_new: bool,
    pub schedule: Schedule,
}

/// Advance a card's schedule and fold the result into the daily stats:
/// first-ever grade counts as learned, everything else as reviewed, and the
/// cumulative score/rank are recomputed from the full store.
pub async fn apply_grade(
    state: &Arc<AppState>,
    word: &str,
    grade: u8,
) -> Result<GradeOutcome, CoreError> {
    state.ensure_today().await;

    let (was_new, schedule) = {
        let mut cards = state.cards.write().await;
        let card = cards
            .get(word)
            .ok_or_else(|| CoreError::UnknownCard(word.to_string()))?;
        let was_new = card.schedule.is_none();
        let schedule = leitner::advance(card.schedule, grade, today());
        cards.set_schedule(word, schedule)?;
        (was_new, schedule)
    };

    {
        let cards = state.cards.read().await;
        let settings = state.settings.read().await;
        let mut stats = state.stats.write().await;
        if was_new {
            stats.record_learned();
        } else {
            stats.record_reviewed();
        }
        stats.score = progress::total_score(&cards);
        stats.rank = progress::rank_label(stats.score, &settings.ranks.tiers).to_string();
    }

    Ok(GradeOutcome { was_new, schedule })
}

pub async fn handle_grade(
    state: Arc<AppState>,
    word: &str,
    grade: u8,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match apply_grade(&state, word, grade).await {
        Ok(outcome) => {
            crate::store::save(&state).await?;
            tracing::debug!(
                "Graded '{}' with {} -> box {}, due {}",
                word,
                grade,
                outcome.schedule.level.get(),
                outcome.schedule.due
            );
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(format!(
                    "{} '{}': box {}, due {}",
                    if outcome.was_new {
                        "Learned"
                    } else {
                        "Reviewed"
                    },
                    word,
                    outcome.schedule.level.get(),
                    outcome.schedule.due
                )))
                .await?;
        }
        Err(e) => {
            tracing::warn!("Grade rejected: {e}");
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(e.to_string()))
                .await?;
        }
    }
    Ok(())
}
