use std::sync::Arc;

use kanal::AsyncSender;
use lexi_core::spelling;
use lexi_core::types::{AppEvent, Flow};

use crate::events::grading::apply_grade;
use crate::state::AppState;

/// Grade applied when a spelling check succeeds
const PASS_GRADE: u8 = 4;
/// Grade applied when a review-mode spelling check fails
const FAIL_GRADE: u8 = 1;

pub async fn handle_spell_check(
    state: Arc<AppState>,
    flow: Flow,
    word: &str,
    guess: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (answer, meaning, example) = {
        let cards = state.cards.read().await;
        let Some(card) = cards.get(word) else {
            app_to_ui_tx
                .send(AppEvent::StatusUpdate(format!("Unknown card: {word}")))
                .await?;
            return Ok(());
        };
        (card.word.clone(), card.meaning.clone(), card.example.clone())
    };

    // empty guess is ignored, not an error
    let Some(outcome) = spelling::check(guess, &answer) else {
        return Ok(());
    };

    let feedback = match flow {
        Flow::Study => {
            if outcome.accepted {
                apply_grade(&state, word, PASS_GRADE).await?;
                crate::store::save(&state).await?;
                let mut text = format!("Correct: {answer}");
                if outcome.distance > 0 {
                    text.push_str(&format!(" ({} letter(s) off, accepted)", outcome.distance));
                }
                text.push_str(&format!("\nMeaning: {meaning}"));
                if let Some(example) = example {
                    text.push_str(&format!("\nExample: {example}"));
                }
                text
            } else {
                // study flow leaves the card untouched so it can be retried
                format!("Incorrect. The word was: {answer}. Try again or skip.")
            }
        }
        Flow::Review => {
            let grade = if outcome.accepted {
                PASS_GRADE
            } else {
                FAIL_GRADE
            };
            apply_grade(&state, word, grade).await?;
            crate::store::save(&state).await?;
            if outcome.accepted {
                let mut text = format!("Correct: {answer}");
                if outcome.distance > 0 {
                    text.push_str(&format!(" ({} letter(s) off, accepted)", outcome.distance));
                }
                text
            } else {
                format!("Incorrect. The word was: {answer}")
            }
        }
    };

    app_to_ui_tx.send(AppEvent::StatusUpdate(feedback)).await?;
    Ok(())
}
