use std::path::PathBuf;

use chrono::NaiveDate;
use lexi_assistant::ChatMessage;
use lexi_config::Settings;
use lexi_core::card::CardStore;
use lexi_core::ladder::Challenge;
use lexi_core::queue::Queues;
use lexi_core::stats::DailyStats;
use lexi_decks::Deck;
use tokio::sync::RwLock;

pub struct AppState {
    pub data_dir: PathBuf,
    pub settings: RwLock<Settings>,
    pub cards: RwLock<CardStore>,
    pub decks: RwLock<Vec<Deck>>,
    pub stats: RwLock<DailyStats>,
    pub queues: RwLock<Queues>,
    pub challenge: RwLock<Option<Challenge>>,
    pub chat_history: RwLock<Vec<ChatMessage>>,
}

impl AppState {
    pub fn new(
        data_dir: PathBuf,
        settings: Settings,
        cards: CardStore,
        decks: Vec<Deck>,
        stats: DailyStats,
    ) -> Self {
        Self {
            data_dir,
            settings: RwLock::new(settings),
            cards: RwLock::new(cards),
            decks: RwLock::new(decks),
            stats: RwLock::new(stats),
            queues: RwLock::new(Queues::default()),
            challenge: RwLock::new(None),
            chat_history: RwLock::new(Vec::new()),
        }
    }

    /// Roll the stats record over if the calendar day changed since the
    /// last access. Must run before any counter mutation.
    pub async fn ensure_today(&self) {
        let today = today();
        let mut stats = self.stats.write().await;
        if stats.date != today {
            let rolled = stats.clone().rolled_over(today);
            tracing::info!(
                "Day rollover {} -> {} (streak {})",
                stats.date,
                today,
                rolled.streak
            );
            *stats = rolled;
        }
    }
}

/// The session's calendar day
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
