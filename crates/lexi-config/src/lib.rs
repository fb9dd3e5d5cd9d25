use serde::{Deserialize, Serialize};

use self::assistant::AssistantConfig;
use self::daily::DailyConfig;
use self::ranks::RankConfig;
use self::study::StudyConfig;

pub mod assistant;
pub mod daily;
pub mod ranks;
pub mod study;

#[derive(Default, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub daily: DailyConfig,
    pub study: StudyConfig,
    pub ranks: RankConfig,
    pub assistant: AssistantConfig,
}

impl Settings {
    pub fn new() -> Self {
        Settings {
            daily: DailyConfig::new(),
            study: StudyConfig::new(),
            ranks: RankConfig::new(),
            assistant: AssistantConfig::new(),
        }
    }
}
