use std::path::PathBuf;

/// Which grading flow a spelling check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Study,
    Review,
}

/// A card as shown to the learner
#[derive(Debug, Clone)]
pub struct CardView {
    pub word: String,
    pub meaning: String,
    pub example: Option<String>,
    pub is_new: bool,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // session -> handlers
    SettingsChanged,
    RefreshQueues,
    NextCard(Flow),
    Grade { word: String, grade: u8 },
    SpellCheck { flow: Flow, word: String, guess: String },
    OneMoreSet,
    ToggleDeck { id: String, enabled: bool },
    ImportWordlist { path: PathBuf },
    ExportState { path: PathBuf },
    ImportState { path: PathBuf },
    StartChallenge,
    ChallengeAnswer { guess: String },
    AssistantChat { prompt: String },
    ShowStatus,
    WipeData,

    // handlers -> display
    ShowCard(Flow, CardView),
    QueueEmpty(Flow),
    StatusUpdate(String),
    AssistantReply(String),
}
