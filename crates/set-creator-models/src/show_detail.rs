use serde::{Deserialize, Serialize};

/// Season/episode layout of a show, as reported by TMDb
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowDetail {
    pub seasons: Vec<SeasonDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonDetail {
    pub number: u32,
    /// Episode numbers; empty unless episodes were requested
    #[serde(default)]
    pub episodes: Vec<u32>,
}
