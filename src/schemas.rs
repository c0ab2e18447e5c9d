//! Response shapes for the supported Riot API endpoints.

use serde::Deserialize;

// Account-V1

/// A Riot account, as returned by the Account-V1 endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub puuid: String,
    #[serde(rename = "gameName")]
    pub game_name: String,
    #[serde(rename = "tagLine")]
    pub tag_line: String,
}

/// The active shard of a player for a given game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ActiveShard {
    pub puuid: String,
    pub game: String,
    #[serde(rename = "activeShard")]
    pub active_shard: String,
}
