//! Game descriptor for ATLYSS
//!
//! Everything the host needs to recognise the game is fixed at build time.

/// Stable identifier the host uses for the game
pub const GAME_ID: &str = "atlyss";

/// Steam application id of ATLYSS
pub const STEAM_APP_ID: u32 = 2768430;

/// Identifies the target game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub steam_app_id: u32,
    pub executable: &'static str,
    pub required_files: &'static [&'static str],
    pub logo: &'static str,
}

/// The ATLYSS descriptor
pub const ATLYSS: GameDescriptor = GameDescriptor {
    id: GAME_ID,
    name: "atlyss",
    steam_app_id: STEAM_APP_ID,
    executable: "ATLYSS.exe",
    required_files: &["ATLYSS.exe"],
    logo: "gameart.jpg",
};

impl GameDescriptor {
    /// Steam app id as the host expects it in environment maps
    pub fn steam_app_id_string(&self) -> String {
        self.steam_app_id.to_string()
    }

    /// Whether a host-supplied game id refers to this game
    pub fn matches(&self, game_id: &str) -> bool {
        self.id == game_id
    }
}
