//! Routing regions for the Riot API.

use std::fmt;

/// A routing token selecting a geographic or platform API deployment.
///
/// Regional deployments (`Americas`, `Europe`, ...) serve account and match
/// endpoints; platform deployments (`Euw1`, `Na1`, ...) serve game-specific
/// endpoints. The token is substituted into the client's base URL template
/// and is otherwise opaque: no validation happens here, a deployment that
/// does not exist simply fails to resolve at the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    // Regional deployments
    Americas,
    Europe,
    Asia,
    Sea,
    Esports,

    // Platform deployments
    Br1,
    Eun1,
    Euw1,
    Jp1,
    Kr,
    La1,
    La2,
    Me1,
    Na1,
    Oc1,
    Tr1,
    Ru,
    Ph2,
    Sg2,
    Th2,
    Tw2,
    Vn2,
}

impl Region {
    /// The subdomain token used in API hostnames.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Europe => "europe",
            Region::Asia => "asia",
            Region::Sea => "sea",
            Region::Esports => "esports",
            Region::Br1 => "br1",
            Region::Eun1 => "eun1",
            Region::Euw1 => "euw1",
            Region::Jp1 => "jp1",
            Region::Kr => "kr",
            Region::La1 => "la1",
            Region::La2 => "la2",
            Region::Me1 => "me1",
            Region::Na1 => "na1",
            Region::Oc1 => "oc1",
            Region::Tr1 => "tr1",
            Region::Ru => "ru",
            Region::Ph2 => "ph2",
            Region::Sg2 => "sg2",
            Region::Th2 => "th2",
            Region::Tw2 => "tw2",
            Region::Vn2 => "vn2",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
