use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Curling clubs a registrant may pick as their favorite
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Club {
    #[serde(rename = "Cache Valley Stone Society")]
    CacheValleyStoneSociety,
    #[serde(rename = "Ogden Curling Club")]
    OgdenCurlingClub,
    #[serde(rename = "Park City Curling Club")]
    ParkCityCurlingClub,
    #[serde(rename = "Salt City Curling Club")]
    SaltCityCurlingClub,
    #[serde(rename = "Utah Olympic Oval Curling Club")]
    UtahOlympicOvalCurlingClub,
}

impl Club {
    pub const ALL: [Club; 5] = [
        Club::CacheValleyStoneSociety,
        Club::OgdenCurlingClub,
        Club::ParkCityCurlingClub,
        Club::SaltCityCurlingClub,
        Club::UtahOlympicOvalCurlingClub,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Club::CacheValleyStoneSociety => "Cache Valley Stone Society",
            Club::OgdenCurlingClub => "Ogden Curling Club",
            Club::ParkCityCurlingClub => "Park City Curling Club",
            Club::SaltCityCurlingClub => "Salt City Curling Club",
            Club::UtahOlympicOvalCurlingClub => "Utah Olympic Oval Curling Club",
        }
    }
}

impl fmt::Display for Club {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact, case-sensitive match against the club names
impl FromStr for Club {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Club::ALL.into_iter().find(|club| club.name() == s).ok_or(())
    }
}

/// A registration that passed validation but has not been stored yet
#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub favorite_club: Club,
    /// Stored exactly as submitted; `false` when the field was absent
    pub news_letter: Value,
}

/// A stored registration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub favorite_club: Club,
    pub news_letter: Value,
}

impl UserRecord {
    pub fn new(id: Uuid, user: NewUser) -> Self {
        Self {
            id,
            username: user.username,
            password: user.password,
            favorite_club: user.favorite_club,
            news_letter: user.news_letter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_club_from_str_exact() {
        for club in Club::ALL {
            assert_eq!(club.name().parse::<Club>(), Ok(club));
        }
    }

    #[test]
    fn test_club_from_str_rejects_case_mismatch() {
        assert!("ogden curling club".parse::<Club>().is_err());
        assert!("Ogden Curling Club ".parse::<Club>().is_err());
        assert!("".parse::<Club>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let id = Uuid::new_v4();
        let record = UserRecord::new(
            id,
            NewUser {
                username: "sallyStudent2".to_string(),
                password: "abc12345".to_string(),
                favorite_club: Club::OgdenCurlingClub,
                news_letter: json!(false),
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": id.to_string(),
                "username": "sallyStudent2",
                "password": "abc12345",
                "favoriteClub": "Ogden Curling Club",
                "newsLetter": false,
            })
        );
    }
}
