use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use super::error::ConvoReadyError;


/// Topical scenario a piece of user text can be matched to.
///
/// Variant order is the declaration order used to break score ties.
/// `General` has no profile; it is only ever produced as the fallback.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Category {
    Restaurant,
    Transport,
    Shopping,
    Hotel,
    Health,
    Work,
    Social,
    Housing,
    General,
}

impl Category {

    pub fn name(&self) -> &'static str {
        self.into()
    }


    pub fn label(&self) -> &'static str {
        match self {
            Self::Restaurant => "🍽️ Restaurant",
            Self::Transport => "🚕 Transport",
            Self::Shopping => "🛍️ Shopping",
            Self::Hotel => "🏨 Hotel",
            Self::Health => "🏥 Health",
            Self::Work => "💼 Work",
            Self::Social => "🥂 Social",
            Self::Housing => "🏠 Housing",
            Self::General => "🌍 General",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::General)
    }


    pub fn parse(name: &str) -> Result<Self, ConvoReadyError> {
        name.trim()
            .parse()
            .map_err(|_| ConvoReadyError::UnknownCategory(name.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_names() {
        assert_eq!(Category::parse("housing").unwrap(), Category::Housing);
        assert_eq!(Category::parse(" Restaurant ").unwrap(), Category::Restaurant);
        assert_eq!(Category::parse("GENERAL").unwrap(), Category::General);
        assert!(matches!(
            Category::parse("spaceship"),
            Err(ConvoReadyError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_name_round_trips_through_display() {
        for category in Category::iter() {
            assert_eq!(Category::parse(&category.to_string()).unwrap(), category);
        }
    }

    #[test]
    fn test_declaration_order() {
        let all: Vec<Category> = Category::iter().collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], Category::Restaurant);
        assert_eq!(all[8], Category::General);
        assert!(Category::Transport < Category::Housing);
    }

    #[test]
    fn test_labels_mention_name() {
        assert!(Category::Housing.label().ends_with("Housing"));
        assert!(Category::General.is_fallback());
        assert!(!Category::Health.is_fallback());
    }
}
