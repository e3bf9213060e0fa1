use serde::Serialize;

/// Symbolic code for one of the language's boolean tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    NextIsEmpty,
    NextIsNotEmpty,
    NextIsWall,
    NextIsNotWall,
    NextIsFriend,
    NextIsNotFriend,
    NextIsEnemy,
    NextIsNotEnemy,
    Random,
    True,
}

impl Condition {
    pub const ALL: [Condition; 10] = [
        Condition::NextIsEmpty,
        Condition::NextIsNotEmpty,
        Condition::NextIsWall,
        Condition::NextIsNotWall,
        Condition::NextIsFriend,
        Condition::NextIsNotFriend,
        Condition::NextIsEnemy,
        Condition::NextIsNotEnemy,
        Condition::Random,
        Condition::True,
    ];

    /// Looks up the condition spelled `token`, e.g. `next-is-wall`.
    pub fn from_token(token: &str) -> Option<Condition> {
        Condition::ALL
            .iter()
            .copied()
            .find(|condition| condition.as_str() == token)
    }

    /// The source spelling of this condition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::NextIsEmpty => "next-is-empty",
            Condition::NextIsNotEmpty => "next-is-not-empty",
            Condition::NextIsWall => "next-is-wall",
            Condition::NextIsNotWall => "next-is-not-wall",
            Condition::NextIsFriend => "next-is-friend",
            Condition::NextIsNotFriend => "next-is-not-friend",
            Condition::NextIsEnemy => "next-is-enemy",
            Condition::NextIsNotEnemy => "next-is-not-enemy",
            Condition::Random => "random",
            Condition::True => "true",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Condition;

    #[test]
    fn test_from_token() {
        assert_eq!(Condition::from_token("next-is-not-enemy"), Some(Condition::NextIsNotEnemy));
        assert_eq!(Condition::from_token("true"), Some(Condition::True));
        assert_eq!(Condition::from_token("TRUE"), None);
        assert_eq!(Condition::from_token("next_is_empty"), None);
    }

    #[test]
    fn test_spellings_are_unique() {
        for condition in Condition::ALL {
            assert_eq!(Condition::from_token(condition.as_str()), Some(condition));
        }
    }
}
