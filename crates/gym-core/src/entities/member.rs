//! Member entity - a person who books classes

use crate::value_objects::MemberId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub active: bool,
}

impl Member {
    /// Name shown to trainers in notifications and rosters
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => format!("Member #{}", self.id),
            (first, "") => first.to_string(),
            ("", last) => last.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(first: &str, last: &str) -> Member {
        Member {
            id: MemberId::new(9),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "ana@example.com".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(member("Ana", "Lopez").full_name(), "Ana Lopez");
        assert_eq!(member("Ana", " ").full_name(), "Ana");
        assert_eq!(member("", "").full_name(), "Member #9");
    }
}
