//! Hand-authored families of related job categories.
//!
//! Used to inherit patterns into a new category and to borrow a base rate
//! from a related category that already has history.

const FAMILIES: &[&[&str]] = &[
    &["deck", "patio", "pergola", "porch", "gazebo"],
    &["fence", "gate", "railing"],
    &["kitchen_remodel", "bathroom_remodel", "basement_finish"],
    &["roofing", "gutters", "siding"],
    &["painting", "interior_painting", "exterior_painting", "drywall"],
    &["concrete", "driveway", "walkway", "paving"],
    &["landscaping", "lawn_care", "irrigation"],
];

/// Index of the family a normalized category belongs to.
///
/// "composite_deck" matches through its `deck` token; multi-word members
/// such as "kitchen_remodel" must appear whole.
pub fn category_family(category: &str) -> Option<usize> {
    FAMILIES.iter().position(|members| {
        members.iter().any(|member| {
            if member.contains('_') {
                category.contains(member)
            } else {
                category.split('_').any(|token| token == *member)
            }
        })
    })
}

/// Two distinct categories in the same family.
pub fn are_related(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }
    match (category_family(a), category_family(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outdoor_structures_are_related() {
        assert!(are_related("deck", "patio"));
        assert!(are_related("composite_deck", "pergola"));
        assert!(!are_related("deck", "deck"));
    }

    #[test]
    fn unrelated_trades_do_not_match() {
        assert!(!are_related("deck", "roofing"));
        assert!(!are_related("fence_wood", "kitchen_remodel"));
        assert_eq!(category_family("plumbing"), None);
    }

    #[test]
    fn multi_word_members_match_whole() {
        assert!(are_related("kitchen_remodel", "bathroom_remodel"));
        assert_eq!(category_family("kitchen"), None);
    }
}
