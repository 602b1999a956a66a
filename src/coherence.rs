use crate::types::{Size, WordBank};

/// Decides whether a sampled word bank makes a plausible story
pub trait CoherenceCheck {
    fn is_coherent(&self, bank: &WordBank) -> bool;
}

/// Metadata-driven compatibility rules.
///
/// Every rule is independent and any single violation rejects the bank.
/// Trait rules fire only when both entries involved carry metadata; a bare
/// string never constrains anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleChecker;

impl CoherenceCheck for RuleChecker {
    fn is_coherent(&self, bank: &WordBank) -> bool {
        is_coherent(bank)
    }
}

pub fn is_coherent(bank: &WordBank) -> bool {
    !(repeats_object(bank)
        || action_beyond_character(bank)
        || object_mismatches_character(bank)
        || object_cannot_fly(bank))
}

/// The object must not share its word with the character or the place
fn repeats_object(bank: &WordBank) -> bool {
    let object = bank.object.word();
    bank.character.word() == object || bank.place.word() == object
}

fn action_beyond_character(bank: &WordBank) -> bool {
    let (action, character) = (&bank.action, &bank.character);
    if !(action.is_rich() && character.is_rich()) {
        return false;
    }

    match action.word() {
        "runs" => character.can_run() == Some(false),
        "hides" => character.can_hide() == Some(false),
        _ => false,
    }
}

fn object_mismatches_character(bank: &WordBank) -> bool {
    let (character, object) = (&bank.character, &bank.object);
    if !(character.is_rich() && object.is_rich()) {
        return false;
    }

    match (character.size(), object.size()) {
        (Some(Size::Large), Some(Size::Tiny)) => true,
        (Some(Size::Small), Some(Size::Large)) => object.can_be_carried() == Some(false),
        _ => false,
    }
}

fn object_cannot_fly(bank: &WordBank) -> bool {
    let (action, object) = (&bank.action, &bank.object);
    action.is_rich()
        && object.is_rich()
        && action.word() == "flies"
        && object.can_fly() == Some(false)
}
