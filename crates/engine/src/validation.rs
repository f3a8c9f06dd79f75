//! Field validation run before an entry is written.
//!
//! Checks run in a fixed order and stop at the first failure, so a caller
//! fixing one field at a time sees the messages below in this order.

use crate::{Entry, EngineError, ResultEngine};

pub const INVALID_DESCRIPTION: &str = "Informe uma Descrição válida!";
pub const INVALID_MONTH: &str = "Informe um Mês válido!";
pub const INVALID_YEAR: &str = "Informe um Ano válido!";
pub const MISSING_USER: &str = "Informe um Usuário!";
pub const INVALID_AMOUNT: &str = "Informe um Valor válido!";
pub const MISSING_KIND: &str = "Informe um tipo de Lançamento!";

fn reject(message: &str) -> ResultEngine<()> {
    Err(EngineError::InvalidEntry(message.to_string()))
}

/// Validate an entry, returning [`EngineError::InvalidEntry`] with the
/// message of the first failing check.
pub fn validate(entry: &Entry) -> ResultEngine<()> {
    if entry
        .description
        .as_deref()
        .is_none_or(|description| description.trim().is_empty())
    {
        return reject(INVALID_DESCRIPTION);
    }

    if !entry.month.is_some_and(|month| (1..=12).contains(&month)) {
        return reject(INVALID_MONTH);
    }

    // Four digits.
    if !entry.year.is_some_and(|year| (1000..=9999).contains(&year)) {
        return reject(INVALID_YEAR);
    }

    if entry.owner_id().is_none() {
        return reject(MISSING_USER);
    }

    if !entry.amount.is_some_and(|amount| amount.is_positive()) {
        return reject(INVALID_AMOUNT);
    }

    if entry.kind.is_none() {
        return reject(MISSING_KIND);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryKind, MoneyCents, Owner};

    fn assert_rejected(entry: &Entry, message: &str) {
        assert_eq!(
            validate(entry),
            Err(EngineError::InvalidEntry(message.to_string()))
        );
    }

    #[test]
    fn reports_failures_one_at_a_time_in_order() {
        let mut entry = Entry::default();
        assert_rejected(&entry, INVALID_DESCRIPTION);

        entry.description = Some(String::new());
        assert_rejected(&entry, INVALID_DESCRIPTION);

        entry.description = Some("   ".to_string());
        assert_rejected(&entry, INVALID_DESCRIPTION);

        entry.description = Some("Salário".to_string());
        assert_rejected(&entry, INVALID_MONTH);

        entry.month = Some(0);
        assert_rejected(&entry, INVALID_MONTH);

        entry.month = Some(13);
        assert_rejected(&entry, INVALID_MONTH);

        entry.month = Some(1);
        assert_rejected(&entry, INVALID_YEAR);

        entry.year = Some(202);
        assert_rejected(&entry, INVALID_YEAR);

        entry.year = Some(20_200);
        assert_rejected(&entry, INVALID_YEAR);

        entry.year = Some(2020);
        assert_rejected(&entry, MISSING_USER);

        entry.owner = Some(Owner::default());
        assert_rejected(&entry, MISSING_USER);

        entry.owner = Some(Owner::new(1));
        assert_rejected(&entry, INVALID_AMOUNT);

        entry.amount = Some(MoneyCents::ZERO);
        assert_rejected(&entry, INVALID_AMOUNT);

        entry.amount = Some(MoneyCents::new(-100));
        assert_rejected(&entry, INVALID_AMOUNT);

        entry.amount = Some(MoneyCents::new(1));
        assert_rejected(&entry, MISSING_KIND);

        entry.kind = Some(EntryKind::Income);
        assert_eq!(validate(&entry), Ok(()));
    }

    #[test]
    fn blank_description_wins_over_every_other_failure() {
        let entry = Entry {
            description: Some("\t".to_string()),
            month: Some(42),
            year: Some(12),
            amount: Some(MoneyCents::new(-1)),
            ..Entry::default()
        };
        assert_rejected(&entry, INVALID_DESCRIPTION);
    }

    #[test]
    fn month_bounds_are_inclusive() {
        let mut entry = Entry::new("Gym", 1, 2024, MoneyCents::new(9_990), EntryKind::Expense, 2);
        assert_eq!(validate(&entry), Ok(()));
        entry.month = Some(12);
        assert_eq!(validate(&entry), Ok(()));
    }

    #[test]
    fn status_is_not_validated() {
        let entry = Entry::new("Gym", 6, 2024, MoneyCents::new(9_990), EntryKind::Expense, 2);
        assert!(entry.status.is_none());
        assert_eq!(validate(&entry), Ok(()));
    }
}
