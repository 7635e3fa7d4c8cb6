//! Display names and count labels

use crate::entity::ListEntity;
use serde::{Deserialize, Serialize};

/// Grammatical number selected for a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralForm {
    One,
    Few,
    Many,
}

impl PluralForm {
    /// Slavic plural rule: 1, 21, 31 → one; 2-4, 22-24 → few; everything else → many.
    pub fn for_count(n: u64) -> Self {
        let last = n % 10;
        let last_two = n % 100;
        if last == 1 && last_two != 11 {
            PluralForm::One
        } else if (2..=4).contains(&last) && !(12..=14).contains(&last_two) {
            PluralForm::Few
        } else {
            PluralForm::Many
        }
    }
}

/// Count nouns for the three plural forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralLabels {
    pub one: String,
    pub few: String,
    pub many: String,
}

impl PluralLabels {
    pub fn new(one: impl Into<String>, few: impl Into<String>, many: impl Into<String>) -> Self {
        Self {
            one: one.into(),
            few: few.into(),
            many: many.into(),
        }
    }

    pub fn select(&self, n: u64) -> &str {
        match PluralForm::for_count(n) {
            PluralForm::One => &self.one,
            PluralForm::Few => &self.few,
            PluralForm::Many => &self.many,
        }
    }

    /// `"<n> <noun>"`, e.g. `"21 вещь"`.
    pub fn format_count(&self, n: u64) -> String {
        format!("{} {}", n, self.select(n))
    }

    pub fn is_complete(&self) -> bool {
        [&self.one, &self.few, &self.many]
            .iter()
            .all(|label| !label.trim().is_empty())
    }
}

/// Human label for a list row.
///
/// Falls back to `"<TypeLabel> #<id>"` when the name is missing or blank.
pub fn list_display_name<E: ListEntity>(entity: &E) -> String {
    match entity.name().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{} #{}", E::KIND.type_label(), entity.id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ContainerDisplay, ItemDisplay, PlaceDisplay, RoomDisplay};

    fn item(id: i64, name: Option<&str>) -> ItemDisplay {
        ItemDisplay {
            id,
            name: name.map(str::to_string),
            deleted_at: None,
            created_at: None,
            photo_url: None,
            last_location: None,
        }
    }

    #[test]
    fn test_plural_forms() {
        let labels = PluralLabels::new("вещь", "вещи", "вещей");
        assert_eq!(labels.format_count(1), "1 вещь");
        assert_eq!(labels.format_count(3), "3 вещи");
        assert_eq!(labels.format_count(5), "5 вещей");
        assert_eq!(labels.format_count(11), "11 вещей");
        assert_eq!(labels.format_count(12), "12 вещей");
        assert_eq!(labels.format_count(21), "21 вещь");
        assert_eq!(labels.format_count(22), "22 вещи");
        assert_eq!(labels.format_count(0), "0 вещей");
        assert_eq!(labels.format_count(111), "111 вещей");
    }

    #[test]
    fn test_display_name_uses_trimmed_name() {
        assert_eq!(list_display_name(&item(1, Some("  Дрель "))), "Дрель");
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(list_display_name(&item(2, Some(""))), "Вещь #2");
        assert_eq!(list_display_name(&item(4, Some("   "))), "Вещь #4");
        assert_eq!(list_display_name(&item(5, None)), "Вещь #5");

        let room = RoomDisplay {
            id: 3,
            name: None,
            deleted_at: None,
            created_at: None,
            photo_url: None,
            building_id: None,
            building_name: None,
            items_count: None,
            places_count: None,
            containers_count: None,
        };
        assert_eq!(list_display_name(&room), "Помещение #3");

        let place = PlaceDisplay {
            id: 8,
            name: None,
            deleted_at: None,
            created_at: None,
            photo_url: None,
            entity_type_name: None,
            last_location: None,
        };
        assert_eq!(list_display_name(&place), "Место #8");

        let container = ContainerDisplay {
            id: 9,
            name: Some(String::new()),
            deleted_at: None,
            created_at: None,
            photo_url: None,
            entity_type_name: None,
            items_count: None,
            last_location: None,
        };
        assert_eq!(list_display_name(&container), "Контейнер #9");
    }
}
