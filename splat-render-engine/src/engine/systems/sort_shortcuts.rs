use bevy::prelude::*;
use splat_sort::SortAlgorithm;

use crate::engine::sorting::settings::SortSettings;

/// 1, 2 and 3 select counting, quick and comparator sort.
pub fn algorithm_shortcut_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<SortSettings>,
) {
    let selected = keyboard
        .get_just_pressed()
        .find_map(|key| algorithm_for_key(*key));

    if let Some(algorithm) = selected {
        if settings.algorithm != algorithm {
            info!("Sorting algorithm: {}", algorithm);
            settings.algorithm = algorithm;
        }
    }
}

fn algorithm_for_key(key: KeyCode) -> Option<SortAlgorithm> {
    match key {
        KeyCode::Digit1 => Some(SortAlgorithm::CountingSort),
        KeyCode::Digit2 => Some(SortAlgorithm::QuickSort),
        KeyCode::Digit3 => Some(SortAlgorithm::Comparator),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_algorithms() {
        assert_eq!(algorithm_for_key(KeyCode::Digit1), Some(SortAlgorithm::CountingSort));
        assert_eq!(algorithm_for_key(KeyCode::Digit3), Some(SortAlgorithm::Comparator));
        assert_eq!(algorithm_for_key(KeyCode::KeyW), None);
    }
}
