use gloo::storage::{LocalStorage, Storage};
use sapper_core::PreferenceStore;

/// `localStorage` under the plain preference keys, values stored as raw strings.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalPreferenceStore;

impl PreferenceStore for LocalPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("failed to read {}: {:?}", key, err);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            log::error!("failed to save {}: {:?}", key, err);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Three-character counter display, clamped to what fits.
pub(crate) fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pads_and_clamps() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(999), "999");
        assert_eq!(format_for_counter(1234), "999");
    }

    #[test]
    fn counter_shows_negative_mines_left() {
        assert_eq!(format_for_counter(-1), "-01");
        assert_eq!(format_for_counter(-99), "-99");
        assert_eq!(format_for_counter(-500), "-99");
    }
}
