use crate::model::Characteristic;
use std::collections::BTreeSet;

pub const CURRENT_MEDIA_STATE: &str = "current-media-state";
pub const TARGET_MEDIA_STATE: &str = "target-media-state";
pub const REMOTE_KEY: &str = "remote-key";

/// A HomeKit enumerated characteristic value.
pub trait CharacteristicEnum: Copy + Ord + Sized + 'static {
    const ALL: &'static [Self];

    fn value(self) -> u8;

    fn from_value(value: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.value() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CurrentMediaState {
    Playing,
    Paused,
    Stopped,
}

impl CharacteristicEnum for CurrentMediaState {
    const ALL: &'static [Self] = &[Self::Playing, Self::Paused, Self::Stopped];

    fn value(self) -> u8 {
        match self {
            Self::Playing => 0,
            Self::Paused => 1,
            Self::Stopped => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TargetMediaState {
    Play,
    Pause,
    Stop,
}

impl CharacteristicEnum for TargetMediaState {
    const ALL: &'static [Self] = &[Self::Play, Self::Pause, Self::Stop];

    fn value(self) -> u8 {
        match self {
            Self::Play => 0,
            Self::Pause => 1,
            Self::Stop => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RemoteKey {
    Rewind,
    FastForward,
    NextTrack,
    PreviousTrack,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Select,
    Back,
    Exit,
    PlayPause,
    Information,
}

impl CharacteristicEnum for RemoteKey {
    const ALL: &'static [Self] = &[
        Self::Rewind,
        Self::FastForward,
        Self::NextTrack,
        Self::PreviousTrack,
        Self::ArrowUp,
        Self::ArrowDown,
        Self::ArrowLeft,
        Self::ArrowRight,
        Self::Select,
        Self::Back,
        Self::Exit,
        Self::PlayPause,
        Self::Information,
    ];

    fn value(self) -> u8 {
        match self {
            Self::Rewind => 0,
            Self::FastForward => 1,
            Self::NextTrack => 2,
            Self::PreviousTrack => 3,
            Self::ArrowUp => 4,
            Self::ArrowDown => 5,
            Self::ArrowLeft => 6,
            Self::ArrowRight => 7,
            Self::Select => 8,
            Self::Back => 9,
            Self::Exit => 10,
            Self::PlayPause => 11,
            Self::Information => 15,
        }
    }
}

/// Restrict the members of `E` to what `characteristic` advertises.
///
/// `valid-values` wins over a `minValue`/`maxValue` range; with neither,
/// every member is allowed.
pub fn clamp_enum_to_char<E: CharacteristicEnum>(characteristic: &Characteristic) -> BTreeSet<E> {
    let min = characteristic.min_value.unwrap_or(u8::MIN);
    let max = characteristic.max_value.unwrap_or(u8::MAX);

    E::ALL
        .iter()
        .copied()
        .filter(|member| match &characteristic.valid_values {
            Some(valid) => valid.contains(&member.value()),
            None => (min..=max).contains(&member.value()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn characteristic(
        valid_values: Option<Vec<u8>>,
        min_value: Option<u8>,
        max_value: Option<u8>,
    ) -> Characteristic {
        Characteristic {
            iid: 1,
            ctype: TARGET_MEDIA_STATE.to_string(),
            value: None,
            perms: vec!["pw".to_string()],
            valid_values,
            min_value,
            max_value,
        }
    }

    #[test]
    fn test_from_value() {
        assert_eq!(RemoteKey::from_value(11), Some(RemoteKey::PlayPause));
        assert_eq!(RemoteKey::from_value(15), Some(RemoteKey::Information));
        assert_eq!(RemoteKey::from_value(12), None);
        assert_eq!(CurrentMediaState::from_value(2), Some(CurrentMediaState::Stopped));
        assert_eq!(CurrentMediaState::from_value(4), None);
    }

    #[test]
    fn test_clamp_unbounded_allows_all() {
        let all = clamp_enum_to_char::<TargetMediaState>(&characteristic(None, None, None));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_clamp_valid_values() {
        let keys = clamp_enum_to_char::<RemoteKey>(&characteristic(Some(vec![4, 5, 11, 42]), None, None));
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec![RemoteKey::ArrowUp, RemoteKey::ArrowDown, RemoteKey::PlayPause]
        );
    }

    #[test]
    fn test_clamp_range() {
        let states = clamp_enum_to_char::<TargetMediaState>(&characteristic(None, Some(1), Some(2)));
        assert!(!states.contains(&TargetMediaState::Play));
        assert!(states.contains(&TargetMediaState::Pause));
        assert!(states.contains(&TargetMediaState::Stop));
    }

    #[test]
    fn test_clamp_valid_values_override_range() {
        let states =
            clamp_enum_to_char::<TargetMediaState>(&characteristic(Some(vec![0]), Some(1), Some(2)));
        assert_eq!(states.into_iter().collect::<Vec<_>>(), vec![TargetMediaState::Play]);
    }
}
